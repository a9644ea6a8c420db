//! Media type declaration builders.

use apidesign_core::{
    AttributeDefinition, DataType, DefinitionKind, DesignError, MediaTypeId, TypeRef,
    UserTypeId, Validation,
};
use apidesign_registry::{LinkDefinition, Registry};

use crate::session::DesignSession;
use crate::view::ViewBuilder;

/// Builder handed to the block of a media type declaration.
pub struct MediaTypeBuilder<'s> {
    pub(crate) session: &'s mut DesignSession,
    pub(crate) id: MediaTypeId,
}

impl<'s> MediaTypeBuilder<'s> {
    pub(crate) fn new(session: &'s mut DesignSession, id: MediaTypeId) -> Self {
        Self { session, id }
    }

    /// Handle of the media type being declared.
    pub fn id(&self) -> MediaTypeId {
        self.id
    }

    pub fn registry(&self) -> &Registry {
        &self.session.registry
    }

    /// Set the description.
    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        if let Some(def) = self.session.registry.media_type_mut(self.id) {
            def.description = Some(description.into());
        }
        self
    }

    /// Override the type name derived from the identifier.
    pub fn type_name(&mut self, name: impl Into<String>) -> &mut Self {
        if let Some(def) = self.session.registry.media_type_mut(self.id) {
            def.type_name = name.into();
        }
        self
    }

    /// Set the reference type supplying defaults for attributes declared by name only.
    pub fn reference(&mut self, type_ref: impl Into<TypeRef>) -> &mut Self {
        let type_ref = type_ref.into();
        if !self.session.registry.contains_type(type_ref) {
            self.session.diagnostics.report(DesignError::invalid_argument(format!(
                "reference {} is not a type of this design",
                type_ref
            )));
            return self;
        }
        if let Some(def) = self.session.registry.media_type_mut(self.id) {
            def.reference = Some(type_ref);
        }
        self
    }

    /// Replace the root type.
    ///
    /// Media types start as an empty object; this is how a collection or a
    /// scalar representation is declared directly.
    pub fn root_type(&mut self, data_type: DataType) -> &mut Self {
        if let Some(def) = self.session.registry.media_type_mut(self.id) {
            def.attribute.data_type = Some(data_type);
        }
        self
    }

    /// Declare attributes.
    pub fn attributes<F>(&mut self, block: F) -> &mut Self
    where
        F: FnOnce(&mut AttributesBuilder<'_>),
    {
        block(&mut AttributesBuilder::new(
            &mut *self.session,
            AttributeTarget::Media(self.id),
        ));
        self
    }

    /// Declare links.
    pub fn links<F>(&mut self, block: F) -> &mut Self
    where
        F: FnOnce(&mut LinksBuilder<'_>),
    {
        block(&mut LinksBuilder {
            session: &mut *self.session,
            id: self.id,
        });
        self
    }

    /// Declare a view listing the attributes collected by `block`.
    pub fn view<F>(&mut self, name: &str, block: F) -> &mut Self
    where
        F: FnOnce(&mut ViewBuilder<'_>),
    {
        self.define_view(name, Some(block));
        self
    }

    /// Declare a view without a block.
    ///
    /// On a collection the view is copied from the element media type.
    pub fn view_inherited(&mut self, name: &str) -> &mut Self {
        self.define_view::<fn(&mut ViewBuilder<'_>)>(name, None);
        self
    }

    /// Derive a collection of `element`, see [`DesignSession::collection_of`].
    pub fn collection_of(&mut self, element: MediaTypeId) -> Option<MediaTypeId> {
        self.session.collection_of(element)
    }

    /// Derive a collection of `element`, see [`DesignSession::collection_of_with`].
    pub fn collection_of_with<F>(&mut self, element: MediaTypeId, block: F) -> Option<MediaTypeId>
    where
        F: FnOnce(&mut MediaTypeBuilder<'_>),
    {
        self.session.collection_of_with(element, block)
    }
}

/// Definition receiving declared attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AttributeTarget {
    Media(MediaTypeId),
    User(UserTypeId),
}

/// Builder handed to attribute blocks of media types and user types.
pub struct AttributesBuilder<'s> {
    session: &'s mut DesignSession,
    target: AttributeTarget,
}

impl<'s> AttributesBuilder<'s> {
    pub(crate) fn new(session: &'s mut DesignSession, target: AttributeTarget) -> Self {
        Self { session, target }
    }

    pub fn registry(&self) -> &Registry {
        &self.session.registry
    }

    /// Declare an attribute.
    pub fn attribute(&mut self, name: &str, definition: AttributeDefinition) -> &mut Self {
        let owner = self.owner_name();
        let Some(root) = self.root_mut() else {
            return self;
        };
        let Some(object) = root.as_object_mut() else {
            self.session.diagnostics.report(DesignError::invalid_argument(format!(
                "cannot define attribute {:?} on non object type {:?}",
                name, owner
            )));
            return self;
        };
        if object.contains_key(name) {
            self.session.diagnostics.report(DesignError::duplicate_in(
                DefinitionKind::Attribute,
                name,
                owner,
            ));
            return self;
        }
        object.insert(name.to_string(), definition);
        self
    }

    /// Declare an attribute by name only; its type comes from the reference type.
    pub fn inherit(&mut self, name: &str) -> &mut Self {
        self.attribute(name, AttributeDefinition::untyped())
    }

    /// Mark attributes as required.
    pub fn required(&mut self, names: &[&str]) -> &mut Self {
        if let Some(root) = self.root_mut() {
            root.validations.push(Validation::Required(
                names.iter().map(|n| n.to_string()).collect(),
            ));
        }
        self
    }

    /// Derive a collection of `element`, see [`DesignSession::collection_of`].
    pub fn collection_of(&mut self, element: MediaTypeId) -> Option<MediaTypeId> {
        self.session.collection_of(element)
    }

    fn root_mut(&mut self) -> Option<&mut AttributeDefinition> {
        match self.target {
            AttributeTarget::Media(id) => self
                .session
                .registry
                .media_type_mut(id)
                .map(|def| &mut def.attribute),
            AttributeTarget::User(id) => self
                .session
                .registry
                .user_type_mut(id)
                .map(|def| &mut def.attribute),
        }
    }

    fn owner_name(&self) -> String {
        let type_ref = match self.target {
            AttributeTarget::Media(id) => TypeRef::Media(id),
            AttributeTarget::User(id) => TypeRef::User(id),
        };
        self.session.registry.type_display_name(type_ref)
    }
}

/// Builder handed to link blocks.
pub struct LinksBuilder<'s> {
    session: &'s mut DesignSession,
    id: MediaTypeId,
}

impl<'s> LinksBuilder<'s> {
    /// Link to attribute `name`, rendered with the default link view.
    pub fn link(&mut self, name: &str) -> &mut Self {
        self.link_with(name, &[])
    }

    /// Link to attribute `name`, rendered with `views[0]`.
    ///
    /// At most one view may be given. Extra views are reported as
    /// `InvalidLinkSyntax` and the link is still declared with the first one.
    pub fn link_with(&mut self, name: &str, views: &[&str]) -> &mut Self {
        let default_view = &self.session.config.default_link_view;
        let view = views
            .first()
            .map(|v| v.to_string())
            .unwrap_or_else(|| default_view.clone());

        let Some(def) = self.session.registry.media_type_mut(self.id) else {
            return self;
        };
        let owner = def.type_name.clone();
        if def.links.contains_key(name) {
            self.session.diagnostics.report(DesignError::duplicate_in(
                DefinitionKind::Link,
                name,
                owner,
            ));
            return self;
        }
        def.links.insert(
            name.to_string(),
            LinkDefinition {
                name: name.to_string(),
                view,
                parent: self.id,
            },
        );
        tracing::debug!(link = name, media_type = %owner, "link declared");

        if views.len() > 1 {
            self.session
                .diagnostics
                .report(DesignError::invalid_link_syntax(name, owner));
        }
        self
    }
}
