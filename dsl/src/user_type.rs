//! User type declarations.

use apidesign_core::{AttributeDefinition, DesignError, TypeRef, UserTypeId};

use crate::media_type::{AttributeTarget, AttributesBuilder};
use crate::session::DesignSession;

/// Builder handed to the block of a user type declaration.
pub struct TypeBuilder<'s> {
    session: &'s mut DesignSession,
    id: UserTypeId,
}

impl<'s> TypeBuilder<'s> {
    pub(crate) fn new(session: &'s mut DesignSession, id: UserTypeId) -> Self {
        Self { session, id }
    }

    pub fn id(&self) -> UserTypeId {
        self.id
    }

    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        if let Some(def) = self.session.registry.user_type_mut(self.id) {
            def.description = Some(description.into());
        }
        self
    }

    /// Override the type name, which defaults to the declared name.
    pub fn type_name(&mut self, name: impl Into<String>) -> &mut Self {
        if let Some(def) = self.session.registry.user_type_mut(self.id) {
            def.type_name = name.into();
        }
        self
    }

    /// Set the reference type supplying defaults for attributes declared by name only.
    pub fn reference(&mut self, type_ref: impl Into<TypeRef>) -> &mut Self {
        let type_ref = type_ref.into();
        if !self.session.registry.contains_type(type_ref) || type_ref == TypeRef::User(self.id) {
            self.session.diagnostics.report(DesignError::invalid_argument(format!(
                "reference {} is not usable from type {}",
                type_ref, self.id
            )));
            return self;
        }
        if let Some(def) = self.session.registry.user_type_mut(self.id) {
            def.reference = Some(type_ref);
        }
        self
    }

    /// Declare an attribute.
    pub fn attribute(&mut self, name: &str, definition: AttributeDefinition) -> &mut Self {
        self.attributes().attribute(name, definition);
        self
    }

    /// Declare an attribute by name only; its type comes from the reference type.
    pub fn inherit(&mut self, name: &str) -> &mut Self {
        self.attributes().inherit(name);
        self
    }

    pub fn required(&mut self, names: &[&str]) -> &mut Self {
        self.attributes().required(names);
        self
    }

    fn attributes(&mut self) -> AttributesBuilder<'_> {
        AttributesBuilder::new(&mut *self.session, AttributeTarget::User(self.id))
    }
}
