//! Design definition types.

use apidesign_core::{
    AttributeDefinition, DataType, MediaTypeId, MediaTypeIdentifier, Object, TypeRef,
};
use indexmap::IndexMap;

/// Name of the synthetic view attribute that renders the links of a media type.
pub const LINKS_ATTRIBUTE: &str = "links";

/// Name of the view used when none is specified.
pub const DEFAULT_VIEW: &str = "default";

/// Media type definition.
#[derive(Debug, Clone)]
pub struct MediaTypeDefinition {
    /// Canonical identifier.
    pub identifier: MediaTypeIdentifier,
    /// Type name, derived from the identifier unless overridden.
    pub type_name: String,
    pub description: Option<String>,
    /// Root attribute: an object of attributes or an array of an element.
    pub attribute: AttributeDefinition,
    /// Views by name.
    pub views: IndexMap<String, ViewDefinition>,
    /// Links by name.
    pub links: IndexMap<String, LinkDefinition>,
    /// Type supplying defaults for attributes declared by name only.
    pub reference: Option<TypeRef>,
}

impl MediaTypeDefinition {
    /// Create a media type whose root is an empty object.
    pub fn new(identifier: MediaTypeIdentifier, type_name: impl Into<String>) -> Self {
        Self {
            identifier,
            type_name: type_name.into(),
            description: None,
            attribute: AttributeDefinition::new(DataType::object()),
            views: IndexMap::new(),
            links: IndexMap::new(),
            reference: None,
        }
    }

    /// Create a collection media type whose root is an array of `element`.
    pub fn collection(
        identifier: MediaTypeIdentifier,
        type_name: impl Into<String>,
        element: MediaTypeId,
    ) -> Self {
        let mut def = Self::new(identifier, type_name);
        def.attribute = AttributeDefinition::new(DataType::array_of(DataType::Media(element)));
        def
    }

    /// Canonical identifier string.
    pub fn identifier_str(&self) -> String {
        self.identifier.canonical()
    }

    pub fn is_object(&self) -> bool {
        matches!(self.attribute.data_type, Some(DataType::Object(_)))
    }

    pub fn is_collection(&self) -> bool {
        matches!(self.attribute.data_type, Some(DataType::Array(_)))
    }

    /// Attributes of an object root.
    pub fn object(&self) -> Option<&Object> {
        self.attribute.as_object()
    }

    pub fn object_mut(&mut self) -> Option<&mut Object> {
        self.attribute.as_object_mut()
    }

    /// Element media type of a collection root.
    pub fn element(&self) -> Option<MediaTypeId> {
        match self.attribute.as_array()?.data_type {
            Some(DataType::Media(id)) => Some(id),
            _ => None,
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&AttributeDefinition> {
        self.object().and_then(|o| o.get(name))
    }

    pub fn get_view(&self, name: &str) -> Option<&ViewDefinition> {
        self.views.get(name)
    }

    pub fn has_view(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    pub fn get_link(&self, name: &str) -> Option<&LinkDefinition> {
        self.links.get(name)
    }
}

/// An attribute listed by a view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewAttribute {
    /// View used to render the attribute when its type is a media type.
    pub view: Option<String>,
    /// Whether the name matched an attribute of the parent media type.
    pub resolved: bool,
}

impl ViewAttribute {
    /// Override the view used to render this attribute.
    pub fn view(&mut self, name: impl Into<String>) -> &mut Self {
        self.view = Some(name.into());
        self
    }
}

/// View definition: the subset of a media type's attributes rendered together.
///
/// A view only names attributes. The attribute definitions themselves are
/// always read from the parent media type through
/// [`Registry::view_attribute`](crate::Registry::view_attribute).
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDefinition {
    pub name: String,
    /// Media type owning the view.
    pub parent: MediaTypeId,
    /// Rendered attribute names, in declaration order.
    pub attributes: IndexMap<String, ViewAttribute>,
}

impl ViewDefinition {
    pub fn new(name: impl Into<String>, parent: MediaTypeId) -> Self {
        Self {
            name: name.into(),
            parent,
            attributes: IndexMap::new(),
        }
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(|s| s.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&ViewAttribute> {
        self.attributes.get(name)
    }

    /// Whether the view renders the links of its media type.
    pub fn renders_links(&self) -> bool {
        self.attributes.contains_key(LINKS_ATTRIBUTE)
    }

    /// Names that did not match an attribute of the parent.
    pub fn unresolved(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(name, attr)| !attr.resolved && name.as_str() != LINKS_ATTRIBUTE)
            .map(|(name, _)| name.as_str())
    }
}

/// Link definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDefinition {
    /// Name of the linked attribute.
    pub name: String,
    /// View used to render the linked attribute.
    pub view: String,
    /// Media type owning the link.
    pub parent: MediaTypeId,
}

/// User (plain) type definition.
#[derive(Debug, Clone)]
pub struct UserTypeDefinition {
    /// Name the type was declared under.
    pub name: String,
    /// Type name, the declared name unless overridden.
    pub type_name: String,
    pub description: Option<String>,
    /// Root attribute, an object of attributes.
    pub attribute: AttributeDefinition,
    /// Type supplying defaults for attributes declared by name only.
    pub reference: Option<TypeRef>,
}

impl UserTypeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            type_name: name.clone(),
            name,
            description: None,
            attribute: AttributeDefinition::new(DataType::object()),
            reference: None,
        }
    }

    pub fn object(&self) -> Option<&Object> {
        self.attribute.as_object()
    }

    pub fn get_attr(&self, name: &str) -> Option<&AttributeDefinition> {
        self.object().and_then(|o| o.get(name))
    }
}
