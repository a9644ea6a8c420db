//! The Registry - media type and user type store.

use crate::{MediaTypeDefinition, UserTypeDefinition, ViewDefinition};
use apidesign_core::{AttributeDefinition, DataType, MediaTypeId, Object, TypeRef, UserTypeId};
use indexmap::IndexMap;
use thiserror::Error;

/// Errors raised by the strict registration paths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Duplicate media type identifier: {0}")]
    DuplicateIdentifier(String),

    #[error("Duplicate type name: {0}")]
    DuplicateTypeName(String),
}

/// The Registry holds every definition of a design.
///
/// Definitions live in arenas addressed by handles. The identifier index
/// decides which media type answers to a given identifier; a definition
/// displaced by [`Registry::bind_identifier`] stays reachable through its handle.
#[derive(Debug, Default)]
pub struct Registry {
    /// Media type definitions by handle.
    media_types: Vec<MediaTypeDefinition>,
    /// Media type handle lookup by canonical identifier.
    identifiers: IndexMap<String, MediaTypeId>,

    /// User type definitions by handle.
    user_types: Vec<UserTypeDefinition>,
    /// User type handle lookup by declared name.
    user_type_names: IndexMap<String, UserTypeId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Media Type Registration ====================

    /// Register a media type under its identifier.
    ///
    /// Fails when the identifier is already taken; the existing registration stands.
    pub fn register(
        &mut self,
        definition: MediaTypeDefinition,
    ) -> Result<MediaTypeId, RegistryError> {
        let identifier = definition.identifier_str();
        if self.identifiers.contains_key(&identifier) {
            return Err(RegistryError::DuplicateIdentifier(identifier));
        }
        let id = self.allocate(definition);
        self.identifiers.insert(identifier, id);
        tracing::debug!(%id, "registered media type");
        Ok(id)
    }

    /// Store a definition without making it reachable by identifier.
    pub fn allocate(&mut self, definition: MediaTypeDefinition) -> MediaTypeId {
        let id = MediaTypeId::new(self.media_types.len() as u32);
        self.media_types.push(definition);
        id
    }

    /// Point the definition's identifier at `id`, replacing any previous binding.
    ///
    /// Returns the handle previously bound to the identifier, if any.
    pub fn bind_identifier(&mut self, id: MediaTypeId) -> Option<MediaTypeId> {
        let identifier = self.media_types.get(id.index())?.identifier_str();
        let previous = self.identifiers.insert(identifier.clone(), id);
        match previous {
            Some(old) if old != id => {
                tracing::debug!(%identifier, %old, new = %id, "media type identifier overwritten")
            }
            _ => tracing::debug!(%identifier, %id, "registered media type"),
        }
        previous.filter(|old| *old != id)
    }

    // ==================== Media Type Lookups ====================

    /// Get the media type registered under a canonical identifier.
    pub fn lookup(&self, identifier: &str) -> Option<&MediaTypeDefinition> {
        self.lookup_id(identifier).and_then(|id| self.media_type(id))
    }

    /// Get the handle registered under a canonical identifier.
    pub fn lookup_id(&self, identifier: &str) -> Option<MediaTypeId> {
        self.identifiers.get(identifier).copied()
    }

    pub fn contains_identifier(&self, identifier: &str) -> bool {
        self.identifiers.contains_key(identifier)
    }

    /// Get a media type by handle.
    pub fn media_type(&self, id: MediaTypeId) -> Option<&MediaTypeDefinition> {
        self.media_types.get(id.index())
    }

    pub fn media_type_mut(&mut self, id: MediaTypeId) -> Option<&mut MediaTypeDefinition> {
        self.media_types.get_mut(id.index())
    }

    /// Registered media types, in registration order.
    pub fn media_types(&self) -> impl Iterator<Item = (MediaTypeId, &MediaTypeDefinition)> {
        self.identifiers
            .values()
            .filter_map(|&id| self.media_type(id).map(|def| (id, def)))
    }

    /// Handles of the registered media types, in registration order.
    pub fn media_type_ids(&self) -> Vec<MediaTypeId> {
        self.identifiers.values().copied().collect()
    }

    /// Number of registered media types.
    pub fn media_type_count(&self) -> usize {
        self.identifiers.len()
    }

    // ==================== User Types ====================

    /// Register a user type under its declared name.
    pub fn register_user_type(
        &mut self,
        definition: UserTypeDefinition,
    ) -> Result<UserTypeId, RegistryError> {
        if self.user_type_names.contains_key(&definition.name) {
            return Err(RegistryError::DuplicateTypeName(definition.name));
        }
        let id = UserTypeId::new(self.user_types.len() as u32);
        self.user_type_names.insert(definition.name.clone(), id);
        self.user_types.push(definition);
        tracing::debug!(%id, "registered type");
        Ok(id)
    }

    pub fn user_type(&self, id: UserTypeId) -> Option<&UserTypeDefinition> {
        self.user_types.get(id.index())
    }

    pub fn user_type_mut(&mut self, id: UserTypeId) -> Option<&mut UserTypeDefinition> {
        self.user_types.get_mut(id.index())
    }

    pub fn lookup_user_type(&self, name: &str) -> Option<UserTypeId> {
        self.user_type_names.get(name).copied()
    }

    pub fn user_types(&self) -> impl Iterator<Item = (UserTypeId, &UserTypeDefinition)> {
        self.user_type_names
            .values()
            .filter_map(|&id| self.user_type(id).map(|def| (id, def)))
    }

    pub fn user_type_ids(&self) -> Vec<UserTypeId> {
        self.user_type_names.values().copied().collect()
    }

    // ==================== Resolution Helpers ====================

    /// Whether `type_ref` designates a definition of this registry.
    pub fn contains_type(&self, type_ref: TypeRef) -> bool {
        match type_ref {
            TypeRef::Media(id) => self.media_type(id).is_some(),
            TypeRef::User(id) => self.user_type(id).is_some(),
        }
    }

    /// Attributes view names of a media type resolve against: its own object,
    /// or the object of its element media type when it is a collection.
    pub fn resolution_object(&self, id: MediaTypeId) -> Option<&Object> {
        let def = self.media_type(id)?;
        match &def.attribute.data_type {
            Some(DataType::Object(o)) => Some(o),
            Some(DataType::Array(elem)) => match &elem.data_type {
                Some(DataType::Object(o)) => Some(o),
                Some(DataType::Media(elem_id)) => self.media_type(*elem_id)?.object(),
                Some(DataType::User(elem_id)) => self.user_type(*elem_id)?.object(),
                _ => None,
            },
            _ => None,
        }
    }

    /// The authoritative definition of an attribute rendered by a view.
    pub fn view_attribute(
        &self,
        view: &ViewDefinition,
        name: &str,
    ) -> Option<&AttributeDefinition> {
        if !view.attributes.contains_key(name) {
            return None;
        }
        self.resolution_object(view.parent)?.get(name)
    }

    /// The authoritative definitions of every resolved attribute of a view.
    pub fn view_attributes<'a>(
        &'a self,
        view: &'a ViewDefinition,
    ) -> impl Iterator<Item = (&'a str, &'a AttributeDefinition)> + 'a {
        view.attribute_names()
            .filter_map(move |name| self.view_attribute(view, name).map(|attr| (name, attr)))
    }

    /// Root attribute of a media type or user type.
    pub fn root_attribute(&self, type_ref: TypeRef) -> Option<&AttributeDefinition> {
        match type_ref {
            TypeRef::Media(id) => self.media_type(id).map(|def| &def.attribute),
            TypeRef::User(id) => self.user_type(id).map(|def| &def.attribute),
        }
    }

    pub fn root_attribute_mut(&mut self, type_ref: TypeRef) -> Option<&mut AttributeDefinition> {
        match type_ref {
            TypeRef::Media(id) => self.media_type_mut(id).map(|def| &mut def.attribute),
            TypeRef::User(id) => self.user_type_mut(id).map(|def| &mut def.attribute),
        }
    }

    /// Reference type set on a definition.
    pub fn reference_of(&self, type_ref: TypeRef) -> Option<TypeRef> {
        match type_ref {
            TypeRef::Media(id) => self.media_type(id)?.reference,
            TypeRef::User(id) => self.user_type(id)?.reference,
        }
    }

    /// Same-named attribute of a reference type.
    pub fn reference_attribute(
        &self,
        type_ref: TypeRef,
        name: &str,
    ) -> Option<&AttributeDefinition> {
        self.root_attribute(type_ref)?.as_object()?.get(name)
    }

    /// Human readable name of a type, used in diagnostics.
    pub fn type_display_name(&self, type_ref: TypeRef) -> String {
        match type_ref {
            TypeRef::Media(id) => self
                .media_type(id)
                .map(|def| def.type_name.clone())
                .unwrap_or_else(|| id.to_string()),
            TypeRef::User(id) => self
                .user_type(id)
                .map(|def| def.type_name.clone())
                .unwrap_or_else(|| id.to_string()),
        }
    }

    /// Render a data type as a short label such as `Integer` or `Array<Bottle>`.
    pub fn type_label(&self, data_type: &DataType) -> String {
        match data_type {
            DataType::Primitive(p) => p.name().to_string(),
            DataType::Object(_) => "Object".to_string(),
            DataType::Array(elem) => match &elem.data_type {
                Some(t) => format!("Array<{}>", self.type_label(t)),
                None => "Array".to_string(),
            },
            DataType::Media(id) => self.type_display_name(TypeRef::Media(*id)),
            DataType::User(id) => self.type_display_name(TypeRef::User(*id)),
        }
    }
}
