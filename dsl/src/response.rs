//! Responses and their media type.

use apidesign_core::{DesignError, MediaTypeId};
use apidesign_registry::Registry;

use crate::session::DesignSession;

/// How a response names its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSelector {
    /// A media type declared in the design.
    Handle(MediaTypeId),
    /// A raw identifier, used verbatim.
    Identifier(String),
}

impl From<MediaTypeId> for MediaSelector {
    fn from(id: MediaTypeId) -> Self {
        MediaSelector::Handle(id)
    }
}

impl From<&str> for MediaSelector {
    fn from(identifier: &str) -> Self {
        MediaSelector::Identifier(identifier.to_string())
    }
}

impl From<String> for MediaSelector {
    fn from(identifier: String) -> Self {
        MediaSelector::Identifier(identifier)
    }
}

/// A named response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseDefinition {
    pub name: String,
    pub status: Option<u16>,
    pub description: Option<String>,
    /// Identifier of the response media type.
    pub media_type: Option<String>,
}

/// Builder handed to the block of a response declaration.
pub struct ResponseBuilder<'s> {
    session: &'s mut DesignSession,
    definition: ResponseDefinition,
}

impl<'s> ResponseBuilder<'s> {
    pub(crate) fn new(session: &'s mut DesignSession, name: &str) -> Self {
        Self {
            session,
            definition: ResponseDefinition {
                name: name.to_string(),
                ..ResponseDefinition::default()
            },
        }
    }

    pub(crate) fn into_definition(self) -> ResponseDefinition {
        self.definition
    }

    pub fn registry(&self) -> &Registry {
        &self.session.registry
    }

    pub fn status(&mut self, status: u16) -> &mut Self {
        self.definition.status = Some(status);
        self
    }

    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.definition.description = Some(description.into());
        self
    }

    /// Set the response media type, by handle or by identifier.
    pub fn media(&mut self, media: impl Into<MediaSelector>) -> &mut Self {
        match media.into() {
            MediaSelector::Identifier(identifier) => {
                self.definition.media_type = Some(identifier);
            }
            MediaSelector::Handle(id) => match self.session.registry.media_type(id) {
                Some(def) => self.definition.media_type = Some(def.identifier_str()),
                None => self.session.diagnostics.report(DesignError::invalid_argument(
                    format!("media type must be an identifier or a declared media type, got {}", id),
                )),
            },
        }
        self
    }

    /// Derive a collection of `element`, see [`DesignSession::collection_of`].
    pub fn collection_of(&mut self, element: MediaTypeId) -> Option<MediaTypeId> {
        self.session.collection_of(element)
    }
}
