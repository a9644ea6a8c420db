//! Collection media types.

use apidesign_core::{DesignError, MediaTypeId};
use apidesign_registry::MediaTypeDefinition;

use crate::media_type::MediaTypeBuilder;
use crate::session::DesignSession;

/// Identifier parameter distinguishing a collection from its element.
const TYPE_PARAM: &str = "type";

impl DesignSession {
    /// Derive the media type representing many `element`s.
    ///
    /// The derived identifier is the element's with a `type` parameter, set to
    /// `collection` unless the element already carries one. The type name is
    /// the element's followed by `Collection`.
    ///
    /// Unlike [`DesignSession::media_type`], the derived media type replaces
    /// whatever was registered under its identifier before.
    pub fn collection_of(&mut self, element: MediaTypeId) -> Option<MediaTypeId> {
        self.derive_collection::<fn(&mut MediaTypeBuilder<'_>)>(element, None)
    }

    /// Like [`DesignSession::collection_of`], running `block` against the new
    /// media type once its root is set.
    ///
    /// The collection is only registered when the block reports nothing.
    pub fn collection_of_with<F>(&mut self, element: MediaTypeId, block: F) -> Option<MediaTypeId>
    where
        F: FnOnce(&mut MediaTypeBuilder<'_>),
    {
        self.derive_collection(element, Some(block))
    }

    fn derive_collection<F>(&mut self, element: MediaTypeId, block: Option<F>) -> Option<MediaTypeId>
    where
        F: FnOnce(&mut MediaTypeBuilder<'_>),
    {
        let Some(elem) = self.registry.media_type(element) else {
            self.diagnostics.report(DesignError::invalid_argument(format!(
                "collection element {} is not a media type of this design",
                element
            )));
            return None;
        };

        let mut identifier = elem.identifier.clone();
        if !identifier.has_param(TYPE_PARAM) {
            identifier.set_param(TYPE_PARAM, self.config.collection_type.clone());
        }
        let type_name = format!("{}{}", elem.type_name, self.config.collection_suffix);

        let id = self.registry.allocate(MediaTypeDefinition::collection(
            identifier, type_name, element,
        ));

        let checkpoint = self.diagnostics.checkpoint();
        if let Some(block) = block {
            block(&mut MediaTypeBuilder::new(self, id));
        }
        if self.diagnostics.has_errors_since(checkpoint) {
            tracing::debug!(%id, "collection block failed, not registered");
            return Some(id);
        }

        self.registry.bind_identifier(id);
        Some(id)
    }
}
