//! Finalization pass.

use apidesign_core::{DesignConfig, Diagnostics, MediaTypeId, TypeRef};
use apidesign_registry::Registry;

/// The Finalizer completes a declared design and checks it.
///
/// Every problem found is reported to the diagnostics; the pass always runs
/// to the end.
pub struct Finalizer<'a> {
    pub(crate) registry: &'a mut Registry,
    pub(crate) diagnostics: &'a mut Diagnostics,
    pub(crate) config: &'a DesignConfig,
}

impl<'a> Finalizer<'a> {
    pub fn new(
        registry: &'a mut Registry,
        diagnostics: &'a mut Diagnostics,
        config: &'a DesignConfig,
    ) -> Self {
        Self {
            registry,
            diagnostics,
            config,
        }
    }

    /// Run every step of the pass.
    pub fn run(&mut self) {
        let checkpoint = self.diagnostics.checkpoint();

        self.merge_references();
        self.default_untyped();

        self.check_required();
        self.check_links();
        self.check_view_overrides();
        self.check_default_views();
        self.check_patterns();

        tracing::debug!(
            media_types = self.registry.media_type_count(),
            errors = self.diagnostics.since(checkpoint).len(),
            "design finalized"
        );
    }

    /// Every registered definition, media types first.
    pub(crate) fn targets(&self) -> Vec<TypeRef> {
        self.registry
            .media_type_ids()
            .into_iter()
            .map(TypeRef::Media)
            .chain(self.registry.user_type_ids().into_iter().map(TypeRef::User))
            .collect()
    }

    pub(crate) fn media_type_ids(&self) -> Vec<MediaTypeId> {
        self.registry.media_type_ids()
    }
}
