//! Design session.

use apidesign_analyzer::Finalizer;
use apidesign_core::{
    DefinitionKind, DesignConfig, DesignError, DesignErrors, Diagnostics, MediaTypeId,
    MediaTypeIdentifier, UserTypeId,
};
use apidesign_registry::{MediaTypeDefinition, Registry, UserTypeDefinition};
use indexmap::IndexMap;

use crate::media_type::MediaTypeBuilder;
use crate::response::{ResponseBuilder, ResponseDefinition};
use crate::user_type::TypeBuilder;

/// A design pass.
///
/// Owns everything a pass mutates: the registry, the diagnostics, the
/// declared responses and the counter used for synthetic type names. Every
/// declaration goes through a session, so independent sessions never share
/// state.
#[derive(Debug, Default)]
pub struct DesignSession {
    pub(crate) config: DesignConfig,
    pub(crate) registry: Registry,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) responses: IndexMap<String, ResponseDefinition>,
    /// Synthetic media type names handed out so far.
    media_type_count: u32,
}

/// The outcome of a successful pass.
#[derive(Debug)]
pub struct Design {
    pub registry: Registry,
    pub responses: IndexMap<String, ResponseDefinition>,
}

impl DesignSession {
    /// Create a session with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DesignConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &DesignConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Record a diagnostic on behalf of the caller.
    pub fn report(&mut self, error: DesignError) {
        self.diagnostics.report(error);
    }

    pub fn responses(&self) -> &IndexMap<String, ResponseDefinition> {
        &self.responses
    }

    pub fn get_response(&self, name: &str) -> Option<&ResponseDefinition> {
        self.responses.get(name)
    }

    // ==================== Declarations ====================

    /// Declare a media type and run `block` against it.
    ///
    /// Returns `None` when the identifier is malformed or already registered;
    /// the block is not run in that case.
    pub fn media_type<F>(&mut self, identifier: &str, block: F) -> Option<MediaTypeId>
    where
        F: FnOnce(&mut MediaTypeBuilder<'_>),
    {
        let parsed = match MediaTypeIdentifier::normalize(identifier, &self.config.default_subtype)
        {
            Ok(parsed) => parsed,
            Err(reason) => {
                self.diagnostics
                    .report(DesignError::invalid_identifier(identifier, reason));
                return None;
            }
        };

        let type_name = match parsed.type_name_candidate() {
            Some(name) => name,
            None => self.next_synthetic_name(),
        };

        let canonical = parsed.canonical();
        let id = match self
            .registry
            .register(MediaTypeDefinition::new(parsed, type_name))
        {
            Ok(id) => id,
            Err(_) => {
                self.diagnostics
                    .report(DesignError::duplicate(DefinitionKind::MediaType, canonical));
                return None;
            }
        };

        block(&mut MediaTypeBuilder::new(self, id));
        Some(id)
    }

    /// Declare a user type and run `block` against it.
    pub fn user_type<F>(&mut self, name: &str, block: F) -> Option<UserTypeId>
    where
        F: FnOnce(&mut TypeBuilder<'_>),
    {
        let id = match self
            .registry
            .register_user_type(UserTypeDefinition::new(name))
        {
            Ok(id) => id,
            Err(_) => {
                self.diagnostics
                    .report(DesignError::duplicate(DefinitionKind::UserType, name));
                return None;
            }
        };

        block(&mut TypeBuilder::new(self, id));
        Some(id)
    }

    /// Declare a response and run `block` against it.
    ///
    /// Returns whether the response was stored.
    pub fn response<F>(&mut self, name: &str, block: F) -> bool
    where
        F: FnOnce(&mut ResponseBuilder<'_>),
    {
        if self.responses.contains_key(name) {
            self.diagnostics
                .report(DesignError::duplicate(DefinitionKind::Response, name));
            return false;
        }

        let mut builder = ResponseBuilder::new(self, name);
        block(&mut builder);
        let definition = builder.into_definition();
        self.responses.insert(name.to_string(), definition);
        true
    }

    /// Allocate the next `MediaType<N>` name.
    fn next_synthetic_name(&mut self) -> String {
        self.media_type_count += 1;
        format!(
            "{}{}",
            self.config.synthetic_name_prefix, self.media_type_count
        )
    }

    // ==================== Completion ====================

    /// Finalize the registry and hand over the design.
    ///
    /// Fails with every diagnostic of the pass, declaration and
    /// finalization alike, when any was reported.
    pub fn finish(mut self) -> Result<Design, DesignErrors> {
        Finalizer::new(&mut self.registry, &mut self.diagnostics, &self.config).run();
        let design = Design {
            registry: self.registry,
            responses: self.responses,
        };
        self.diagnostics.into_result(design)
    }

    /// Split the session without finalizing.
    pub fn into_parts(self) -> (Registry, Diagnostics) {
        (self.registry, self.diagnostics)
    }
}
