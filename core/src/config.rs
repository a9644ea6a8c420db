//! Design pass configuration.

use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// Knobs of the design pass. Every field has a default, so a partial JSON
/// document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesignConfig {
    /// Subtype appended to identifiers that have none.
    pub default_subtype: String,
    /// Value of the `type` parameter given to derived collection identifiers.
    pub collection_type: String,
    /// Suffix appended to the element type name of a collection.
    pub collection_suffix: String,
    /// View used to render links that do not name one.
    pub default_link_view: String,
    /// Prefix of the synthetic names given to media types without a usable identifier.
    pub synthetic_name_prefix: String,
    /// Whether finalization requires a "default" view on every non-collection media type.
    pub require_default_view: bool,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            default_subtype: "json".to_string(),
            collection_type: "collection".to_string(),
            collection_suffix: "Collection".to_string(),
            default_link_view: "link".to_string(),
            synthetic_name_prefix: "MediaType".to_string(),
            require_default_view: true,
        }
    }
}

impl DesignConfig {
    /// Load a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: DesignConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("default_subtype", &self.default_subtype),
            ("collection_type", &self.collection_type),
            ("default_link_view", &self.default_link_view),
            ("synthetic_name_prefix", &self.synthetic_name_prefix),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyValue { field });
            }
        }
        Ok(())
    }
}
