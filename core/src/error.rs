//! Error types for identifier parsing and design diagnostics.

use std::fmt;
use thiserror::Error;

/// Errors produced while parsing a media type identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("no media type")]
    NoMediaType,

    #[error("expected token after slash")]
    ExpectedTokenAfterSlash,

    #[error("unexpected content after media subtype: {0:?}")]
    UnexpectedContent(String),

    #[error("invalid media parameter: {0:?}")]
    InvalidParameter(String),

    #[error("duplicate parameter name: {0}")]
    DuplicateParameter(String),
}

/// The kind of definition a duplicate was detected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    MediaType,
    UserType,
    Attribute,
    View,
    Link,
    Response,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DefinitionKind::MediaType => "media type",
            DefinitionKind::UserType => "type",
            DefinitionKind::Attribute => "attribute",
            DefinitionKind::View => "view",
            DefinitionKind::Link => "link",
            DefinitionKind::Response => "response",
        };
        f.write_str(s)
    }
}

/// Diagnostics recorded during a design pass.
///
/// None of these abort the pass: they are accumulated in
/// [`Diagnostics`](crate::Diagnostics) and presented together at the end.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DesignError {
    /// Malformed media type identifier.
    #[error("invalid media type identifier {identifier:?}: {reason}")]
    InvalidIdentifier {
        identifier: String,
        #[source]
        reason: IdentifierError,
    },

    /// Identifier, type, view, link or response defined twice.
    #[error("{kind} {name:?} is defined twice{}", in_owner(.owner))]
    DuplicateDefinition {
        kind: DefinitionKind,
        name: String,
        owner: Option<String>,
    },

    /// View declared on a media type whose root is neither an object nor a collection.
    #[error("cannot define view on non object and non collection media type {media_type:?}")]
    UnsupportedViewTarget { media_type: String },

    /// View, link or required list names an attribute the owner does not declare.
    #[error("unknown attribute {attribute:?} in {owner:?}")]
    UnknownAttribute { attribute: String, owner: String },

    /// View name not defined on the media type it is looked up in.
    #[error("unknown view {view:?} in {owner:?}")]
    UnknownView { view: String, owner: String },

    /// Link declared with more than one view argument.
    #[error(
        "invalid syntax in link definition for {link:?} in {owner:?}, allowed syntax is link(name) or link(name, view)"
    )]
    InvalidLinkSyntax { link: String, owner: String },

    /// Value of an unsupported kind passed where a handle or identifier was expected.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Attribute declared by name only but missing from the reference type.
    #[error("attribute {attribute:?} of {owner:?} not found in reference type {reference:?}")]
    UnresolvedReference {
        attribute: String,
        owner: String,
        reference: String,
    },

    /// Media type without a "default" view.
    #[error("media type {media_type:?} does not define a default view")]
    MissingDefaultView { media_type: String },

    /// Link whose attribute is not a media type.
    #[error("link {link:?} of {owner:?} must refer to a media type attribute")]
    InvalidLinkTarget { link: String, owner: String },

    /// Pattern validation that does not compile.
    #[error("invalid pattern {pattern:?} on attribute {attribute:?} of {owner:?}: {reason}")]
    InvalidPattern {
        attribute: String,
        owner: String,
        pattern: String,
        reason: String,
    },
}

fn in_owner(owner: &Option<String>) -> String {
    match owner {
        Some(owner) => format!(" in {:?}", owner),
        None => String::new(),
    }
}

impl DesignError {
    pub fn invalid_identifier(identifier: impl Into<String>, reason: IdentifierError) -> Self {
        Self::InvalidIdentifier {
            identifier: identifier.into(),
            reason,
        }
    }

    pub fn duplicate(kind: DefinitionKind, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind,
            name: name.into(),
            owner: None,
        }
    }

    pub fn duplicate_in(
        kind: DefinitionKind,
        name: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self::DuplicateDefinition {
            kind,
            name: name.into(),
            owner: Some(owner.into()),
        }
    }

    pub fn unsupported_view_target(media_type: impl Into<String>) -> Self {
        Self::UnsupportedViewTarget {
            media_type: media_type.into(),
        }
    }

    pub fn unknown_attribute(attribute: impl Into<String>, owner: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            attribute: attribute.into(),
            owner: owner.into(),
        }
    }

    pub fn unknown_view(view: impl Into<String>, owner: impl Into<String>) -> Self {
        Self::UnknownView {
            view: view.into(),
            owner: owner.into(),
        }
    }

    pub fn invalid_link_syntax(link: impl Into<String>, owner: impl Into<String>) -> Self {
        Self::InvalidLinkSyntax {
            link: link.into(),
            owner: owner.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn unresolved_reference(
        attribute: impl Into<String>,
        owner: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self::UnresolvedReference {
            attribute: attribute.into(),
            owner: owner.into(),
            reference: reference.into(),
        }
    }

    pub fn missing_default_view(media_type: impl Into<String>) -> Self {
        Self::MissingDefaultView {
            media_type: media_type.into(),
        }
    }

    pub fn invalid_link_target(link: impl Into<String>, owner: impl Into<String>) -> Self {
        Self::InvalidLinkTarget {
            link: link.into(),
            owner: owner.into(),
        }
    }

    pub fn invalid_pattern(
        attribute: impl Into<String>,
        owner: impl Into<String>,
        pattern: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidPattern {
            attribute: attribute.into(),
            owner: owner.into(),
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}

/// All diagnostics of a failed pass, as a single error value.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} design error(s):{}", .0.len(), list(.0))]
pub struct DesignErrors(pub Vec<DesignError>);

fn list(errors: &[DesignError]) -> String {
    errors.iter().map(|e| format!("\n  - {}", e)).collect()
}

/// Errors loading a [`DesignConfig`](crate::DesignConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid design configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration value {field} must not be empty")]
    EmptyValue { field: &'static str },
}
