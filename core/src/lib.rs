//! API Design Core Types
//!
//! This crate provides the foundational types shared by the design crates:
//! - Definition handles (MediaTypeId, UserTypeId, TypeRef)
//! - Media type identifiers and their canonical form
//! - Attribute types, validations and literal values
//! - Design errors and the diagnostics accumulator
//! - Pass configuration

mod config;
mod diagnostics;
mod error;
mod id;
mod identifier;
mod types;
mod value;

pub use config::*;
pub use diagnostics::*;
pub use error::*;
pub use id::*;
pub use identifier::*;
pub use types::*;
pub use value::*;
