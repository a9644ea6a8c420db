//! API Design Registry
//!
//! Definition store for a design. Single source of truth for media types,
//! their views and links, and user types. Populated by the design pass and
//! read by finalization and downstream consumers.

mod export;
mod registry;
mod types;

pub use export::*;
pub use registry::{Registry, RegistryError};
pub use types::*;
