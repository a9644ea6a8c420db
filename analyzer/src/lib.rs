//! API Design Analyzer
//!
//! Finalization of a declared design: reference types are merged into the
//! attributes that named them, then links, views, required lists and
//! validations are checked against the completed registry.

mod checks;
mod finalizer;
mod references;

pub use finalizer::Finalizer;
