//! API Design DSL
//!
//! Declarative construction of a design: media types with their attributes,
//! views and links, collections derived from them, user types and responses.
//!
//! ```
//! use apidesign_core::{AttributeDefinition, DataType};
//! use apidesign_dsl::DesignSession;
//!
//! let mut session = DesignSession::new();
//! let bottle = session.media_type("application/vnd.goa.example.bottle", |mt| {
//!     mt.attributes(|a| {
//!         a.attribute("id", AttributeDefinition::new(DataType::integer()));
//!     });
//!     mt.view("default", |v| {
//!         v.attribute("id");
//!     });
//! });
//! assert!(bottle.is_some());
//! ```

mod collection;
mod media_type;
mod response;
mod session;
mod user_type;
mod view;

pub use media_type::{AttributesBuilder, LinksBuilder, MediaTypeBuilder};
pub use response::{MediaSelector, ResponseBuilder, ResponseDefinition};
pub use session::{Design, DesignSession};
pub use user_type::TypeBuilder;
pub use view::ViewBuilder;
