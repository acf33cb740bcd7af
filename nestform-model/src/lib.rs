//! Domain model for nestform
//!
//! Dynamic values, domain-object classes with their structural schema, and the
//! record instances the form engine reads from and writes back into.

mod error;
mod record;
mod record_serde;
pub mod schema;
mod value;

pub use error::*;
pub use record::*;
pub use schema::*;
pub use value::*;
