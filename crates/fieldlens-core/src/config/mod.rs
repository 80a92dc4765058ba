//! Field-configuration store and persistence.
//!
//! The store holds the ordered descriptor list the decoder consumes; it has
//! no decoding logic of its own. Persistence is a whole-file JSON read or
//! write in `file`, kept apart from the pure in-memory operations in
//! `store`. A load replaces the store only after the file parses fully, so
//! the store is never left empty by a failed load.

mod error;
mod file;
mod store;

pub use error::ConfigError;
pub use store::FieldConfig;
