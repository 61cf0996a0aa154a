//! Configuration loading and schema definitions
//!
//! Shared configuration types used by the catalog client and the front-end.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
