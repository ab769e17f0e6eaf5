//! Configuration model for nsprep.
//!
//! An optional `nsprep.yaml` at the project root overrides the conventional
//! template/output paths, the header, and the branch table. Unknown fields are
//! ignored and every field has a default, so an empty file is valid.

mod model;
mod operations;


pub use model::{CONFIG_FILE_NAME, Config};
