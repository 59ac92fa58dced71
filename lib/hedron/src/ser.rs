//! Serialization of meshes to various storage formats.

#[cfg(feature = "ser_obj")]
pub mod obj;
