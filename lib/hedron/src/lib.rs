#![doc = include_str!("../README.md")]
#![cfg_attr(not(debug_assertions), warn(missing_docs))]

#[cfg(feature = "serialize")]
pub mod ser;

mod data;
pub use data::*;

mod error;
pub use error::*;
