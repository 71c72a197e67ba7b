//! JSON persistence: one array file per collection, mirroring the original
//! dashboard's one-array-per-storage-key layout.

pub mod json_backend;

pub use json_backend::JsonStore;

use crate::errors::CaixaError;

pub type Result<T> = std::result::Result<T, CaixaError>;
