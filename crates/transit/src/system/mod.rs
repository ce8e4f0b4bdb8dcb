//! The [`SystemObjects`] database and its operations.

mod arena;
pub mod objects;
pub mod paths;
pub mod services;

pub use objects::SystemObjects;
