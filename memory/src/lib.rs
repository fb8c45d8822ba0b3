//! Storage core for the memento journal: a flat CSV index of memories plus a
//! directory of image files, combined behind [`service::MemoryService`].

pub mod config;
pub mod error;
pub mod factory;
pub mod index;
pub mod media;
pub mod service;
pub mod types;
pub mod upload;

pub use error::Result;
pub use error::StoreError;
