//! Core types and configuration for convoy.
//!
//! This crate provides the container registry, compose-file parsing,
//! settings, and error types shared across the convoy workspace.

mod compose;
mod config;
mod error;
mod registry;

pub use compose::load_container_names;
pub use config::Settings;
pub use error::{Error, Result};
pub use registry::{Container, ContainerRegistry, LogColor};
