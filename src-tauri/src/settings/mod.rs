//! User settings: credential, model registry, display toggles.

pub mod registry;
pub mod store;
pub mod types;

pub use registry::ModelRegistry;
pub use types::{ModelConfig, PersistedSettings, Settings};
