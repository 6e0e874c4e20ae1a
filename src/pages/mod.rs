pub mod analyzer;
pub mod settings;
