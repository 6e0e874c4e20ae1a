pub mod analysis;
pub mod report;
pub mod settings;
