pub mod export;
pub mod generator;

pub use export::{default_export_dir, report_filename, write_report_atomic};
pub use generator::generate_report;
