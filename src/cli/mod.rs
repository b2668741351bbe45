pub mod report;
pub mod validate;

pub use report::{print_report, write_report};
