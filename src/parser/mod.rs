pub mod manifest;

pub use manifest::{parse_entries, ParseError, FILE_TAG};
