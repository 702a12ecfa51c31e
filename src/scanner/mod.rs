pub mod input_filter;
pub mod source_scanner;
pub mod source_set;

pub use input_filter::InputFilter;
pub use source_scanner::{ScanOutcome, SourceScanner};
pub use source_set::{Source, SourceSet};
