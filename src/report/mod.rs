pub mod extraction_report;
pub mod writer;

pub use extraction_report::ExtractionReport;
pub use writer::ReportWriter;
