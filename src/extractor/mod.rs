pub mod author;
pub mod diagnostics;
pub mod html;
pub mod metrics;
pub mod pipeline;

pub use author::{AuthorRecord, PublicationRecord};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use pipeline::{process_document, AuthorPipeline, DocumentOutcome, PipelineOutput, PipelineProgress};
