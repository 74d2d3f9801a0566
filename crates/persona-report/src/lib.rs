//! Rendering, persistence and end-to-end orchestration of persona reports.

pub mod error;
pub mod pipeline;
pub mod render;
pub mod writer;

pub use error::ReportError;
pub use pipeline::{generate_persona, PersonaReport, PipelineContext};
pub use render::{persona_fields, render_document, DEFAULT_TEMPLATE};
pub use writer::{report_file_name, write_report, DEFAULT_STYLESHEET};
