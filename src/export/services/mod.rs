//! Export services.

mod exporter;

pub use exporter::{
    ExportFailure, ExportFailureKind, ExportServiceError, ExportServiceResult,
    TemplateExportService,
};
