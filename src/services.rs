pub mod insight_import_service;

pub use insight_import_service::{
    FileImport, FileOutcome, ImportError, ImportSummary, InsightImportService,
};
