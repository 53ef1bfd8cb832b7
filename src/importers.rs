// ! Importers for keyword insight CSV exports

pub mod csv_importer;

pub use csv_importer::{CsvImportError, CsvImporter, SourceRow};
