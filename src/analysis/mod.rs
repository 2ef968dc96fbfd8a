//! Data and text analysis backing the `data_analysis_*` and
//! `document_processing_*` tools.

pub mod dataset;
pub mod stats;
pub mod text;

pub use dataset::SampleDataset;
pub use text::TextAnalyzer;
