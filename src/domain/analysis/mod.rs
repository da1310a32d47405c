//! Analysis data - the shapes the store persists and how they map to keys.
//!
//! ## Layouts
//!
//! - `single_document` - [`AnalysisSummary`] under `analysisData.json`
//! - `per_field` - [`AnalysisDocuments`] under `sentimentAnalysis.json`
//!   and `tickerAnalysis.json`
//!
//! The key set of a layout is fixed; the store never lists or discovers keys.

mod documents;
mod errors;
mod layout;
mod summary;

pub use documents::{AnalysisDocuments, AnalysisField};
pub use errors::AnalysisStoreError;
pub use layout::{
    LayoutKind, PerFieldDocuments, SingleDocument, StorageLayout, StoredObject,
    ANALYSIS_DATA_KEY, JSON_CONTENT_TYPE,
};
pub use summary::AnalysisSummary;
