//! Storage layouts - how analysis data maps onto object keys.
//!
//! Two incompatible layouts exist for the same store:
//!
//! - [`SingleDocument`] - the whole [`AnalysisSummary`] as one JSON object
//!   under `analysisData.json`.
//! - [`PerFieldDocuments`] - each field of [`AnalysisDocuments`] stored
//!   verbatim under `{fieldName}.json`.
//!
//! A deployment picks exactly one through [`LayoutKind`]. The layouts are
//! pure encoders: they never touch storage, the store drives the I/O.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::documents::{AnalysisDocuments, AnalysisField};
use super::errors::AnalysisStoreError;
use super::summary::AnalysisSummary;

/// Content type attached to every write, JSON or not.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Key of the single-document layout.
pub const ANALYSIS_DATA_KEY: &str = "analysisData.json";

/// Deployment-time layout selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    #[default]
    SingleDocument,
    PerField,
}

impl LayoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::SingleDocument => "single_document",
            LayoutKind::PerField => "per_field",
        }
    }

    /// Fixed key set of the layout.
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            LayoutKind::SingleDocument => SingleDocument::KEYS,
            LayoutKind::PerField => PerFieldDocuments::KEYS,
        }
    }
}

impl std::fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One object body bound to its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: &'static str,
    pub body: Vec<u8>,
}

impl StoredObject {
    pub fn new(key: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            key,
            body: body.into(),
        }
    }
}

/// Key mapping and serialization contract of one layout.
///
/// # Contract
///
/// - `KEYS` is the complete, ordered key set; nothing else is ever read
///   or written.
/// - `encode` returns one object per key, in `KEYS` order.
/// - `decode` receives the objects read in `KEYS` order.
pub trait StorageLayout: Send + Sync + 'static {
    type Data: Serialize + DeserializeOwned + Clone + Debug + PartialEq + Send + Sync;

    const KIND: LayoutKind;

    const KEYS: &'static [&'static str];

    fn encode(data: &Self::Data) -> Result<Vec<StoredObject>, AnalysisStoreError>;

    fn decode(objects: Vec<StoredObject>) -> Result<Self::Data, AnalysisStoreError>;
}

/// Whole summary as one JSON document.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleDocument;

impl StorageLayout for SingleDocument {
    type Data = AnalysisSummary;

    const KIND: LayoutKind = LayoutKind::SingleDocument;

    const KEYS: &'static [&'static str] = &[ANALYSIS_DATA_KEY];

    fn encode(data: &AnalysisSummary) -> Result<Vec<StoredObject>, AnalysisStoreError> {
        let body = serde_json::to_vec(data)?;
        Ok(vec![StoredObject::new(ANALYSIS_DATA_KEY, body)])
    }

    fn decode(objects: Vec<StoredObject>) -> Result<AnalysisSummary, AnalysisStoreError> {
        let Some(object) = objects.into_iter().find(|o| o.key == ANALYSIS_DATA_KEY) else {
            return Ok(AnalysisSummary::default());
        };

        // An object with no content reads back as `{}`.
        if object.body.is_empty() {
            return Ok(AnalysisSummary::default());
        }

        serde_json::from_slice(&object.body)
            .map_err(|e| AnalysisStoreError::malformed(ANALYSIS_DATA_KEY, e))
    }
}

/// One opaque string document per field.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerFieldDocuments;

impl StorageLayout for PerFieldDocuments {
    type Data = AnalysisDocuments;

    const KIND: LayoutKind = LayoutKind::PerField;

    const KEYS: &'static [&'static str] = &[
        AnalysisField::SentimentAnalysis.key(),
        AnalysisField::TickerAnalysis.key(),
    ];

    fn encode(data: &AnalysisDocuments) -> Result<Vec<StoredObject>, AnalysisStoreError> {
        Ok(AnalysisField::ALL
            .into_iter()
            .map(|field| StoredObject::new(field.key(), data.field(field).as_bytes()))
            .collect())
    }

    fn decode(objects: Vec<StoredObject>) -> Result<AnalysisDocuments, AnalysisStoreError> {
        let mut documents = AnalysisDocuments::default();
        for object in objects {
            if let Some(field) = AnalysisField::from_key(object.key) {
                let text = String::from_utf8_lossy(&object.body).into_owned();
                documents.set_field(field, text);
            }
        }
        Ok(documents)
    }
}
