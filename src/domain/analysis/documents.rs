//! Per-field analysis documents.
//!
//! Each field is an opaque, already-serialized analysis payload stored as its
//! own object. The store never parses them.

use serde::{Deserialize, Serialize};

/// One of the fixed per-field documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisField {
    SentimentAnalysis,
    TickerAnalysis,
}

impl AnalysisField {
    /// Enumeration order used for every read and write.
    pub const ALL: [AnalysisField; 2] = [AnalysisField::SentimentAnalysis, AnalysisField::TickerAnalysis];

    /// Field name as it appears in the API payload.
    pub const fn name(&self) -> &'static str {
        match self {
            AnalysisField::SentimentAnalysis => "sentimentAnalysis",
            AnalysisField::TickerAnalysis => "tickerAnalysis",
        }
    }

    /// Object key the field is stored under.
    pub const fn key(&self) -> &'static str {
        match self {
            AnalysisField::SentimentAnalysis => "sentimentAnalysis.json",
            AnalysisField::TickerAnalysis => "tickerAnalysis.json",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl std::fmt::Display for AnalysisField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Composite of the per-field analysis payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDocuments {
    pub ticker_analysis: String,
    pub sentiment_analysis: String,
}

impl AnalysisDocuments {
    pub fn new(ticker_analysis: impl Into<String>, sentiment_analysis: impl Into<String>) -> Self {
        Self {
            ticker_analysis: ticker_analysis.into(),
            sentiment_analysis: sentiment_analysis.into(),
        }
    }

    pub fn field(&self, field: AnalysisField) -> &str {
        match field {
            AnalysisField::SentimentAnalysis => &self.sentiment_analysis,
            AnalysisField::TickerAnalysis => &self.ticker_analysis,
        }
    }

    pub fn set_field(&mut self, field: AnalysisField, value: String) {
        match field {
            AnalysisField::SentimentAnalysis => self.sentiment_analysis = value,
            AnalysisField::TickerAnalysis => self.ticker_analysis = value,
        }
    }
}
