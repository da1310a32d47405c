//! Single-document analysis summary.
//!
//! The whole summary lives in one JSON document under `analysisData.json`.
//! Reads and writes perform no schema validation: the document is kept
//! exactly as parsed, explicit nulls and unexpected types included. The
//! typed accessors only interpret it.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Aggregate sentiment snapshot produced by the scraper.
///
/// Usually an object of the form
/// `{sentiment, topMention, totalComments, totalPosts, totalSubreddits, timestamp}`,
/// but any JSON document is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisSummary(Value);

impl Default for AnalysisSummary {
    /// The empty object, `{}`.
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl AnalysisSummary {
    /// Creates a fully populated summary.
    pub fn new(
        sentiment: impl Into<String>,
        top_mention: impl Into<String>,
        total_comments: u64,
        total_posts: u64,
        total_subreddits: u64,
        timestamp: impl Into<String>,
    ) -> Self {
        Self(json!({
            "sentiment": sentiment.into(),
            "topMention": top_mention.into(),
            "totalComments": total_comments,
            "totalPosts": total_posts,
            "totalSubreddits": total_subreddits,
            "timestamp": timestamp.into(),
        }))
    }

    /// Raw value of a top-level field, `None` when absent or not an object.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn sentiment(&self) -> Option<&str> {
        self.get("sentiment").and_then(Value::as_str)
    }

    pub fn top_mention(&self) -> Option<&str> {
        self.get("topMention").and_then(Value::as_str)
    }

    pub fn total_comments(&self) -> Option<u64> {
        self.count("totalComments")
    }

    pub fn total_posts(&self) -> Option<u64> {
        self.count("totalPosts")
    }

    pub fn total_subreddits(&self) -> Option<u64> {
        self.count("totalSubreddits")
    }

    /// Caller-supplied, never parsed.
    pub fn timestamp(&self) -> Option<&str> {
        self.get("timestamp").and_then(Value::as_str)
    }

    /// A count stored as an integer or as an integral float (`120.0`).
    fn count(&self, field: &str) -> Option<u64> {
        let value = self.get(field)?;
        value.as_u64().or_else(|| {
            value
                .as_f64()
                .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= u64::MAX as f64)
                .map(|n| n as u64)
        })
    }

    /// True for the empty object `{}`.
    pub fn is_empty(&self) -> bool {
        self.0.as_object().is_some_and(Map::is_empty)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for AnalysisSummary {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<AnalysisSummary> for Value {
    fn from(summary: AnalysisSummary) -> Self {
        summary.0
    }
}
