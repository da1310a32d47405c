//! Invocation events delivered by the managed API layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field name of the query resolver.
pub const GET_ANALYSIS_DATA: &str = "getAnalysisData";

/// Field name of the mutation resolver.
pub const UPDATE_ANALYSIS_DATA: &str = "updateAnalysisData";

/// Event shape: `{ info: { fieldName }, arguments: { analysisData } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationEvent {
    pub info: InvocationInfo,

    #[serde(default)]
    pub arguments: InvocationArguments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationInfo {
    pub field_name: String,
}

/// Resolver arguments. The payload stays untyped until the operation and
/// layout are known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationArguments {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_data: Option<Value>,
}

impl InvocationEvent {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            info: InvocationInfo {
                field_name: field_name.into(),
            },
            arguments: InvocationArguments::default(),
        }
    }

    pub fn with_analysis_data(mut self, analysis_data: Value) -> Self {
        self.arguments.analysis_data = Some(analysis_data);
        self
    }

    pub fn operation(&self) -> Operation {
        Operation::from_field_name(&self.info.field_name)
    }
}

/// Operation requested by an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    GetAnalysisData,
    UpdateAnalysisData,
    /// Anything else. Answered with "no such operation", never an error.
    Unknown(String),
}

impl Operation {
    pub fn from_field_name(field_name: &str) -> Self {
        match field_name {
            GET_ANALYSIS_DATA => Operation::GetAnalysisData,
            UPDATE_ANALYSIS_DATA => Operation::UpdateAnalysisData,
            other => Operation::Unknown(other.to_string()),
        }
    }

    pub fn field_name(&self) -> &str {
        match self {
            Operation::GetAnalysisData => GET_ANALYSIS_DATA,
            Operation::UpdateAnalysisData => UPDATE_ANALYSIS_DATA,
            Operation::Unknown(name) => name,
        }
    }
}

/// Result of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationOutcome<T> {
    Data(T),
    NoSuchOperation,
}

impl<T> InvocationOutcome<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            InvocationOutcome::Data(data) => Some(data),
            InvocationOutcome::NoSuchOperation => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            InvocationOutcome::Data(data) => Some(data),
            InvocationOutcome::NoSuchOperation => None,
        }
    }
}

/// `Data(x)` serializes as `x`, `NoSuchOperation` as `null`.
impl<T: Serialize> Serialize for InvocationOutcome<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            InvocationOutcome::Data(data) => data.serialize(serializer),
            InvocationOutcome::NoSuchOperation => serializer.serialize_none(),
        }
    }
}
