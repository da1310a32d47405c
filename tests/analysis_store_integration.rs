//! Integration tests for the analysis data store.
//!
//! These tests verify, against in-memory object storage:
//! 1. update-then-get round trips for both layouts
//! 2. The documented missing-key and empty-object policies
//! 3. The per-field layout's cross-invocation race is real
//! 4. Unknown operations never touch storage

use async_trait::async_trait;
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex, Notify};

use analysis_store::adapters::storage::InMemoryObjectStorage;
use analysis_store::application::handlers::analysis::{
    AnalysisDataStore, InvocationDispatcher, InvocationEvent, InvocationOutcome,
    GET_ANALYSIS_DATA, UPDATE_ANALYSIS_DATA,
};
use analysis_store::domain::analysis::{
    AnalysisDocuments, AnalysisSummary, PerFieldDocuments, SingleDocument, ANALYSIS_DATA_KEY,
    JSON_CONTENT_TYPE,
};
use analysis_store::ports::{ObjectStorage, ObjectStorageError};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

/// Storage that holds one specific write until the test releases it.
struct GatedStorage {
    inner: InMemoryObjectStorage,
    gated_key: &'static str,
    gated_body: Vec<u8>,
    reached: Notify,
    release: Mutex<Option<oneshot::Receiver<()>>>,
}

impl GatedStorage {
    fn new(
        inner: InMemoryObjectStorage,
        gated_key: &'static str,
        gated_body: &str,
    ) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let storage = Self {
            inner,
            gated_key,
            gated_body: gated_body.as_bytes().to_vec(),
            reached: Notify::new(),
            release: Mutex::new(Some(rx)),
        };
        (storage, tx)
    }
}

#[async_trait]
impl ObjectStorage for GatedStorage {
    fn bucket(&self) -> &str {
        self.inner.bucket()
    }

    async fn get_object(&self, key: &str) -> Result<Vec<u8>, ObjectStorageError> {
        self.inner.get_object(key).await
    }

    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ObjectStorageError> {
        if key == self.gated_key && body == self.gated_body {
            self.reached.notify_one();
            let release = self.release.lock().await.take();
            if let Some(rx) = release {
                let _ = rx.await;
            }
        }
        self.inner.put_object(key, body, content_type).await
    }
}

fn optional_field() -> impl Strategy<Value = Option<Value>> {
    proptest::option::of(prop_oneof![
        Just(Value::Null),
        "\\PC{0,24}".prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        (0u32..1_000_000).prop_map(|n| Value::from(f64::from(n) + 0.5)),
    ])
}

fn summary_strategy() -> impl Strategy<Value = AnalysisSummary> {
    (
        optional_field(),
        optional_field(),
        optional_field(),
        optional_field(),
        optional_field(),
        optional_field(),
    )
        .prop_map(|fields| {
            let (sentiment, top_mention, total_comments, total_posts, total_subreddits, timestamp) =
                fields;
            let document: Map<String, Value> = [
                ("sentiment", sentiment),
                ("topMention", top_mention),
                ("totalComments", total_comments),
                ("totalPosts", total_posts),
                ("totalSubreddits", total_subreddits),
                ("timestamp", timestamp),
            ]
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| (name.to_string(), value)))
            .collect();
            AnalysisSummary::from(Value::Object(document))
        })
}

// =============================================================================
// Round-trip laws
// =============================================================================

proptest! {
    #[test]
    fn prop_single_document_update_then_get_is_identity(summary in summary_strategy()) {
        let loaded = runtime().block_on(async {
            let store = AnalysisDataStore::<SingleDocument>::new(
                Arc::new(InMemoryObjectStorage::new("test-bucket")),
            );
            let returned = store.update(summary.clone()).await.unwrap();
            assert_eq!(returned, summary);
            store.get().await.unwrap()
        });

        prop_assert_eq!(loaded, summary);
    }

    #[test]
    fn prop_per_field_update_then_get_returns_same_strings(
        ticker in any::<String>(),
        sentiment in any::<String>(),
    ) {
        let docs = AnalysisDocuments::new(ticker, sentiment);
        let loaded = runtime().block_on(async {
            let store = AnalysisDataStore::<PerFieldDocuments>::new(
                Arc::new(InMemoryObjectStorage::new("test-bucket")),
            );
            store.update(docs.clone()).await.unwrap();
            store.get().await.unwrap()
        });

        prop_assert_eq!(loaded, docs);
    }
}

#[tokio::test]
async fn gme_example_round_trips_through_events() {
    let storage = InMemoryObjectStorage::new("reddit-finance-analysis-data");
    let dispatcher = InvocationDispatcher::<SingleDocument>::from_storage(Arc::new(storage.clone()));
    let payload = json!({
        "sentiment": "bullish",
        "topMention": "GME",
        "totalComments": 120,
        "totalPosts": 8,
        "totalSubreddits": 3,
        "timestamp": "2021-02-01T00:00:00Z"
    });

    dispatcher
        .dispatch(InvocationEvent::new(UPDATE_ANALYSIS_DATA).with_analysis_data(payload.clone()))
        .await
        .unwrap();
    let outcome = dispatcher
        .dispatch(InvocationEvent::new(GET_ANALYSIS_DATA))
        .await
        .unwrap();

    assert_eq!(serde_json::to_value(&outcome).unwrap(), payload);
    let stored = storage.object(ANALYSIS_DATA_KEY).await.unwrap();
    assert_eq!(stored.content_type, JSON_CONTENT_TYPE);
}

// =============================================================================
// Fresh-store policy
// =============================================================================

#[tokio::test]
async fn fresh_store_get_fails_with_not_found_for_both_layouts() {
    let single = AnalysisDataStore::<SingleDocument>::new(Arc::new(InMemoryObjectStorage::new("b-one")));
    let per_field =
        AnalysisDataStore::<PerFieldDocuments>::new(Arc::new(InMemoryObjectStorage::new("b-two")));

    assert!(single.get().await.unwrap_err().is_not_found());
    assert!(per_field.get().await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn existing_empty_document_reads_as_empty_object() {
    let storage = InMemoryObjectStorage::new("test-bucket");
    storage.insert(ANALYSIS_DATA_KEY, Vec::new(), JSON_CONTENT_TYPE).await;
    let dispatcher = InvocationDispatcher::<SingleDocument>::from_storage(Arc::new(storage));

    let outcome = dispatcher
        .dispatch(InvocationEvent::new(GET_ANALYSIS_DATA))
        .await
        .unwrap();

    assert_eq!(serde_json::to_value(&outcome).unwrap(), json!({}));
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn per_field_concurrent_updates_can_mix_fields() {
    let first = AnalysisDocuments::new("ticker-1", "sentiment-1");
    let second = AnalysisDocuments::new("ticker-2", "sentiment-2");

    let inner = InMemoryObjectStorage::new("test-bucket");
    let (gated, release) = GatedStorage::new(inner, "tickerAnalysis.json", "ticker-1");
    let gated = Arc::new(gated);
    let store = AnalysisDataStore::<PerFieldDocuments>::new(gated.clone());

    // First update writes its sentiment, then stalls before its ticker write
    let first_update = {
        let store = store.clone();
        let first = first.clone();
        tokio::spawn(async move { store.update(first).await })
    };
    gated.reached.notified().await;

    // Second update runs to completion in between
    store.update(second.clone()).await.unwrap();

    release.send(()).unwrap();
    first_update.await.unwrap().unwrap();

    let merged = store.get().await.unwrap();
    assert_eq!(merged.sentiment_analysis, "sentiment-2");
    assert_eq!(merged.ticker_analysis, "ticker-1");
    assert_ne!(merged, first);
    assert_ne!(merged, second);
}

#[tokio::test]
async fn single_document_concurrent_updates_leave_one_whole_document() {
    let storage = InMemoryObjectStorage::new("test-bucket");
    let store = AnalysisDataStore::<SingleDocument>::new(Arc::new(storage));
    let first = AnalysisSummary::new("bullish", "GME", 1, 1, 1, "t1");
    let second = AnalysisSummary::new("bearish", "AMC", 2, 2, 2, "t2");

    let (a, b) = tokio::join!(store.update(first.clone()), store.update(second.clone()));
    a.unwrap();
    b.unwrap();

    let loaded = store.get().await.unwrap();
    assert!(loaded == first || loaded == second);
}

// =============================================================================
// Unknown operations
// =============================================================================

#[tokio::test]
async fn unknown_operation_issues_zero_storage_calls_for_either_layout() {
    let storage = InMemoryObjectStorage::new("test-bucket");
    let single = InvocationDispatcher::<SingleDocument>::from_storage(Arc::new(storage.clone()));
    let per_field = InvocationDispatcher::<PerFieldDocuments>::from_storage(Arc::new(storage.clone()));

    let a = single.dispatch(InvocationEvent::new("deleteAnalysisData")).await.unwrap();
    let b = per_field.dispatch(InvocationEvent::new("")).await.unwrap();

    assert_eq!(a, InvocationOutcome::NoSuchOperation);
    assert_eq!(b, InvocationOutcome::NoSuchOperation);
    assert_eq!(storage.read_count() + storage.write_count(), 0);
}
