//! Round-trip persistence behavior of the vector store.

use passage_text_chunker::Document;
use passage_vector_store::{
    fingerprint, SearchRequest, StoreConfig, VectorStore, VectorStoreError,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn store_with_dimension(dimension: usize) -> VectorStore {
    VectorStore::new(StoreConfig {
        dimension,
        max_chunk_size: 100,
        overlap_size: 20,
    })
    .expect("valid config")
}

fn seeded_store() -> VectorStore {
    let store = store_with_dimension(32);
    store
        .add(vec![
            fingerprint::with_fingerprint(
                Document::new("d1", "人工智能是计算机科学的重要分支。").with_metadata("lang", "zh"),
            ),
            fingerprint::with_fingerprint(Document::new(
                "d2",
                "Machine learning studies algorithms that improve with data.",
            )),
        ])
        .expect("add documents");
    store
}

#[tokio::test]
async fn save_then_load_round_trips_entries() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.json");

    let original = seeded_store();
    original.save(&path).await.expect("save");

    let restored = store_with_dimension(32);
    restored.load(&path).await.expect("load");

    assert_eq!(restored.len(), original.len());
    for id in ["d1_chunk_0", "d2_chunk_0"] {
        let before = original.get(id).expect("entry in original");
        let after = restored.get(id).expect("entry in restored");
        assert_eq!(before, after);
    }

    // The restored store answers searches like the original.
    let request = SearchRequest::new("人工智能").with_top_k(5);
    let before = original.search(&request).expect("search original");
    let after = restored.search(&request).expect("search restored");
    assert_eq!(before.len(), after.len());
    assert_eq!(before[0].entry.id, after[0].entry.id);
}

#[tokio::test]
async fn save_overwrites_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.json");

    let store = seeded_store();
    store.save(&path).await.expect("first save");

    store.delete(&["d2_chunk_0".to_string()]);
    store.save(&path).await.expect("second save");

    let restored = store_with_dimension(32);
    restored.load(&path).await.expect("load");
    assert_eq!(restored.len(), 1);
    assert!(restored.get("d2_chunk_0").is_none());
}

#[tokio::test]
async fn load_replaces_state_wholesale() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.json");

    seeded_store().save(&path).await.expect("save");

    let target = store_with_dimension(32);
    target
        .add(vec![Document::new("stale", "加载后应当消失的内容。")])
        .expect("add");
    assert!(target.contains("stale_chunk_0"));

    target.load(&path).await.expect("load");

    assert!(!target.contains("stale_chunk_0"));
    assert!(target.contains("d1_chunk_0"));
}

#[tokio::test]
async fn load_missing_file_propagates_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("does_not_exist.json");

    let store = store_with_dimension(32);
    let err = store.load(&path).await.unwrap_err();
    assert!(matches!(err, VectorStoreError::IoError(_)));
}

#[tokio::test]
async fn load_malformed_json_is_fatal_and_leaves_store_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    let store = seeded_store();
    let before = store.len();

    let err = store.load(&path).await.unwrap_err();
    assert!(matches!(err, VectorStoreError::SerializationError(_)));
    assert_eq!(store.len(), before);
}

#[tokio::test]
async fn load_rejects_mismatched_dimension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.json");

    seeded_store().save(&path).await.expect("save");

    let narrow = store_with_dimension(16);
    let err = narrow.load(&path).await.unwrap_err();
    assert!(matches!(
        err,
        VectorStoreError::InvalidDimension {
            expected: 16,
            actual: 32
        }
    ));
    assert!(narrow.is_empty());
}

#[tokio::test]
async fn persisted_format_is_an_id_keyed_object() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.json");

    seeded_store().save(&path).await.expect("save");

    let raw = tokio::fs::read_to_string(&path).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let object = value.as_object().expect("top-level object");

    let entry = object.get("d1_chunk_0").expect("entry keyed by id");
    assert_eq!(entry.get("id"), Some(&serde_json::Value::from("d1_chunk_0")));
    assert!(entry.get("text").is_some());
    assert!(entry.get("metadata").is_some());
    assert_eq!(
        entry
            .get("vector")
            .and_then(serde_json::Value::as_array)
            .map(Vec::len),
        Some(32)
    );
}
