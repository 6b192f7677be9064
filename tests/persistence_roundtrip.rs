//! End-to-end persistence tests against a real file-backed slot.

use cafevibe::models::{Cafe, FlavorProfile, SpaceFeatures};
use cafevibe::store::{CafeStore, FileSlot, StorageSlot};

fn file_store(dir: &tempfile::TempDir) -> CafeStore {
    let slot = FileSlot::new(dir.path().join("cafe_vibe_records.json"), None);
    CafeStore::new(Box::new(slot))
}

fn full_record(now_ms: i64) -> Cafe {
    Cafe {
        id: format!("custom-{now_ms}"),
        google_place_id: None,
        name: "測試咖啡".to_string(),
        address: "台北市某區某路1號".to_string(),
        lat: 25.0123,
        lng: 121.5456,
        item_note: "手沖耶加雪菲 $220，肉桂捲 $120".to_string(),
        flavor: FlavorProfile {
            acidity: 4.5,
            bitterness: 1.5,
            roast: 2.0,
            sweetness: 3.5,
        },
        features: SpaceFeatures {
            has_socket: true,
            unlimited_time: false,
            work_friendly: true,
            has_cat: true,
            industrial_style: false,
        },
        photo_url: Some("data:image/jpeg;base64,AAEC".to_string()),
        rating: Some(4.5),
        created_at: now_ms,
        is_custom: true,
    }
}

#[tokio::test]
async fn inserted_record_reloads_field_for_field() {
    let dir = tempfile::tempdir().unwrap();
    let inserted = full_record(30_000_000);

    {
        let mut store = file_store(&dir);
        store.load(20_000_000).await;
        store.insert(inserted.clone()).await.unwrap();
    }

    // Fresh store over the same slot, as a new session would open
    let mut reopened = file_store(&dir);
    reopened.load(40_000_000).await;

    assert_eq!(reopened.len(), 6);
    let reloaded = reopened.get(&inserted.id).expect("record must survive reload");
    assert_eq!(reloaded, &inserted);
}

#[tokio::test]
async fn reopened_store_does_not_reseed() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = file_store(&dir);
        store.load(20_000_000).await;
        store.delete("real-1").await.unwrap();
        store.delete("real-2").await.unwrap();
    }

    let mut reopened = file_store(&dir);
    reopened.load(99_000_000).await;
    assert_eq!(reopened.len(), 3);
    assert!(reopened.get("real-1").is_none());
}

#[tokio::test]
async fn malformed_slot_file_falls_back_to_seed_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cafe_vibe_records.json");
    tokio::fs::write(&path, "{{ not json at all").await.unwrap();

    let mut store = CafeStore::new(Box::new(FileSlot::new(&path, None)));
    store.load(20_000_000).await;

    assert_eq!(store.len(), 5);
    assert_eq!(store.sidebar("")[0].name, "Ruins Coffee Roasters");
}

#[tokio::test]
async fn persisted_blob_is_a_camel_case_record_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cafe_vibe_records.json");

    let mut store = CafeStore::new(Box::new(FileSlot::new(&path, None)));
    store.load(20_000_000).await;
    store.insert(full_record(30_000_000)).await.unwrap();

    let slot = FileSlot::new(&path, None);
    let payload = slot.read().await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();

    let records = value.as_array().expect("slot holds a JSON array");
    assert_eq!(records.len(), 6);
    assert_eq!(records[0]["itemNote"], "手沖耶加雪菲 $220，肉桂捲 $120");
    assert_eq!(records[0]["isCustom"], true);
    assert_eq!(records[0]["features"]["hasSocket"], true);
    // Seed records carry no photo; the field must be omitted, not null
    assert!(records[1].get("photoUrl").is_none());
}
