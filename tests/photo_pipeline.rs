//! Photo pipeline tests: file in, bounded embeddable data URL out, and the
//! attach flow against a persisted record.

use std::io::Cursor;

use image::RgbImage;

use cafevibe::images::{decode_photo_data_url, PhotoNormalizer};
use cafevibe::models::Cafe;
use cafevibe::store::{CafeStore, FileSlot};

async fn write_png(dir: &tempfile::TempDir, name: &str, width: u32, height: u32) -> std::path::PathBuf {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 90])
    });
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("failed to encode PNG fixture");
    let path = dir.path().join(name);
    tokio::fs::write(&path, &bytes).await.unwrap();
    path
}

#[tokio::test]
async fn oversized_file_normalizes_to_the_long_edge_bound() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(&dir, "wide.png", 3000, 1500).await;

    let data_url = PhotoNormalizer::default().normalize_file(&path).await.unwrap();
    let decoded = decode_photo_data_url(&data_url).unwrap();

    assert_eq!((decoded.width(), decoded.height()), (800, 400));
}

#[tokio::test]
async fn odd_aspect_ratios_stay_within_rounding_of_the_original() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(&dir, "odd.png", 1023, 767).await;

    let data_url = PhotoNormalizer::default().normalize_file(&path).await.unwrap();
    let decoded = decode_photo_data_url(&data_url).unwrap();

    assert!(decoded.width().max(decoded.height()) <= 800);
    let original = 1023.0 / 767.0;
    let scaled = f64::from(decoded.width()) / f64::from(decoded.height());
    assert!((original - scaled).abs() < 0.01);
}

#[tokio::test]
async fn normalized_photo_survives_a_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(&dir, "shot.png", 1600, 1200).await;
    let data_url = PhotoNormalizer::default().normalize_file(&path).await.unwrap();

    let slot_path = dir.path().join("records.json");
    {
        let mut store = CafeStore::new(Box::new(FileSlot::new(&slot_path, None)));
        store.load(20_000_000).await;
        let mut cafe = Cafe::new_custom(25.0, 121.5, 30_000_000);
        cafe.photo_url = Some(data_url.clone());
        store.insert(cafe).await.unwrap();
    }

    let mut reopened = CafeStore::new(Box::new(FileSlot::new(&slot_path, None)));
    reopened.load(40_000_000).await;
    let stored = reopened.get("custom-30000000").unwrap();

    // Still decodable straight out of the slot, no external fetch involved
    let decoded = decode_photo_data_url(stored.photo_url.as_deref().unwrap()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (800, 600));
}

#[tokio::test]
async fn embedded_photos_count_against_the_slot_quota() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(&dir, "big.png", 2000, 2000).await;
    let data_url = PhotoNormalizer::default().normalize_file(&path).await.unwrap();

    // Quota large enough for the bare seed set, not for the photo
    let slot_path = dir.path().join("records.json");
    let mut store = CafeStore::new(Box::new(FileSlot::new(&slot_path, Some(8 * 1024))));
    store.load(20_000_000).await;
    store.flush().await.expect("seed set fits the quota");

    let mut cafe = Cafe::new_custom(25.0, 121.5, 30_000_000);
    cafe.photo_url = Some(data_url);
    let err = store.insert(cafe).await.unwrap_err();
    assert!(matches!(
        err,
        cafevibe::errors::StoreError::QuotaExceeded { .. }
    ));
    // The record itself stays in memory for the user to retry or prune
    assert_eq!(store.len(), 6);
}
