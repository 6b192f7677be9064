//! Built-in sample records
//!
//! Seeds the store on first run and after an unparseable slot payload, so the
//! map never opens onto an empty catalogue.

use super::{Cafe, FlavorProfile, SpaceFeatures};

/// The fixed five-record sample set, with `created_at` spread over the
/// hours before `now_ms` so the sidebar has a stable newest-first order
/// (`real-5` first).
pub fn seed_cafes(now_ms: i64) -> Vec<Cafe> {
    vec![
        Cafe {
            id: "real-1".to_string(),
            google_place_id: None,
            name: "Simple Kaffa 興波咖啡".to_string(),
            address: "台北市中正區忠孝東路二段27號".to_string(),
            lat: 25.0442,
            lng: 121.5294,
            item_note: "皺皺蛋糕 $160, 創意咖啡 $250。世界冠軍咖啡，空間非常大氣，人潮眾多。"
                .to_string(),
            flavor: FlavorProfile {
                acidity: 4.5,
                bitterness: 2.0,
                roast: 2.0,
                sweetness: 4.0,
            },
            features: SpaceFeatures {
                industrial_style: true,
                ..SpaceFeatures::default()
            },
            photo_url: None,
            rating: None,
            created_at: now_ms - 10_000_000,
            is_custom: true,
        },
        Cafe {
            id: "real-2".to_string(),
            google_place_id: None,
            name: "Fika Fika Cafe".to_string(),
            address: "台北市中山區伊通街33號".to_string(),
            lat: 25.0513,
            lng: 121.5345,
            item_note: "拿鐵 $180, 檸檬塔 $150。北歐烘焙風格，明亮舒適，適合早晨。".to_string(),
            flavor: FlavorProfile {
                acidity: 4.0,
                bitterness: 1.5,
                roast: 1.5,
                sweetness: 3.5,
            },
            features: SpaceFeatures {
                has_socket: true,
                work_friendly: true,
                ..SpaceFeatures::default()
            },
            photo_url: None,
            rating: None,
            created_at: now_ms - 8_000_000,
            is_custom: true,
        },
        Cafe {
            id: "real-3".to_string(),
            google_place_id: None,
            name: "Coffee Stopover".to_string(),
            address: "台中市西區民權路217巷24號".to_string(),
            lat: 24.1458,
            lng: 120.6697,
            item_note: "氣泡咖啡 $160。可以選焙度與萃取方式，非常專業的台中名店。".to_string(),
            flavor: FlavorProfile {
                acidity: 5.0,
                bitterness: 2.0,
                roast: 2.0,
                sweetness: 4.0,
            },
            features: SpaceFeatures {
                unlimited_time: true,
                industrial_style: true,
                ..SpaceFeatures::default()
            },
            photo_url: None,
            rating: None,
            created_at: now_ms - 6_000_000,
            is_custom: true,
        },
        Cafe {
            id: "real-4".to_string(),
            google_place_id: None,
            name: "Paripari apt.".to_string(),
            address: "台南市中西區忠義路二段158巷9號".to_string(),
            lat: 22.9965,
            lng: 120.2030,
            item_note: "老宅改建，風格非常復古。二樓是咖啡廳，三樓是民宿。".to_string(),
            flavor: FlavorProfile {
                acidity: 2.0,
                bitterness: 4.0,
                roast: 4.0,
                sweetness: 3.0,
            },
            features: SpaceFeatures {
                has_socket: true,
                work_friendly: true,
                has_cat: true,
                ..SpaceFeatures::default()
            },
            photo_url: None,
            rating: None,
            created_at: now_ms - 4_000_000,
            is_custom: true,
        },
        Cafe {
            id: "real-5".to_string(),
            google_place_id: None,
            name: "Ruins Coffee Roasters".to_string(),
            address: "台北市文山區木柵路三段242號".to_string(),
            lat: 24.9926,
            lng: 121.5714,
            item_note: "廢墟風格，木柵必訪。手沖品質很穩，甜點也好吃。".to_string(),
            flavor: FlavorProfile {
                acidity: 3.5,
                bitterness: 2.5,
                roast: 3.0,
                sweetness: 3.5,
            },
            features: SpaceFeatures {
                unlimited_time: true,
                industrial_style: true,
                ..SpaceFeatures::default()
            },
            photo_url: None,
            rating: None,
            created_at: now_ms - 2_000_000,
            is_custom: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_set_has_five_unique_records_newest_last() {
        let seeds = seed_cafes(20_000_000);
        assert_eq!(seeds.len(), 5);

        let mut ids: Vec<&str> = seeds.iter().map(|c| c.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 5);

        // Ascending created_at in declaration order; real-5 is the newest
        assert!(seeds.windows(2).all(|w| w[0].created_at < w[1].created_at));
        assert_eq!(seeds.last().unwrap().id, "real-5");
        assert_eq!(seeds.last().unwrap().name, "Ruins Coffee Roasters");
    }
}
