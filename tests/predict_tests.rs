//! Predictor against the real SQLite history store
//!
//! The unit tests drive the predictor through a fake history; these run the
//! whole path instead, from saved rows to a packable predicted part list.

use chrono::Utc;
use cutplan::core::packing::{pack, PackSettings};
use cutplan::core::predict::{predict, PredictionResult};
use cutplan::entities::layout::Sheet;
use cutplan::entities::part::{EdgeSpec, Part};
use cutplan::history::HistoryStore;

fn wardrobe_parts(base_w: f64, base_h: f64) -> Vec<Part> {
    vec![
        Part::new("Side", base_w - 200.0, base_h - 100.0, 2).with_edge(EdgeSpec::Long2),
        Part::new("Shelf", base_w - 240.0, base_h - 900.0, 4).with_edge(EdgeSpec::Long1),
        Part::new("Back", base_w - 10.0, base_h - 50.0, 1),
    ]
}

#[test]
fn predicted_offsets_follow_saved_jobs() {
    let store = HistoryStore::open_in_memory().unwrap();
    for (w, h) in [(800.0, 1200.0), (900.0, 1400.0), (1000.0, 2000.0)] {
        store
            .save("wardrobe", w, h, 18.0, &wardrobe_parts(w, h), Utc::now())
            .unwrap();
    }

    let outcome = predict(&store, "wardrobe", 850.0, 1300.0).unwrap();
    assert!(outcome.warnings.is_empty());
    let parts = match outcome.result {
        PredictionResult::Predicted { parts } => parts,
        other => panic!("expected prediction, got {:?}", other),
    };

    assert_eq!(parts.len(), 3);
    let side = &parts[0];
    assert_eq!(side.name, "Side");
    assert_eq!(side.width, 650.0);
    assert_eq!(side.height, 1200.0);
    assert_eq!(side.quantity, 2);
    assert_eq!(side.edge, EdgeSpec::Long2);

    let back = &parts[2];
    assert_eq!(back.width, 840.0);
    assert_eq!(back.height, 1250.0);
}

#[test]
fn other_cabinet_types_do_not_leak_into_the_sample_set() {
    let store = HistoryStore::open_in_memory().unwrap();
    for _ in 0..3 {
        store
            .save(
                "base-cabinet",
                800.0,
                900.0,
                18.0,
                &wardrobe_parts(800.0, 900.0),
                Utc::now(),
            )
            .unwrap();
    }
    store
        .save("wardrobe", 800.0, 1200.0, 18.0, &wardrobe_parts(800.0, 1200.0), Utc::now())
        .unwrap();

    let outcome = predict(&store, "wardrobe", 800.0, 1200.0).unwrap();
    assert_eq!(
        outcome.result,
        PredictionResult::Insufficient { matching: 1 }
    );
}

#[test]
fn predicted_parts_pack_onto_stock_sheets() {
    let store = HistoryStore::open_in_memory().unwrap();
    for _ in 0..3 {
        store
            .save("wardrobe", 800.0, 1200.0, 18.0, &wardrobe_parts(800.0, 1200.0), Utc::now())
            .unwrap();
    }

    let outcome = predict(&store, "wardrobe", 800.0, 1200.0).unwrap();
    let parts = match outcome.result {
        PredictionResult::Predicted { parts } => parts,
        other => panic!("expected prediction, got {:?}", other),
    };

    let settings = PackSettings::new(Sheet::new(2440.0, 1220.0)).with_kerf(3.0);
    let result = pack(&parts, &settings);
    assert!(result.is_complete());
    assert!(result.bins_used() >= 1);
}
