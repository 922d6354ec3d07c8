//! Property tests for the aggregation functions.

use pantry::{compute_monthly_totals, compute_stock, Item, ItemDraft, ItemId, StoreConfig, Tracker};
use proptest::collection::vec;
use proptest::prelude::*;
use tempfile::TempDir;

fn arb_item() -> impl Strategy<Value = Item> {
    (
        1u64..1_000_000,
        "[a-z]{1,8}",
        0u32..10_000,
        0u32..50,
        2020i32..2030,
        1u32..13,
    )
        .prop_map(|(id, name, cents, quantity, year, month)| Item {
            id: ItemId(id),
            name,
            cost: f64::from(cents) / 100.0,
            quantity,
            expiry: "2031-01-01".to_string(),
            date_added: format!("{year:04}-{month:02}-15"),
            serving_size: None,
            calories: None,
            fat: None,
            carbohydrates: None,
            protein: None,
            sodium: None,
        })
}

/// Deterministic Fisher-Yates driven by an xorshift stream.
fn shuffle(items: &mut [Item], mut seed: u64) {
    seed |= 1;
    for i in (1..items.len()).rev() {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        let j = (seed as usize) % (i + 1);
        items.swap(i, j);
    }
}

proptest! {
    #[test]
    fn monthly_totals_are_order_independent(
        mut items in vec(arb_item(), 0..40),
        seed in any::<u64>(),
    ) {
        let base = compute_monthly_totals(&items);
        shuffle(&mut items, seed);
        let shuffled = compute_monthly_totals(&items);

        // Same months, same per-month sums; only group order may differ.
        prop_assert_eq!(base.len(), shuffled.len());
        for (month, total) in &base {
            let other = shuffled.get(month).copied().unwrap_or(f64::NAN);
            prop_assert!((total - other).abs() < 1e-6, "month {} differs", month);
        }
    }

    #[test]
    fn stock_is_sum_of_quantities(items in vec(arb_item(), 0..40)) {
        let expected: u64 = items.iter().map(|item| u64::from(item.quantity)).sum();
        prop_assert_eq!(compute_stock(&items), expected);
    }

    #[test]
    fn monthly_totals_conserve_total_cost(items in vec(arb_item(), 0..40)) {
        let total: f64 = items.iter().map(|item| item.cost).sum();
        let grouped: f64 = compute_monthly_totals(&items).values().sum();
        prop_assert!((total - grouped).abs() < 1e-6);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn stock_conservation_over_adds_and_deletes(
        quantities in vec(0u32..20, 1..12),
        delete_mask in vec(any::<bool>(), 12),
    ) {
        let dir = TempDir::new().unwrap();
        let mut tracker = Tracker::open(StoreConfig {
            path: dir.path().join("pantry"),
            create_if_missing: true,
        })
        .unwrap();

        let mut ids = Vec::new();
        for quantity in &quantities {
            let draft = ItemDraft::new("item", "1.00", quantity.to_string(), "2031-01-01");
            ids.push(tracker.add(&draft).unwrap().id);
        }

        let mut expected: u64 = quantities.iter().map(|&q| u64::from(q)).sum();
        for (id, (&quantity, &doomed)) in ids.iter().zip(quantities.iter().zip(&delete_mask)) {
            if doomed {
                prop_assert!(tracker.delete(*id).unwrap());
                expected -= u64::from(quantity);
            }
        }

        prop_assert_eq!(tracker.total_stock(), expected);
    }
}
