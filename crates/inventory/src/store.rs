use core::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use shelfstock_events::Event;
use shelfstock_products::Product;

/// Event: something happened to the inventory.
///
/// Mutating store operations return these instead of printing; the `Display`
/// impl is the user-facing confirmation line the caller is expected to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ProductAdded {
        name: String,
        occurred_at: DateTime<Utc>,
    },
    ProductRemoved {
        name: String,
        occurred_at: DateTime<Utc>,
    },
    /// `remove` found no product with the requested id. A reported outcome,
    /// not an error; the sequence is unchanged.
    ProductNotFound {
        id: String,
        occurred_at: DateTime<Utc>,
    },
    ExpiredProductRemoved {
        name: String,
        occurred_at: DateTime<Utc>,
    },
    /// `remove_expired` found nothing to prune.
    NoExpiredProducts {
        occurred_at: DateTime<Utc>,
    },
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ProductAdded { .. } => "inventory.product.added",
            InventoryEvent::ProductRemoved { .. } => "inventory.product.removed",
            InventoryEvent::ProductNotFound { .. } => "inventory.product.not_found",
            InventoryEvent::ExpiredProductRemoved { .. } => "inventory.product.expired_removed",
            InventoryEvent::NoExpiredProducts { .. } => "inventory.expired.none_found",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ProductAdded { occurred_at, .. }
            | InventoryEvent::ProductRemoved { occurred_at, .. }
            | InventoryEvent::ProductNotFound { occurred_at, .. }
            | InventoryEvent::ExpiredProductRemoved { occurred_at, .. }
            | InventoryEvent::NoExpiredProducts { occurred_at } => *occurred_at,
        }
    }
}

impl fmt::Display for InventoryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryEvent::ProductAdded { name, .. } => {
                write!(f, "Added {name} to inventory!")
            }
            InventoryEvent::ProductRemoved { name, .. } => {
                write!(f, "Removed {name} from inventory!")
            }
            InventoryEvent::ProductNotFound { .. } => write!(f, "Product not found!"),
            InventoryEvent::ExpiredProductRemoved { name, .. } => {
                write!(f, "Removed expired product: {name}")
            }
            InventoryEvent::NoExpiredProducts { .. } => write!(f, "No expired products found!"),
        }
    }
}

/// The inventory store: an ordered sequence of products.
///
/// Insertion order is preserved across every operation; there is no sorting,
/// no deduplication, and no secondary index. Ids are opaque and NOT required
/// to be unique — on duplicates, removal takes the first match.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Inventory {
    products: Vec<Product>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a product. Always succeeds.
    pub fn add(&mut self, product: Product) -> InventoryEvent {
        tracing::debug!(id = product.id(), name = product.name(), "add product");
        let name = product.name().to_owned();
        self.products.push(product);
        InventoryEvent::ProductAdded {
            name,
            occurred_at: Utc::now(),
        }
    }

    /// Remove the first product whose id equals `id` (exact match, no case
    /// folding). At most one element is removed per call.
    pub fn remove(&mut self, id: &str) -> InventoryEvent {
        match self.products.iter().position(|p| p.id() == id) {
            Some(index) => {
                let removed = self.products.remove(index);
                tracing::debug!(id, name = removed.name(), "removed product");
                InventoryEvent::ProductRemoved {
                    name: removed.name().to_owned(),
                    occurred_at: Utc::now(),
                }
            }
            None => {
                tracing::debug!(id, "remove: no matching product");
                InventoryEvent::ProductNotFound {
                    id: id.to_owned(),
                    occurred_at: Utc::now(),
                }
            }
        }
    }

    /// All products, in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Every product whose name contains `needle`, case-insensitively and
    /// unanchored. An empty needle matches everything. Order preserved.
    pub fn search_by_name(&self, needle: &str) -> Vec<&Product> {
        let needle = needle.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.name().to_lowercase().contains(&needle))
            .collect()
    }

    /// Sum of `price * quantity` over all products.
    pub fn total_value(&self) -> f64 {
        self.products
            .iter()
            .map(|p| p.price() * p.quantity() as f64)
            .sum()
    }

    /// Remove every grocery expired on `on`, in sequence order.
    ///
    /// Non-grocery products are never affected. Returns one removal event per
    /// pruned product, or a single none-found event when nothing was expired,
    /// which also makes back-to-back calls idempotent.
    pub fn remove_expired(&mut self, on: NaiveDate) -> Vec<InventoryEvent> {
        let mut events = Vec::new();
        let mut kept = Vec::with_capacity(self.products.len());
        for product in self.products.drain(..) {
            if product.is_expired(on) {
                tracing::debug!(id = product.id(), name = product.name(), "expired, pruned");
                events.push(InventoryEvent::ExpiredProductRemoved {
                    name: product.name().to_owned(),
                    occurred_at: Utc::now(),
                });
            } else {
                kept.push(product);
            }
        }
        self.products = kept;
        if events.is_empty() {
            events.push(InventoryEvent::NoExpiredProducts {
                occurred_at: Utc::now(),
            });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ids(inventory: &Inventory) -> Vec<&str> {
        inventory.products().iter().map(|p| p.id()).collect()
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let mut inventory = Inventory::new();
        let event = inventory.add(Product::generic("P1", "Box", 1.0, 1));
        match event {
            InventoryEvent::ProductAdded { ref name, .. } => assert_eq!(name, "Box"),
            other => panic!("expected ProductAdded, got {other:?}"),
        }
        inventory.add(Product::generic("P2", "Crate", 2.0, 1));
        inventory.add(Product::generic("P3", "Pallet", 3.0, 1));
        assert_eq!(ids(&inventory), ["P1", "P2", "P3"]);
    }

    #[test]
    fn remove_takes_the_matching_product_and_keeps_order() {
        let mut inventory = Inventory::new();
        inventory.add(Product::generic("P1", "Box", 1.0, 1));
        inventory.add(Product::generic("P2", "Crate", 2.0, 1));
        inventory.add(Product::generic("P3", "Pallet", 3.0, 1));

        let event = inventory.remove("P2");
        match event {
            InventoryEvent::ProductRemoved { ref name, .. } => assert_eq!(name, "Crate"),
            other => panic!("expected ProductRemoved, got {other:?}"),
        }
        assert_eq!(ids(&inventory), ["P1", "P3"]);
    }

    #[test]
    fn remove_unknown_id_reports_not_found_and_changes_nothing() {
        let mut inventory = Inventory::new();
        inventory.add(Product::generic("P1", "Box", 1.0, 1));
        inventory.add(Product::generic("P2", "Crate", 2.0, 1));

        let event = inventory.remove("P9");
        match event {
            InventoryEvent::ProductNotFound { ref id, .. } => assert_eq!(id, "P9"),
            other => panic!("expected ProductNotFound, got {other:?}"),
        }
        assert_eq!(ids(&inventory), ["P1", "P2"]);
    }

    #[test]
    fn remove_is_exact_match_on_id() {
        let mut inventory = Inventory::new();
        inventory.add(Product::generic("p1", "Box", 1.0, 1));
        match inventory.remove("P1") {
            InventoryEvent::ProductNotFound { .. } => {}
            other => panic!("id match must be case-sensitive, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_ids_coexist_and_first_match_wins() {
        let mut inventory = Inventory::new();
        inventory.add(Product::generic("P1", "First", 1.0, 1));
        inventory.add(Product::generic("P1", "Second", 2.0, 1));
        assert_eq!(inventory.len(), 2);

        match inventory.remove("P1") {
            InventoryEvent::ProductRemoved { ref name, .. } => assert_eq!(name, "First"),
            other => panic!("expected ProductRemoved, got {other:?}"),
        }
        assert_eq!(inventory.products()[0].name(), "Second");
    }

    #[test]
    fn search_is_case_insensitive_unanchored_substring() {
        let mut inventory = Inventory::new();
        inventory.add(Product::generic("P1", "Phone", 1.0, 1));
        inventory.add(Product::generic("P2", "Graphite", 1.0, 1));
        inventory.add(Product::generic("P3", "Table", 1.0, 1));

        let hits = inventory.search_by_name("ph");
        let names: Vec<&str> = hits.iter().map(|p| p.name()).collect();
        assert_eq!(names, ["Phone", "Graphite"]);
    }

    #[test]
    fn empty_needle_matches_everything() {
        let mut inventory = Inventory::new();
        inventory.add(Product::generic("P1", "Phone", 1.0, 1));
        inventory.add(Product::generic("P2", "Table", 1.0, 1));
        assert_eq!(inventory.search_by_name("").len(), 2);
    }

    #[test]
    fn search_miss_is_an_empty_result() {
        let mut inventory = Inventory::new();
        inventory.add(Product::generic("P1", "Phone", 1.0, 1));
        assert!(inventory.search_by_name("zz").is_empty());
    }

    #[test]
    fn total_value_sums_price_times_quantity() {
        let mut inventory = Inventory::new();
        inventory.add(Product::generic("P1", "Box", 10.0, 3));
        inventory.add(Product::generic("P2", "Crate", 2.5, 4));
        let total = inventory.total_value();
        assert_eq!(format!("{total:.2}"), "40.00");
    }

    #[test]
    fn total_value_of_empty_inventory_is_zero() {
        assert_eq!(Inventory::new().total_value(), 0.0);
    }

    #[test]
    fn remove_expired_prunes_only_expired_groceries() {
        let today = date("2024-07-01");
        let mut inventory = Inventory::new();
        inventory.add(Product::grocery("G1", "Milk", 3.0, 2, "2024-06-01").unwrap());
        inventory.add(Product::grocery("G2", "Bread", 1.0, 5, "2024-06-15").unwrap());
        inventory.add(Product::grocery("G3", "Rice", 8.0, 1, "2025-01-01").unwrap());
        inventory.add(Product::clothing("C1", "Shirt", 20.0, 3, "M", "Cotton"));

        let events = inventory.remove_expired(today);
        let removed: Vec<&str> = events
            .iter()
            .map(|e| match e {
                InventoryEvent::ExpiredProductRemoved { name, .. } => name.as_str(),
                other => panic!("expected ExpiredProductRemoved, got {other:?}"),
            })
            .collect();
        assert_eq!(removed, ["Milk", "Bread"]);
        assert_eq!(ids(&inventory), ["G3", "C1"]);
    }

    #[test]
    fn remove_expired_twice_reports_none_found() {
        let today = date("2024-07-01");
        let mut inventory = Inventory::new();
        inventory.add(Product::grocery("G1", "Milk", 3.0, 2, "2024-06-01").unwrap());

        let first = inventory.remove_expired(today);
        assert_eq!(first.len(), 1);

        let second = inventory.remove_expired(today);
        match second.as_slice() {
            [InventoryEvent::NoExpiredProducts { .. }] => {}
            other => panic!("expected a single NoExpiredProducts, got {other:?}"),
        }
        assert_eq!(inventory.len(), 0);
    }

    #[test]
    fn remove_expired_on_empty_inventory_reports_none_found() {
        let mut inventory = Inventory::new();
        match inventory.remove_expired(date("2024-07-01")).as_slice() {
            [InventoryEvent::NoExpiredProducts { .. }] => {}
            other => panic!("expected a single NoExpiredProducts, got {other:?}"),
        }
    }

    #[test]
    fn event_confirmation_lines() {
        let mut inventory = Inventory::new();
        let added = inventory.add(Product::generic("P1", "Phone", 1.0, 1));
        assert_eq!(added.to_string(), "Added Phone to inventory!");
        assert_eq!(
            inventory.remove("P1").to_string(),
            "Removed Phone from inventory!"
        );
        assert_eq!(inventory.remove("P1").to_string(), "Product not found!");
    }

    #[test]
    fn event_types_are_stable() {
        let mut inventory = Inventory::new();
        let added = inventory.add(Product::generic("P1", "Phone", 1.0, 1));
        assert_eq!(added.event_type(), "inventory.product.added");
        assert_eq!(
            inventory.remove("P1").event_type(),
            "inventory.product.removed"
        );
        assert_eq!(
            inventory.remove("P1").event_type(),
            "inventory.product.not_found"
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_products() -> impl Strategy<Value = Vec<Product>> {
            proptest::collection::vec(
                ("[A-Z][0-9]{1,3}", "[A-Za-z]{1,12}", 0.0..1000.0f64, -5i64..100)
                    .prop_map(|(id, name, price, quantity)| {
                        Product::generic(id, name, price, quantity)
                    }),
                0..20,
            )
        }

        proptest! {
            /// Adds preserve insertion order exactly.
            #[test]
            fn add_preserves_order(products in arb_products()) {
                let mut inventory = Inventory::new();
                for product in products.clone() {
                    inventory.add(product);
                }
                let stored: Vec<&str> = inventory.products().iter().map(|p| p.id()).collect();
                let expected: Vec<&str> = products.iter().map(|p| p.id()).collect();
                prop_assert_eq!(stored, expected);
            }

            /// Total value equals the fold of price * quantity.
            #[test]
            fn total_value_matches_fold(products in arb_products()) {
                let mut inventory = Inventory::new();
                let mut expected = 0.0f64;
                for product in products {
                    expected += product.price() * product.quantity() as f64;
                    inventory.add(product);
                }
                prop_assert!((inventory.total_value() - expected).abs() < 1e-9);
            }

            /// Search results are an order-preserving subsequence of the store,
            /// and the empty needle matches everything.
            #[test]
            fn search_is_a_subsequence(products in arb_products(), needle in "[a-z]{0,3}") {
                let mut inventory = Inventory::new();
                for product in products {
                    inventory.add(product);
                }

                prop_assert_eq!(inventory.search_by_name("").len(), inventory.len());

                let hits = inventory.search_by_name(&needle);
                let mut cursor = inventory.products().iter();
                for hit in hits {
                    prop_assert!(
                        cursor.any(|p| std::ptr::eq(p, hit)),
                        "search result out of order or not from the store"
                    );
                    prop_assert!(hit.name().to_lowercase().contains(&needle));
                }
            }

            /// Removing an id never drops more than one product and never
            /// reorders the survivors.
            #[test]
            fn remove_drops_at_most_one(products in arb_products(), id in "[A-Z][0-9]{1,3}") {
                let mut inventory = Inventory::new();
                for product in products {
                    inventory.add(product);
                }
                let before: Vec<String> =
                    inventory.products().iter().map(|p| p.id().to_owned()).collect();

                let event = inventory.remove(&id);
                let after: Vec<String> =
                    inventory.products().iter().map(|p| p.id().to_owned()).collect();

                match event {
                    InventoryEvent::ProductRemoved { .. } => {
                        let position = before.iter().position(|x| x == &id).unwrap();
                        let mut expected = before.clone();
                        expected.remove(position);
                        prop_assert_eq!(after, expected);
                    }
                    InventoryEvent::ProductNotFound { .. } => {
                        prop_assert_eq!(after, before);
                    }
                    other => prop_assert!(false, "unexpected event {:?}", other),
                }
            }
        }
    }
}
