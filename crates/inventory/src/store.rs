use core::cmp::Ordering;
use std::collections::HashMap;

use rust_decimal::Decimal;

use stockkeep_core::{DomainError, DomainResult, ProductCode, text};
use stockkeep_products::{Product, ProductUpdate};

use crate::summary::InventorySummary;

/// Top-N size used when the caller asks for fewer than one entry.
pub const DEFAULT_TOP_N: usize = 3;

/// In-memory product collection keyed by code.
///
/// The store is the sole owner of its products. Queries hand back freshly
/// built vectors of clones, and mutation needs `&mut self`, so nothing a
/// caller holds can change behind its back. Not synchronized: share it
/// across threads only behind a `Mutex`.
///
/// The total stock value is kept up to date on every mutation, and changes
/// that would push it past `Decimal::MAX` are rejected.
#[derive(Debug, Default, Clone)]
pub struct InventoryStore {
    products: HashMap<ProductCode, Product>,
    total_value: Decimal,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new product. Fails if its code is already taken or if its
    /// stock value would overflow the inventory total.
    pub fn add(&mut self, product: Product) -> DomainResult<()> {
        if self.products.contains_key(product.code()) {
            return Err(DomainError::validation(format!(
                "a product with code {} already exists",
                product.code()
            )));
        }
        self.total_value = checked_total(self.total_value, product.stock_value())?;
        tracing::debug!(code = %product.code(), "product added");
        self.products.insert(product.code().clone(), product);
        Ok(())
    }

    /// Remove by code. Returns whether anything was removed; a blank code is
    /// rejected, an unknown one is not.
    pub fn remove(&mut self, code: &str) -> DomainResult<bool> {
        let code = require_code(code)?;
        let Some(product) = self.products.remove(code) else {
            return Ok(false);
        };
        self.total_value -= product.stock_value();
        tracing::debug!(code, "product removed");
        Ok(true)
    }

    /// Run `mutation` against the stored product in place.
    ///
    /// The mutation's own error is returned unchanged. Whatever setters
    /// succeeded before it failed stay applied; each setter is atomic on its
    /// own. If the changed product's stock value would overflow the inventory
    /// total, the product is restored and the update rejected.
    pub fn update<F>(&mut self, code: &str, mutation: F) -> DomainResult<()>
    where
        F: FnOnce(&mut Product) -> DomainResult<()>,
    {
        let code = require_code(code)?;
        let product = self
            .products
            .get_mut(code)
            .ok_or_else(|| DomainError::product_not_found(code))?;
        let before = product.clone();
        let rest = self.total_value - before.stock_value();

        let outcome = mutation(&mut *product);
        match checked_total(rest, product.stock_value()) {
            Ok(total) => self.total_value = total,
            Err(err) => {
                *product = before;
                return Err(err);
            }
        }
        outcome?;
        tracing::debug!(code, "product updated");
        Ok(())
    }

    /// Field-selector form of [`InventoryStore::update`].
    pub fn apply_update(&mut self, code: &str, update: ProductUpdate) -> DomainResult<()> {
        self.update(code, |product| product.apply(update))
    }

    /// Look up a product by code. A blank code simply finds nothing.
    pub fn find_by_code(&self, code: &str) -> Option<Product> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        self.products.get(code).cloned()
    }

    /// Products whose name contains `partial`, ignoring case; sorted by name.
    pub fn find_by_name(&self, partial: &str) -> Vec<Product> {
        if text::is_blank(partial) {
            return Vec::new();
        }
        let needle = partial.to_lowercase();
        self.collect_sorted(
            |p| text::contains_folded(p.name(), &needle),
            by_name,
        )
    }

    /// Products whose name or description contains `query`, ignoring case;
    /// sorted by name.
    pub fn find_by_text(&self, query: &str) -> Vec<Product> {
        if text::is_blank(query) {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.collect_sorted(
            |p| text::contains_folded(p.name(), &needle) || text::contains_folded(p.description(), &needle),
            by_name,
        )
    }

    /// Every product, sorted by code.
    pub fn list_all(&self) -> Vec<Product> {
        self.collect_sorted(|_| true, |a, b| a.code().cmp(b.code()))
    }

    /// Every product, sorted by a caller-supplied ordering.
    pub fn list_ordered<F>(&self, compare: F) -> Vec<Product>
    where
        F: FnMut(&Product, &Product) -> Ordering,
    {
        self.collect_sorted(|_| true, compare)
    }

    /// Aggregate statistics over the current contents.
    ///
    /// `top_n < 1` falls back to [`DEFAULT_TOP_N`]; a negative
    /// `low_threshold` is treated as zero (which matches nothing). Ties on
    /// stock are broken by code, ascending, in both lists.
    pub fn generate_summary(&self, top_n: i64, low_threshold: i64) -> InventorySummary {
        let top_n = if top_n < 1 {
            DEFAULT_TOP_N
        } else {
            usize::try_from(top_n).unwrap_or(usize::MAX)
        };
        let low_threshold = low_threshold.max(0);

        let total_items = self
            .products
            .values()
            .fold(0_i64, |acc, p| acc.saturating_add(p.stock()));
        let total_value = self.total_value;

        let mut top_by_stock = self.list_ordered(|a, b| {
            b.stock().cmp(&a.stock()).then_with(|| a.code().cmp(b.code()))
        });
        top_by_stock.truncate(top_n);

        let low_stock = self.collect_sorted(
            |p| p.stock() < low_threshold,
            |a, b| a.stock().cmp(&b.stock()).then_with(|| a.code().cmp(b.code())),
        );

        tracing::debug!(
            products = self.products.len(),
            top_n,
            low_threshold,
            "inventory summary generated"
        );

        InventorySummary::new(self.products.len(), total_items, total_value, top_by_stock, low_stock)
    }

    pub fn size(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.products.contains_key(code)
    }

    fn collect_sorted<P, F>(&self, mut predicate: P, compare: F) -> Vec<Product>
    where
        P: FnMut(&Product) -> bool,
        F: FnMut(&Product, &Product) -> Ordering,
    {
        let mut out: Vec<Product> = self
            .products
            .values()
            .filter(|p| predicate(*p))
            .cloned()
            .collect();
        out.sort_by(compare);
        out
    }
}

fn checked_total(total: Decimal, value: Decimal) -> DomainResult<Decimal> {
    total
        .checked_add(value)
        .ok_or_else(|| DomainError::validation("total inventory value is too large"))
}

fn require_code(code: &str) -> DomainResult<&str> {
    let code = code.trim();
    if code.is_empty() {
        return Err(DomainError::validation("code cannot be empty"));
    }
    Ok(code)
}

fn by_name(a: &Product, b: &Product) -> Ordering {
    a.name().cmp(b.name()).then_with(|| a.code().cmp(b.code()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use rust_decimal_macros::dec;
    use stockkeep_products::NewProduct;

    fn prod(code: &str, name: &str, description: &str, price: Decimal, stock: i64) -> Product {
        Product::create(
            NewProduct::new(code, name)
                .description(description)
                .price(price)
                .stock(stock),
        )
        .unwrap()
    }

    fn codes(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.code().as_str()).collect()
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name()).collect()
    }

    fn summary_fixture() -> InventoryStore {
        let mut inv = InventoryStore::new();
        inv.add(prod("R1", "Prod1", "", dec!(1000), 2)).unwrap();
        inv.add(prod("R2", "Prod2", "", dec!(500), 10)).unwrap();
        inv.add(prod("R3", "Prod3", "", dec!(200), 1)).unwrap();
        inv
    }

    #[test]
    fn add_then_duplicate_is_rejected() {
        let mut inv = InventoryStore::new();
        inv.add(prod("A1", "Keyboard", "mechanical", dec!(19990.00), 10)).unwrap();
        assert!(inv.contains("A1"));
        assert_eq!(inv.size(), 1);

        let err = inv.add(prod("A1", "Other", "", dec!(1000), 1)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(inv.size(), 1);
        assert_eq!(inv.find_by_code("A1").unwrap().name(), "Keyboard");
    }

    #[test]
    fn remove_existing_true_then_false() {
        let mut inv = InventoryStore::new();
        inv.add(prod("B1", "Mouse", "", dec!(5000), 3)).unwrap();
        assert!(inv.remove("B1").unwrap());
        assert!(!inv.remove("B1").unwrap());
        assert!(!inv.remove("ZZ").unwrap());
        assert!(inv.is_empty());
    }

    #[test]
    fn remove_blank_code_is_rejected() {
        let mut inv = InventoryStore::new();
        assert!(inv.remove(" ").unwrap_err().is_validation());
        assert!(inv.remove("").unwrap_err().is_validation());
    }

    #[test]
    fn update_applies_mutation_in_place() {
        let mut inv = summary_fixture();
        inv.update("R1", |p| {
            p.set_name("Renamed")?;
            p.increase_stock(3)
        })
        .unwrap();

        let p = inv.find_by_code("R1").unwrap();
        assert_eq!(p.name(), "Renamed");
        assert_eq!(p.stock(), 5);
    }

    #[test]
    fn update_distinguishes_blank_and_missing() {
        let mut inv = summary_fixture();
        assert!(inv.update("  ", |_| Ok(())).unwrap_err().is_validation());
        assert_eq!(
            inv.update("NOPE", |_| Ok(())).unwrap_err(),
            DomainError::product_not_found("NOPE")
        );
    }

    #[test]
    fn update_propagates_mutation_error_and_keeps_state() {
        let mut inv = summary_fixture();
        let err = inv.update("R3", |p| p.decrease_stock(5)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(inv.find_by_code("R3").unwrap().stock(), 1);
    }

    #[test]
    fn apply_update_uses_field_selector() {
        let mut inv = summary_fixture();
        inv.apply_update("R2", ProductUpdate::Price(dec!(499.995))).unwrap();
        assert_eq!(inv.find_by_code("R2").unwrap().price(), dec!(500.00));

        let err = inv.apply_update("R2", ProductUpdate::Name(" ".into())).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(inv.find_by_code("R2").unwrap().name(), "Prod2");
    }

    #[test]
    fn find_by_code_present_and_blank() {
        let mut inv = InventoryStore::new();
        inv.add(prod("C1", "Monitor", "", dec!(120000), 2)).unwrap();
        assert!(inv.find_by_code("C1").is_some());
        assert!(inv.find_by_code(" ").is_none());
        assert!(inv.find_by_code("c1").is_none());
    }

    #[test]
    fn find_by_name_partial_case_insensitive_sorted() {
        let mut inv = InventoryStore::new();
        inv.add(prod("D2", "Camiseta", "roja", dec!(8000), 7)).unwrap();
        inv.add(prod("D3", "Pantalón", "negro", dec!(15000), 2)).unwrap();
        inv.add(prod("D1", "Camisa", "azul", dec!(10000), 5)).unwrap();

        assert_eq!(names(&inv.find_by_name("cami")), vec!["Camisa", "Camiseta"]);
        assert_eq!(names(&inv.find_by_name("CAMI")), vec!["Camisa", "Camiseta"]);
        assert!(inv.find_by_name("   ").is_empty());
        assert!(inv.find_by_name("roja").is_empty());
    }

    #[test]
    fn find_by_text_matches_name_or_description() {
        let mut inv = InventoryStore::new();
        inv.add(prod("E1", "Zapatillas", "running", dec!(30000), 4)).unwrap();
        inv.add(prod("E2", "Polera", "para Running", dec!(12000), 6)).unwrap();
        inv.add(prod("E3", "Calcetines", "algodón", dec!(3000), 10)).unwrap();

        assert_eq!(names(&inv.find_by_text("running")), vec!["Polera", "Zapatillas"]);
        assert_eq!(names(&inv.find_by_text("calce")), vec!["Calcetines"]);
        assert!(inv.find_by_text("").is_empty());
    }

    #[test]
    fn list_all_sorted_by_code() {
        let mut inv = InventoryStore::new();
        inv.add(prod("Z9", "Last", "", dec!(1), 1)).unwrap();
        inv.add(prod("A0", "First", "", dec!(1), 1)).unwrap();
        assert_eq!(codes(&inv.list_all()), vec!["A0", "Z9"]);
    }

    #[test]
    fn list_ordered_by_caller_comparator() {
        let mut inv = InventoryStore::new();
        inv.add(prod("1", "B", "", dec!(1), 1)).unwrap();
        inv.add(prod("2", "A", "", dec!(1), 1)).unwrap();
        let ordered = inv.list_ordered(|a, b| a.name().cmp(b.name()));
        assert_eq!(names(&ordered), vec!["A", "B"]);
    }

    #[test]
    fn query_results_are_detached_from_store() {
        let mut inv = summary_fixture();
        let before = inv.list_all();
        let summary = inv.generate_summary(3, 5);

        inv.apply_update("R1", ProductUpdate::Stock(99)).unwrap();
        inv.remove("R2").unwrap();

        assert_eq!(before.len(), 3);
        assert_eq!(before[0].stock(), 2);
        assert_eq!(summary.product_count(), 3);
        assert_eq!(summary.top_by_stock()[0].code().as_str(), "R2");
    }

    #[test]
    fn summary_metrics() {
        let inv = summary_fixture();
        let summary = inv.generate_summary(2, 2);

        assert_eq!(summary.product_count(), 3);
        assert_eq!(summary.total_items(), 13);
        assert_eq!(summary.total_value(), dec!(7200.00));
        assert_eq!(codes(summary.top_by_stock()), vec!["R2", "R1"]);
        assert_eq!(codes(summary.low_stock()), vec!["R3"]);
    }

    #[test]
    fn summary_coerces_out_of_range_arguments() {
        let mut inv = summary_fixture();
        inv.add(prod("R4", "Prod4", "", dec!(1), 4)).unwrap();

        let summary = inv.generate_summary(0, -7);
        assert_eq!(summary.top_by_stock().len(), DEFAULT_TOP_N);
        assert!(summary.low_stock().is_empty());

        let summary = inv.generate_summary(-2, 100);
        assert_eq!(summary.top_by_stock().len(), DEFAULT_TOP_N);
        assert_eq!(codes(summary.low_stock()), vec!["R3", "R1", "R4", "R2"]);
    }

    #[test]
    fn oversized_product_never_reaches_the_summary() {
        let huge = Decimal::from_str("100000000000000000000").unwrap();
        let err = Product::create(NewProduct::new("BIG", "Big").price(huge).stock(1_000_000_000_000)).unwrap_err();
        assert!(err.is_validation());

        let mut inv = summary_fixture();
        inv.add(prod("BIG", "Big", "", huge, 1)).unwrap();
        assert!(inv.apply_update("BIG", ProductUpdate::Stock(1_000_000_000_000)).unwrap_err().is_validation());

        let summary = inv.generate_summary(3, 0);
        assert_eq!(summary.total_value(), huge + dec!(7200));
    }

    #[test]
    fn total_value_overflow_is_rejected() {
        let price = Decimal::from_str("5000000000000000000000000").unwrap();
        let mut inv = InventoryStore::new();
        inv.add(prod("A", "Vault A", "", price, 10_000)).unwrap();

        let err = inv.add(prod("B", "Vault B", "", price, 10_000)).unwrap_err();
        assert!(err.is_validation());
        assert!(!inv.contains("B"));

        inv.add(prod("B", "Vault B", "", price, 0)).unwrap();
        let err = inv.update("B", |p| {
            p.set_name("Renamed")?;
            p.set_stock(10_000)
        });
        assert!(err.unwrap_err().is_validation());
        let b = inv.find_by_code("B").unwrap();
        assert_eq!(b.name(), "Vault B");
        assert_eq!(b.stock(), 0);

        let summary = inv.generate_summary(3, 0);
        assert_eq!(summary.total_value(), price * Decimal::from(10_000));

        assert!(inv.remove("A").unwrap());
        inv.apply_update("B", ProductUpdate::Stock(10_000)).unwrap();
        assert_eq!(inv.generate_summary(3, 0).total_value(), price * Decimal::from(10_000));
    }

    #[test]
    fn total_value_tracks_mutations() {
        let mut inv = summary_fixture();
        inv.apply_update("R1", ProductUpdate::IncreaseStock(3)).unwrap();
        inv.apply_update("R2", ProductUpdate::Price(dec!(100))).unwrap();
        assert!(inv.apply_update("R3", ProductUpdate::DecreaseStock(5)).is_err());
        inv.remove("R3").unwrap();
        assert_eq!(inv.generate_summary(3, 0).total_value(), dec!(6000));
    }

    #[test]
    fn summary_of_empty_store() {
        let summary = InventoryStore::new().generate_summary(5, 3);
        assert_eq!(summary.product_count(), 0);
        assert_eq!(summary.total_items(), 0);
        assert_eq!(summary.total_value(), Decimal::ZERO);
        assert!(summary.top_by_stock().is_empty());
        assert!(summary.low_stock().is_empty());
    }

    #[test]
    fn summary_top_list_on_ties_has_expected_members() {
        let mut inv = InventoryStore::new();
        inv.add(prod("T1", "a", "", dec!(1), 5)).unwrap();
        inv.add(prod("T2", "b", "", dec!(1), 5)).unwrap();
        inv.add(prod("T3", "c", "", dec!(1), 5)).unwrap();
        inv.add(prod("T4", "d", "", dec!(1), 1)).unwrap();

        let summary = inv.generate_summary(2, 0);
        let top = codes(summary.top_by_stock());
        assert_eq!(top.len(), 2);
        assert!(top.iter().all(|c| ["T1", "T2", "T3"].contains(c)));
    }

    #[test]
    fn summary_value_is_exact_decimal() {
        let mut inv = InventoryStore::new();
        for i in 0..10 {
            inv.add(prod(&format!("C{i}"), "cent", "", dec!(0.10), 1)).unwrap();
        }
        assert_eq!(inv.generate_summary(3, 0).total_value(), dec!(1.00));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::BTreeSet;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 200,
                ..ProptestConfig::default()
            })]

            /// Property: remove succeeds exactly once per added code.
            #[test]
            fn remove_is_true_exactly_once(codes in prop::collection::btree_set("[A-Z]{1,3}[0-9]{0,2}", 1..30)) {
                let mut inv = InventoryStore::new();
                for code in &codes {
                    inv.add(prod(code, "Item", "", dec!(1), 1)).unwrap();
                }
                for code in &codes {
                    prop_assert!(inv.remove(code).unwrap());
                    prop_assert!(!inv.remove(code).unwrap());
                }
                prop_assert!(inv.is_empty());
            }

            /// Property: summary totals agree with a direct fold over the products.
            #[test]
            fn summary_totals_match(
                stocks in prop::collection::vec((0_i64..1_000, 0_i64..100_000), 0..40),
                top_n in -3_i64..10,
                threshold in -5_i64..500,
            ) {
                let mut inv = InventoryStore::new();
                let mut expected_items = 0_i64;
                let mut expected_value = Decimal::ZERO;
                for (i, (stock, cents)) in stocks.iter().enumerate() {
                    let price = Decimal::new(*cents, 2);
                    inv.add(prod(&format!("P{i}"), "Item", "", price, *stock)).unwrap();
                    expected_items += stock;
                    expected_value += price * Decimal::from(*stock);
                }

                let summary = inv.generate_summary(top_n, threshold);
                prop_assert_eq!(summary.product_count(), stocks.len());
                prop_assert_eq!(summary.total_items(), expected_items);
                prop_assert_eq!(summary.total_value(), expected_value);

                let limit = if top_n < 1 { DEFAULT_TOP_N } else { top_n as usize };
                prop_assert_eq!(summary.top_by_stock().len(), limit.min(stocks.len()));
                prop_assert!(summary.top_by_stock().windows(2).all(|w| w[0].stock() >= w[1].stock()));

                let low: BTreeSet<&str> = summary.low_stock().iter().map(|p| p.code().as_str()).collect();
                let expected_low = stocks.iter().filter(|(s, _)| *s < threshold.max(0)).count();
                prop_assert_eq!(low.len(), expected_low);
                prop_assert!(summary.low_stock().windows(2).all(|w| w[0].stock() <= w[1].stock()));
            }
        }
    }
}
