//! Pure derivations over the current list of parts.
//!
//! Nothing here caches: every view is recomputed from the slice it is given,
//! which is cheap at inventory sizes and keeps the functions trivially
//! consistent with the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use autoparts_core::{DomainError, Money, PartId};

use crate::part::{Category, MovementKind, Part, StockStatus};

/// Sentinel label for "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Category restriction applied by [`filter`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn accepts(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }
}

impl core::str::FromStr for CategoryFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_CATEGORIES {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

impl core::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(c) => core::fmt::Display::fmt(c, f),
        }
    }
}

/// Search text plus category restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartQuery {
    pub text: String,
    pub category: CategoryFilter,
}

impl PartQuery {
    pub fn new(text: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, CategoryFilter::All)
    }
}

/// Parts matching both the category filter and the search text, in store
/// order.
pub fn filter<'a>(parts: &'a [Part], query: &PartQuery) -> Vec<&'a Part> {
    let needle = query.text.to_lowercase();
    let matched: Vec<&Part> = parts
        .iter()
        .filter(|p| query.category.accepts(p.category) && p.matches_text(&needle))
        .collect();
    tracing::debug!(
        total = parts.len(),
        matched = matched.len(),
        category = %query.category,
        "filtered parts"
    );
    matched
}

/// Dashboard summary counters.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStats {
    pub total_items: usize,
    pub total_stock: u64,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub total_value: Money,
}

pub fn aggregate(parts: &[Part]) -> InventoryStats {
    parts.iter().fold(InventoryStats::default(), |mut acc, p| {
        acc.total_items += 1;
        acc.total_stock += u64::from(p.stock);
        match p.status() {
            StockStatus::LowStock => acc.low_stock += 1,
            StockStatus::OutOfStock => acc.out_of_stock += 1,
            StockStatus::InStock => {}
        }
        acc.total_value = acc.total_value + p.stock_value();
        acc
    })
}

/// A movement tagged with the part it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementEntry {
    pub part_id: PartId,
    pub part_name: String,
    pub date: DateTime<Utc>,
    pub kind: MovementKind,
    pub quantity: u32,
    pub note: String,
}

/// Newest `limit` movements across all parts.
///
/// Ties on date keep store order, then each part's own (newest-first) order.
pub fn recent_movements(parts: &[Part], limit: usize) -> Vec<MovementEntry> {
    let mut entries: Vec<MovementEntry> = parts
        .iter()
        .flat_map(|p| {
            p.movements.iter().map(move |m| MovementEntry {
                part_id: p.id,
                part_name: p.name.clone(),
                date: m.date,
                kind: m.kind,
                quantity: m.quantity,
                note: m.note.clone(),
            })
        })
        .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries.truncate(limit);
    entries
}

/// Per-category totals for the category charts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: Category,
    pub count: usize,
    pub stock_value: Money,
    pub potential_revenue: Money,
}

/// One entry per category that has at least one part, in catalogue order.
pub fn category_breakdown(parts: &[Part]) -> Vec<CategoryStats> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let mut stats = CategoryStats {
                category,
                count: 0,
                stock_value: Money::ZERO,
                potential_revenue: Money::ZERO,
            };
            for p in parts.iter().filter(|p| p.category == category) {
                stats.count += 1;
                stats.stock_value = stats.stock_value + p.stock_value();
                stats.potential_revenue = stats.potential_revenue + p.potential_revenue();
            }
            stats
        })
        .filter(|s| s.count > 0)
        .collect()
}

/// Number of parts in each stock status.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl StatusBreakdown {
    pub fn get(&self, status: StockStatus) -> usize {
        match status {
            StockStatus::InStock => self.in_stock,
            StockStatus::LowStock => self.low_stock,
            StockStatus::OutOfStock => self.out_of_stock,
        }
    }
}

pub fn status_breakdown(parts: &[Part]) -> StatusBreakdown {
    parts.iter().fold(StatusBreakdown::default(), |mut acc, p| {
        match p.status() {
            StockStatus::InStock => acc.in_stock += 1,
            StockStatus::LowStock => acc.low_stock += 1,
            StockStatus::OutOfStock => acc.out_of_stock += 1,
        }
        acc
    })
}

/// Search text for a brand/model pick ("Toyota Corolla", or just "Toyota").
pub fn vehicle_query(brand: &str, model: &str) -> String {
    format!("{brand} {model}").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::{PartDraft, StockMovement};
    use crate::seed;
    use chrono::TimeZone;

    fn part(name: &str, category: Category, stock: u32, min_stock: u32, models: &[&str]) -> Part {
        Part::from_draft(
            PartId::new(),
            PartDraft {
                name: name.to_string(),
                reference: format!("REF-{name}"),
                category,
                purchase_price: Money::from_cents(1000),
                sale_price: Money::from_cents(1500),
                stock,
                min_stock,
                compatible_models: models.iter().map(|m| m.to_string()).collect(),
                ..PartDraft::default()
            },
            Vec::new(),
        )
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let parts = seed::demo_parts();
        let all = filter(&parts, &PartQuery::default());
        let ids: Vec<_> = all.iter().map(|p| p.id).collect();
        let expected: Vec<_> = parts.iter().map(|p| p.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn text_search_is_case_insensitive_over_models() {
        let parts = seed::demo_parts();
        let hits = filter(&parts, &PartQuery::text("toyota"));
        let names: Vec<_> = hits.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Pastillas de Freno Delanteras", "Amortiguador Trasero"]);

        let hits = filter(&parts, &PartQuery::text("TOYOTA COROLLA"));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn text_search_covers_reference_and_description() {
        let parts = seed::demo_parts();
        assert_eq!(filter(&parts, &PartQuery::text("oil-flt")).len(), 1);
        assert_eq!(filter(&parts, &PartQuery::text("6000k")).len(), 1);
        assert!(filter(&parts, &PartQuery::text("turbo")).is_empty());
    }

    #[test]
    fn category_and_text_must_both_match() {
        let parts = seed::demo_parts();
        let frenos = filter(&parts, &PartQuery::new("", CategoryFilter::Only(Category::Frenos)));
        assert_eq!(frenos.len(), 1);

        let none = filter(&parts, &PartQuery::new("toyota", CategoryFilter::Only(Category::Motor)));
        assert!(none.is_empty());
    }

    #[test]
    fn category_filter_parses_sentinel_and_labels() {
        assert_eq!("All".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Suspensión".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Suspension)
        );
        assert!("all".parse::<CategoryFilter>().is_err());
        assert_eq!(CategoryFilter::Only(Category::Motor).to_string(), "Motor");
    }

    #[test]
    fn aggregate_demo_inventory() {
        let stats = aggregate(&seed::demo_parts());
        assert_eq!(stats.total_items, 4);
        assert_eq!(stats.total_stock, 29);
        assert_eq!(stats.low_stock, 1);
        assert_eq!(stats.out_of_stock, 1);
        // 15*25.50 + 2*8.00 + 0*40.00 + 12*30.00
        assert_eq!(stats.total_value, Money::from_cents(38_250 + 1_600 + 36_000));
    }

    #[test]
    fn aggregate_counts_min_stock_boundary_as_low() {
        let parts = vec![
            part("a", Category::Motor, 5, 5, &[]),
            part("b", Category::Motor, 6, 5, &[]),
            part("c", Category::Motor, 0, 0, &[]),
        ];
        let stats = aggregate(&parts);
        assert_eq!(stats.low_stock, 1);
        assert_eq!(stats.out_of_stock, 1);
        assert_eq!(aggregate(&parts), stats);
    }

    #[test]
    fn aggregate_of_nothing_is_zero() {
        assert_eq!(aggregate(&[]), InventoryStats::default());
    }

    #[test]
    fn recent_movements_sorted_newest_first_and_tagged() {
        let mut parts = seed::demo_parts();
        let later = Utc.with_ymd_and_hms(2023, 10, 3, 0, 0, 0).unwrap();
        parts[3]
            .movements
            .insert(0, StockMovement::new(MovementKind::In, 12, "Compra", later));

        let recent = recent_movements(&parts, 5);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].note, "Venta cliente #102");
        assert_eq!(recent[1].part_name, "Bombilla LED H7");
        assert_eq!(recent[1].part_id, parts[3].id);
        assert_eq!(recent[2].kind, MovementKind::In);

        assert_eq!(recent_movements(&parts, 1).len(), 1);
        assert!(recent_movements(&parts, 0).is_empty());
    }

    #[test]
    fn category_breakdown_skips_empty_categories() {
        let breakdown = category_breakdown(&seed::demo_parts());
        let categories: Vec<_> = breakdown.iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            vec![Category::Motor, Category::Suspension, Category::Frenos, Category::Iluminacion]
        );

        let frenos = breakdown.iter().find(|s| s.category == Category::Frenos).unwrap();
        assert_eq!(frenos.count, 1);
        assert_eq!(frenos.stock_value, Money::from_cents(38_250));
        assert_eq!(frenos.potential_revenue, Money::from_cents(67_500));
    }

    #[test]
    fn status_breakdown_matches_aggregate() {
        let parts = seed::demo_parts();
        let statuses = status_breakdown(&parts);
        let stats = aggregate(&parts);
        assert_eq!(statuses.in_stock, 2);
        assert_eq!(statuses.get(StockStatus::LowStock), stats.low_stock);
        assert_eq!(statuses.get(StockStatus::OutOfStock), stats.out_of_stock);
    }

    #[test]
    fn vehicle_query_trims_missing_model() {
        assert_eq!(vehicle_query("Toyota", "Corolla"), "Toyota Corolla");
        assert_eq!(vehicle_query("Toyota", ""), "Toyota");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_part() -> impl Strategy<Value = Part> {
            (
                "[A-Za-z ]{1,20}",
                proptest::sample::select(Category::ALL.to_vec()),
                0u32..100,
                0u32..20,
                0u64..10_000,
            )
                .prop_map(|(name, category, stock, min_stock, cents)| {
                    let mut p = part(&name, category, stock, min_stock, &["Honda Civic"]);
                    p.purchase_price = Money::from_cents(cents);
                    p
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 300,
                ..ProptestConfig::default()
            })]

            /// Property: totals are plain sums over the list.
            #[test]
            fn aggregate_totals_are_sums(parts in proptest::collection::vec(arb_part(), 0..40)) {
                let stats = aggregate(&parts);
                let stock: u64 = parts.iter().map(|p| u64::from(p.stock)).sum();
                let low = parts.iter().filter(|p| p.stock > 0 && p.stock <= p.min_stock).count();
                let out = parts.iter().filter(|p| p.stock == 0).count();

                prop_assert_eq!(stats.total_items, parts.len());
                prop_assert_eq!(stats.total_stock, stock);
                prop_assert_eq!(stats.low_stock, low);
                prop_assert_eq!(stats.out_of_stock, out);
                prop_assert_eq!(aggregate(&parts), stats);
            }

            /// Property: the empty query is the identity.
            #[test]
            fn empty_query_is_identity(parts in proptest::collection::vec(arb_part(), 0..40)) {
                let kept: Vec<Part> = filter(&parts, &PartQuery::default()).into_iter().cloned().collect();
                prop_assert_eq!(kept, parts);
            }

            /// Property: category breakdown counts add up to the list length.
            #[test]
            fn breakdown_counts_add_up(parts in proptest::collection::vec(arb_part(), 0..40)) {
                let counted: usize = category_breakdown(&parts).iter().map(|s| s.count).sum();
                prop_assert_eq!(counted, parts.len());
            }
        }
    }
}
