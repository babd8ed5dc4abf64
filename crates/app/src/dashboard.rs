//! View models for the dashboard and analytics screens.
//!
//! Pure snapshots: built from the current part list, serializable, and
//! rebuilt after every change.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use autoparts_core::Money;
use autoparts_inventory::{
    Category, CategoryStats, InventoryStats, MovementEntry, MovementKind, Part, StockStatus,
    aggregate, category_breakdown, recent_movements, status_breakdown,
};

/// Category share of distinct parts (pie chart).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub category: Category,
    pub count: usize,
}

/// Parts per stock status (bar chart); empty statuses are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBar {
    pub status: StockStatus,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    pub stats: InventoryStats,
    pub categories: Vec<CategorySlice>,
    pub statuses: Vec<StatusBar>,
    pub recent_movements: Vec<MovementEntry>,
}

impl DashboardView {
    pub fn build(parts: &[Part], recent_limit: usize) -> Self {
        let breakdown = status_breakdown(parts);
        let statuses = [StockStatus::InStock, StockStatus::LowStock, StockStatus::OutOfStock]
            .into_iter()
            .map(|status| StatusBar {
                status,
                label: status.label().to_string(),
                count: breakdown.get(status),
            })
            .filter(|bar| bar.count > 0)
            .collect();

        Self {
            stats: aggregate(parts),
            categories: category_breakdown(parts)
                .into_iter()
                .map(|s| CategorySlice {
                    category: s.category,
                    count: s.count,
                })
                .collect(),
            statuses,
            recent_movements: recent_movements(parts, recent_limit),
        }
    }
}

/// Units moved in and out on one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMovements {
    pub date: NaiveDate,
    pub inbound: u64,
    pub outbound: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsView {
    pub categories: Vec<CategoryStats>,
    pub total_value: Money,
    pub total_potential_revenue: Money,
    pub daily_movements: Vec<DailyMovements>,
}

impl AnalyticsView {
    pub fn build(parts: &[Part]) -> Self {
        let categories = category_breakdown(parts);
        Self {
            total_value: categories.iter().map(|s| s.stock_value).sum(),
            total_potential_revenue: categories.iter().map(|s| s.potential_revenue).sum(),
            categories,
            daily_movements: daily_movements(parts),
        }
    }
}

/// Movement totals per day, oldest day first.
pub fn daily_movements(parts: &[Part]) -> Vec<DailyMovements> {
    let mut days: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    for m in parts.iter().flat_map(|p| p.movements.iter()) {
        let entry = days.entry(m.date.date_naive()).or_default();
        match m.kind {
            MovementKind::In => entry.0 += u64::from(m.quantity),
            MovementKind::Out => entry.1 += u64::from(m.quantity),
        }
    }
    days.into_iter()
        .map(|(date, (inbound, outbound))| DailyMovements { date, inbound, outbound })
        .collect()
}
