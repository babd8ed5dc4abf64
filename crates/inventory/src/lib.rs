//! Inventory domain module for automotive spare parts.
//!
//! - [`part`]: the entity model (parts, movements, categories, derived status)
//! - [`store`]: the owned in-memory store and its change events
//! - [`query`]: pure filtering and aggregation over a list of parts
//! - [`seed`]: demo data the application starts from

pub mod part;
pub mod query;
pub mod seed;
pub mod store;

pub use part::{Category, MovementKind, Part, PartDraft, StockMovement, StockStatus};
pub use query::{
    CategoryFilter, CategoryStats, InventoryStats, MovementEntry, PartQuery, StatusBreakdown,
    aggregate, category_breakdown, filter, recent_movements, status_breakdown, vehicle_query,
};
pub use store::{
    AddPart, AdjustStock, InventoryEvent, InventoryStore, PartAdded, PartDeleted, PartUpdated,
    StockAdjusted, StockAdjustment,
};
