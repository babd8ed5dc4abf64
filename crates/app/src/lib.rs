//! `autoparts-app` — the application layer over the inventory core.
//!
//! Owns what a UI root would otherwise keep as ambient state: the store, the
//! active search/category filter and the selected part. Views read derived
//! snapshots from the session and never touch the store directly.

pub mod config;
pub mod dashboard;
pub mod form;
pub mod seed_file;
pub mod session;

pub use config::{AppConfig, ConfigError};
pub use dashboard::{AnalyticsView, CategorySlice, DashboardView, StatusBar};
pub use form::PartForm;
pub use seed_file::SeedError;
pub use session::{Confirm, Direction, InventorySession, DELETE_PROMPT};
