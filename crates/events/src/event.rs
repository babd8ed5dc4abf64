use chrono::{DateTime, Utc};

/// A domain-agnostic change event.
///
/// Events are facts about a mutation that already happened; they are never
/// edited after being published.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "inventory.part.added").
    fn event_type(&self) -> &'static str;

    /// When the mutation occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}
