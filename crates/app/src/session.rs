use chrono::{DateTime, Utc};

use autoparts_core::{DomainError, DomainResult, PartId};
use autoparts_events::Subscription;
use autoparts_inventory::{
    AddPart, AdjustStock, CategoryFilter, InventoryEvent, InventoryStats, InventoryStore, Part,
    PartDraft, PartQuery, StockAdjustment, aggregate, filter, vehicle_query,
};

use crate::config::DEFAULT_RECENT_LIMIT;
use crate::dashboard::{AnalyticsView, DashboardView};
use crate::form::PartForm;

/// Question asked before a part is deleted.
pub const DELETE_PROMPT: &str = "¿Estás seguro de que deseas eliminar esta pieza?";

/// Blocking yes/no prompt gating destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Direction of a manual stock adjustment.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    /// Note used when the user leaves the note field empty.
    pub fn default_note(self) -> &'static str {
        match self {
            Direction::In => "Entrada manual",
            Direction::Out => "Salida manual",
        }
    }

    fn signed(self, amount: u32) -> i64 {
        match self {
            Direction::In => i64::from(amount),
            Direction::Out => -i64::from(amount),
        }
    }
}

/// One user's working session over an owned inventory store.
///
/// Holds the active search, the category filter and the selected part. The
/// selection is kept by id, so it always shows the stored record.
#[derive(Debug)]
pub struct InventorySession {
    store: InventoryStore,
    query: PartQuery,
    selected: Option<PartId>,
    recent_limit: usize,
    clock: fn() -> DateTime<Utc>,
}

impl InventorySession {
    pub fn new(store: InventoryStore) -> Self {
        Self {
            store,
            query: PartQuery::default(),
            selected: None,
            recent_limit: DEFAULT_RECENT_LIMIT,
            clock: Utc::now,
        }
    }

    pub fn with_recent_limit(mut self, recent_limit: usize) -> Self {
        self.recent_limit = recent_limit;
        self
    }

    /// Replace the timestamp source used for new movements and events.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    pub fn parts(&self) -> &[Part] {
        self.store.parts()
    }

    pub fn subscribe(&self) -> Subscription<InventoryEvent> {
        self.store.subscribe()
    }

    // --- search & filter ---

    pub fn query(&self) -> &PartQuery {
        &self.query
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.query.text = text.into();
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.query.category = category;
    }

    /// Clears the search text; the category filter stays.
    pub fn clear_search(&mut self) {
        self.query.text.clear();
    }

    /// Search for a brand/model pick across every category.
    pub fn quick_search(&mut self, brand: &str, model: &str) {
        self.query = PartQuery::new(vehicle_query(brand, model), CategoryFilter::All);
        tracing::debug!(query = %self.query.text, "vehicle quick search");
    }

    pub fn filtered(&self) -> Vec<&Part> {
        filter(self.store.parts(), &self.query)
    }

    // --- derived views ---

    pub fn stats(&self) -> InventoryStats {
        aggregate(self.store.parts())
    }

    pub fn dashboard(&self) -> DashboardView {
        DashboardView::build(self.store.parts(), self.recent_limit)
    }

    pub fn analytics(&self) -> AnalyticsView {
        AnalyticsView::build(self.store.parts())
    }

    // --- selection ---

    pub fn select(&mut self, id: PartId) -> DomainResult<&Part> {
        let part = self.store.get(&id).ok_or_else(DomainError::not_found)?;
        self.selected = Some(id);
        Ok(part)
    }

    pub fn selected(&self) -> Option<&Part> {
        self.selected.as_ref().and_then(|id| self.store.get(id))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // --- mutations ---

    pub fn add_part(&mut self, draft: PartDraft) -> &Part {
        let occurred_at = (self.clock)();
        self.store.add_part(AddPart { draft, occurred_at })
    }

    pub fn update_part(&mut self, part: Part) -> DomainResult<&Part> {
        let occurred_at = (self.clock)();
        self.store.update_part(part, occurred_at)
    }

    /// Submit the part form: creates a part, or overwrites the editable
    /// fields of `editing` while keeping its id and history.
    pub fn submit_form(&mut self, editing: Option<PartId>, form: PartForm) -> DomainResult<&Part> {
        let draft = form.into_draft();
        match editing {
            None => Ok(self.add_part(draft)),
            Some(id) => {
                let mut part = self.store.get(&id).cloned().ok_or_else(DomainError::not_found)?;
                part.apply_draft(draft);
                self.update_part(part)
            }
        }
    }

    /// Delete after confirmation. Returns `Ok(false)` when the user declines.
    pub fn delete_part(&mut self, id: PartId, confirm: &dyn Confirm) -> DomainResult<bool> {
        if self.store.get(&id).is_none() {
            return Err(DomainError::not_found());
        }
        if !confirm.confirm(DELETE_PROMPT) {
            tracing::debug!(part_id = %id, "delete declined");
            return Ok(false);
        }

        let occurred_at = (self.clock)();
        self.store.delete_part(&id, occurred_at)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Ok(true)
    }

    /// Manual stock entry/exit. A zero amount is ignored (`Ok(None)`); an
    /// empty note is replaced by the direction's default note.
    pub fn adjust_stock(
        &mut self,
        id: PartId,
        direction: Direction,
        amount: u32,
        note: &str,
    ) -> DomainResult<Option<StockAdjustment>> {
        if amount == 0 {
            return Ok(None);
        }
        let note = match note.trim() {
            "" => direction.default_note().to_string(),
            given => given.to_string(),
        };

        self.store
            .adjust_stock(AdjustStock {
                part_id: id,
                delta: direction.signed(amount),
                note,
                occurred_at: (self.clock)(),
            })
            .map(Some)
    }
}
