use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use autoparts_core::{DomainError, DomainResult, Entity, MovementId, PartId};
use autoparts_events::{Event, EventBus, InMemoryEventBus, Subscription};

use crate::part::{MovementKind, Part, PartDraft, StockMovement};

/// Note recorded on the movement seeded when a part is created.
pub const INITIAL_STOCK_NOTE: &str = "Stock inicial";

/// Note recorded when an edit changes the stock count directly.
pub const EDIT_ADJUSTMENT_NOTE: &str = "Ajuste por edición";

/// Command: AddPart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddPart {
    pub draft: PartDraft,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AdjustStock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustStock {
    pub part_id: PartId,
    pub delta: i64,
    pub note: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PartAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartAdded {
    pub part_id: PartId,
    pub name: String,
    pub initial_stock: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PartUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartUpdated {
    pub part_id: PartId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PartDeleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartDeleted {
    pub part_id: PartId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockAdjusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjusted {
    pub part_id: PartId,
    pub movement_id: MovementId,
    pub delta: i64,
    pub new_stock: u32,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    PartAdded(PartAdded),
    PartUpdated(PartUpdated),
    PartDeleted(PartDeleted),
    StockAdjusted(StockAdjusted),
}

impl InventoryEvent {
    pub fn part_id(&self) -> PartId {
        match self {
            InventoryEvent::PartAdded(e) => e.part_id,
            InventoryEvent::PartUpdated(e) => e.part_id,
            InventoryEvent::PartDeleted(e) => e.part_id,
            InventoryEvent::StockAdjusted(e) => e.part_id,
        }
    }
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::PartAdded(_) => "inventory.part.added",
            InventoryEvent::PartUpdated(_) => "inventory.part.updated",
            InventoryEvent::PartDeleted(_) => "inventory.part.deleted",
            InventoryEvent::StockAdjusted(_) => "inventory.part.stock_adjusted",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::PartAdded(e) => e.occurred_at,
            InventoryEvent::PartUpdated(e) => e.occurred_at,
            InventoryEvent::PartDeleted(e) => e.occurred_at,
            InventoryEvent::StockAdjusted(e) => e.occurred_at,
        }
    }
}

/// Outcome of a stock adjustment.
///
/// The recorded movement always carries the requested quantity; when the zero
/// floor absorbs part of a decrease, `applied()` is smaller than
/// `requested()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAdjustment {
    pub part_id: PartId,
    pub movement: StockMovement,
    pub previous_stock: u32,
    pub new_stock: u32,
}

impl StockAdjustment {
    pub fn requested(&self) -> u32 {
        self.movement.quantity
    }

    pub fn applied(&self) -> u32 {
        self.previous_stock.abs_diff(self.new_stock)
    }

    pub fn was_clamped(&self) -> bool {
        self.applied() != self.requested()
    }
}

/// Owned in-memory store of parts.
///
/// Holds the canonical ordered list and publishes one [`InventoryEvent`] per
/// successful mutation. Mutations take `&mut self`, so each runs to completion
/// before the next one starts.
#[derive(Debug)]
pub struct InventoryStore<B = InMemoryEventBus<InventoryEvent>> {
    parts: Vec<Part>,
    bus: B,
}

impl InventoryStore<InMemoryEventBus<InventoryEvent>> {
    /// Empty store with its own in-memory bus.
    pub fn new() -> Self {
        Self {
            parts: Vec::new(),
            bus: InMemoryEventBus::new(),
        }
    }

    /// Store seeded with `parts`; see [`InventoryStore::with_bus`].
    pub fn with_parts(parts: Vec<Part>) -> DomainResult<Self> {
        Self::with_bus(InMemoryEventBus::new(), parts)
    }
}

impl Default for InventoryStore<InMemoryEventBus<InventoryEvent>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> InventoryStore<B>
where
    B: EventBus<InventoryEvent>,
{
    /// Build a store over a caller-supplied bus.
    ///
    /// Seed data is taken as-is (no movements are synthesized) but part ids
    /// must be unique.
    pub fn with_bus(bus: B, parts: Vec<Part>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(parts.len());
        for part in &parts {
            if !seen.insert(part.id) {
                return Err(DomainError::conflict(format!("duplicate part id {}", part.id)));
            }
        }
        tracing::debug!(parts = parts.len(), "inventory store seeded");
        Ok(Self { parts, bus })
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn get(&self, id: &PartId) -> Option<&Part> {
        self.parts.iter().find(|p| p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Subscribe to change events for every later mutation.
    pub fn subscribe(&self) -> Subscription<InventoryEvent> {
        self.bus.subscribe()
    }

    /// Create a part from a draft.
    ///
    /// Assigns a fresh id and seeds a single IN movement for the initial stock.
    pub fn add_part(&mut self, cmd: AddPart) -> &Part {
        let AddPart { draft, occurred_at } = cmd;
        let initial_stock = draft.stock;
        let movement = StockMovement::new(MovementKind::In, initial_stock, INITIAL_STOCK_NOTE, occurred_at);

        let part = Part::from_draft(PartId::new(), draft, vec![movement]);
        let part_id = part.id;
        let name = part.name.clone();

        tracing::info!(part_id = %part_id, name = %name, initial_stock, "part added");
        self.parts.push(part);
        self.publish(InventoryEvent::PartAdded(PartAdded {
            part_id,
            name,
            initial_stock,
            occurred_at,
        }));

        &self.parts[self.parts.len() - 1]
    }

    /// Replace the stored record with the same id, keeping its position.
    ///
    /// The replacement must carry the stored movement history unchanged. If
    /// its `stock` differs from the stored value, one movement for the
    /// difference is prepended so every stock change stays on record.
    pub fn update_part(&mut self, part: Part, occurred_at: DateTime<Utc>) -> DomainResult<&Part> {
        let idx = self.position(&part.id)?;
        let stored = &self.parts[idx];
        if part.movements != stored.movements {
            return Err(DomainError::invariant("movement history cannot be edited"));
        }

        let previous_stock = stored.stock;
        let mut part = part;
        if part.stock != previous_stock {
            let diff = i64::from(part.stock) - i64::from(previous_stock);
            let movement = StockMovement::new(
                MovementKind::for_delta(diff),
                previous_stock.abs_diff(part.stock),
                EDIT_ADJUSTMENT_NOTE,
                occurred_at,
            );
            part.movements.insert(0, movement);
            tracing::info!(
                part_id = %part.id,
                previous_stock,
                new_stock = part.stock,
                "stock changed by edit; movement recorded"
            );
        }

        let part_id = part.id;
        self.parts[idx] = part;
        tracing::info!(part_id = %part_id, "part updated");
        self.publish(InventoryEvent::PartUpdated(PartUpdated { part_id, occurred_at }));

        Ok(&self.parts[idx])
    }

    /// Remove a part entirely, returning the removed record.
    pub fn delete_part(&mut self, id: &PartId, occurred_at: DateTime<Utc>) -> DomainResult<Part> {
        let idx = self.position(id)?;
        let removed = self.parts.remove(idx);

        tracing::info!(part_id = %removed.id, name = %removed.name, "part deleted");
        self.publish(InventoryEvent::PartDeleted(PartDeleted {
            part_id: removed.id,
            occurred_at,
        }));

        Ok(removed)
    }

    /// Apply a signed stock delta, clamping at zero.
    ///
    /// Prepends one movement whose quantity is `|delta|`. Deltas whose size,
    /// or whose resulting stock, does not fit a `u32` count are rejected.
    pub fn adjust_stock(&mut self, cmd: AdjustStock) -> DomainResult<StockAdjustment> {
        if cmd.delta == 0 {
            return Err(DomainError::validation("delta cannot be zero"));
        }
        let quantity = u32::try_from(cmd.delta.unsigned_abs())
            .map_err(|_| DomainError::validation(format!("delta {} is out of range", cmd.delta)))?;
        let idx = self.position(&cmd.part_id)?;
        let part = &mut self.parts[idx];

        let previous_stock = part.stock;
        let new_stock = u32::try_from((i64::from(previous_stock) + cmd.delta).max(0)).map_err(|_| {
            DomainError::validation(format!(
                "stock {previous_stock} + {} exceeds the maximum stock count",
                cmd.delta
            ))
        })?;
        let movement = StockMovement::new(
            MovementKind::for_delta(cmd.delta),
            quantity,
            cmd.note,
            cmd.occurred_at,
        );

        part.stock = new_stock;
        part.movements.insert(0, movement.clone());

        let adjustment = StockAdjustment {
            part_id: cmd.part_id,
            movement,
            previous_stock,
            new_stock,
        };

        if adjustment.was_clamped() {
            tracing::warn!(
                part_id = %cmd.part_id,
                requested = adjustment.requested(),
                applied = adjustment.applied(),
                "stock decrease exceeded available stock; clamped at zero"
            );
        }
        tracing::info!(
            part_id = %cmd.part_id,
            delta = cmd.delta,
            previous_stock,
            new_stock,
            "stock adjusted"
        );

        self.publish(InventoryEvent::StockAdjusted(StockAdjusted {
            part_id: cmd.part_id,
            movement_id: adjustment.movement.id,
            delta: cmd.delta,
            new_stock,
            occurred_at: cmd.occurred_at,
        }));

        Ok(adjustment)
    }

    fn position(&self, id: &PartId) -> DomainResult<usize> {
        self.parts
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(DomainError::not_found)
    }

    // The mutation has already happened; a failed publish only costs the
    // subscribers one refresh.
    fn publish(&self, event: InventoryEvent) {
        let event_type = event.event_type();
        if let Err(err) = self.bus.publish(event) {
            tracing::warn!(event_type, error = %err, "failed to publish inventory event");
        }
    }
}
