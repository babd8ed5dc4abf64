use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use autoparts_core::{DomainError, Entity, Money, MovementId, PartId};

/// Fixed classification taxonomy for parts.
///
/// Serialized (and displayed) with the catalogue labels used on screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Motor")]
    Motor,
    #[serde(rename = "Suspensión")]
    Suspension,
    #[serde(rename = "Frenos")]
    Frenos,
    #[serde(rename = "Iluminación")]
    Iluminacion,
    #[serde(rename = "Carrocería")]
    Carroceria,
    #[serde(rename = "Electrónica")]
    Electronica,
}

impl Category {
    /// Every category, in catalogue order.
    pub const ALL: [Category; 6] = [
        Category::Motor,
        Category::Suspension,
        Category::Frenos,
        Category::Iluminacion,
        Category::Carroceria,
        Category::Electronica,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Motor => "Motor",
            Category::Suspension => "Suspensión",
            Category::Frenos => "Frenos",
            Category::Iluminacion => "Iluminación",
            Category::Carroceria => "Carrocería",
            Category::Electronica => "Electrónica",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl core::str::FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown category: {s}")))
    }
}

/// Stock level classification, derived from `stock` and `min_stock`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// `stock == min_stock` is low, never in stock.
    pub fn of(stock: u32, min_stock: u32) -> Self {
        if stock == 0 {
            StockStatus::OutOfStock
        } else if stock <= min_stock {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StockStatus::InStock => "En stock",
            StockStatus::LowStock => "Bajo stock",
            StockStatus::OutOfStock => "Agotado",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction of a stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementKind {
    In,
    Out,
}

impl MovementKind {
    /// `In` for positive deltas, `Out` otherwise.
    pub fn for_delta(delta: i64) -> Self {
        if delta > 0 { MovementKind::In } else { MovementKind::Out }
    }
}

/// A single recorded stock change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: MovementId,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub quantity: u32,
    pub note: String,
}

impl StockMovement {
    pub fn new(kind: MovementKind, quantity: u32, note: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: MovementId::new(),
            date,
            kind,
            quantity,
            note: note.into(),
        }
    }

    /// Signed effect of this movement as recorded.
    pub fn signed_quantity(&self) -> i64 {
        match self.kind {
            MovementKind::In => i64::from(self.quantity),
            MovementKind::Out => -i64::from(self.quantity),
        }
    }
}

/// Everything needed to create a part; the store assigns identity and
/// history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartDraft {
    pub name: String,
    pub reference: String,
    pub description: String,
    pub category: Category,
    pub brand: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    pub purchase_price: Money,
    pub sale_price: Money,
    pub stock: u32,
    pub min_stock: u32,
    #[serde(default)]
    pub compatible_models: Vec<String>,
}

impl Default for PartDraft {
    /// Blank form defaults: `Motor`, minimum stock 5, fits "Universal".
    fn default() -> Self {
        Self {
            name: String::new(),
            reference: String::new(),
            description: String::new(),
            category: Category::Motor,
            brand: String::new(),
            image_url: String::new(),
            barcode: None,
            purchase_price: Money::ZERO,
            sale_price: Money::ZERO,
            stock: 0,
            min_stock: 5,
            compatible_models: vec!["Universal".to_string()],
        }
    }
}

/// A stocked spare-part record.
///
/// `movements` is kept newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    pub name: String,
    pub reference: String,
    pub description: String,
    pub category: Category,
    pub brand: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    pub purchase_price: Money,
    pub sale_price: Money,
    pub stock: u32,
    pub min_stock: u32,
    #[serde(default)]
    pub compatible_models: Vec<String>,
    #[serde(default)]
    pub movements: Vec<StockMovement>,
}

impl Part {
    pub fn from_draft(id: PartId, draft: PartDraft, movements: Vec<StockMovement>) -> Self {
        Self {
            id,
            name: draft.name,
            reference: draft.reference,
            description: draft.description,
            category: draft.category,
            brand: draft.brand,
            image_url: draft.image_url,
            barcode: draft.barcode,
            purchase_price: draft.purchase_price,
            sale_price: draft.sale_price,
            stock: draft.stock,
            min_stock: draft.min_stock,
            compatible_models: draft.compatible_models,
            movements,
        }
    }

    /// The editable fields of this part, e.g. to prefill an edit form.
    pub fn to_draft(&self) -> PartDraft {
        PartDraft {
            name: self.name.clone(),
            reference: self.reference.clone(),
            description: self.description.clone(),
            category: self.category,
            brand: self.brand.clone(),
            image_url: self.image_url.clone(),
            barcode: self.barcode.clone(),
            purchase_price: self.purchase_price,
            sale_price: self.sale_price,
            stock: self.stock,
            min_stock: self.min_stock,
            compatible_models: self.compatible_models.clone(),
        }
    }

    /// Overwrite the editable fields, keeping identity and movement history.
    pub fn apply_draft(&mut self, draft: PartDraft) {
        let movements = core::mem::take(&mut self.movements);
        *self = Part::from_draft(self.id, draft, movements);
    }

    pub fn status(&self) -> StockStatus {
        StockStatus::of(self.stock, self.min_stock)
    }

    /// Stock valued at purchase price.
    pub fn stock_value(&self) -> Money {
        self.purchase_price.times(self.stock)
    }

    /// Stock valued at sale price.
    pub fn potential_revenue(&self) -> Money {
        self.sale_price.times(self.stock)
    }

    /// Case-insensitive substring match over name, reference, description
    /// and compatible models. `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let hit = |s: &str| s.to_lowercase().contains(needle);
        hit(&self.name)
            || hit(&self.reference)
            || hit(&self.description)
            || self.compatible_models.iter().any(|m| hit(m))
    }
}

impl Entity for Part {
    type Id = PartId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(stock: u32, min_stock: u32) -> Part {
        Part::from_draft(
            PartId::from_u128(1),
            PartDraft {
                name: "Amortiguador Trasero".to_string(),
                reference: "SUS-SHK-05".to_string(),
                description: "Amortiguador a gas.".to_string(),
                category: Category::Suspension,
                purchase_price: Money::from_cents(4000),
                sale_price: Money::from_cents(7500),
                stock,
                min_stock,
                compatible_models: vec!["Toyota Hilux".to_string(), "Ford Ranger".to_string()],
                ..PartDraft::default()
            },
            Vec::new(),
        )
    }

    #[test]
    fn status_boundaries() {
        assert_eq!(StockStatus::of(0, 0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::of(0, 5), StockStatus::OutOfStock);
        assert_eq!(StockStatus::of(1, 5), StockStatus::LowStock);
        assert_eq!(StockStatus::of(5, 5), StockStatus::LowStock);
        assert_eq!(StockStatus::of(6, 5), StockStatus::InStock);
        assert_eq!(StockStatus::of(1, 0), StockStatus::InStock);
    }

    #[test]
    fn category_labels_round_trip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
        }
        assert!("Ruedas".parse::<Category>().is_err());
    }

    #[test]
    fn category_serializes_with_label() {
        let json = serde_json::to_string(&Category::Iluminacion).unwrap();
        assert_eq!(json, "\"Iluminación\"");
    }

    #[test]
    fn movement_kind_follows_delta_sign() {
        assert_eq!(MovementKind::for_delta(3), MovementKind::In);
        assert_eq!(MovementKind::for_delta(-3), MovementKind::Out);
        let json = serde_json::to_string(&MovementKind::Out).unwrap();
        assert_eq!(json, "\"OUT\"");
    }

    #[test]
    fn valuation_uses_stock() {
        let p = part(3, 2);
        assert_eq!(p.stock_value(), Money::from_cents(12_000));
        assert_eq!(p.potential_revenue(), Money::from_cents(22_500));
        assert_eq!(p.status(), StockStatus::InStock);
    }

    #[test]
    fn text_matching_covers_models() {
        let p = part(0, 2);
        assert!(p.matches_text(""));
        assert!(p.matches_text("hilux"));
        assert!(p.matches_text("shk"));
        assert!(p.matches_text("a gas"));
        assert!(!p.matches_text("corolla"));
    }

    #[test]
    fn apply_draft_keeps_identity_and_history() {
        let mut p = part(4, 2);
        p.movements.push(StockMovement::new(MovementKind::In, 4, "Stock inicial", Utc::now()));

        let mut draft = p.to_draft();
        draft.name = "Amortiguador Delantero".to_string();
        p.apply_draft(draft);

        assert_eq!(p.id, PartId::from_u128(1));
        assert_eq!(p.name, "Amortiguador Delantero");
        assert_eq!(p.movements.len(), 1);
    }
}
