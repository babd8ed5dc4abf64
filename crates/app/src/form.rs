//! Raw form input for creating and editing parts.
//!
//! Fields arrive as text. Numbers are read from the leading digits of the
//! field ("12 uds" is 12); a field with no leading number, or a negative
//! one, becomes 0 instead of failing the submission.

use serde::{Deserialize, Serialize};

use autoparts_core::Money;
use autoparts_inventory::{Category, Part, PartDraft};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartForm {
    pub name: String,
    pub reference: String,
    pub description: String,
    /// Category label; anything unknown falls back to `Motor`.
    pub category: String,
    pub brand: String,
    pub image_url: String,
    pub barcode: String,
    pub purchase_price: String,
    pub sale_price: String,
    pub stock: String,
    pub min_stock: String,
    /// Comma-separated vehicle models.
    pub compatible_models: String,
}

impl PartForm {
    /// Prefill from an existing part (edit dialog).
    pub fn from_part(part: &Part) -> Self {
        Self {
            name: part.name.clone(),
            reference: part.reference.clone(),
            description: part.description.clone(),
            category: part.category.label().to_string(),
            brand: part.brand.clone(),
            image_url: part.image_url.clone(),
            barcode: part.barcode.clone().unwrap_or_default(),
            purchase_price: format_price(part.purchase_price),
            sale_price: format_price(part.sale_price),
            stock: part.stock.to_string(),
            min_stock: part.min_stock.to_string(),
            compatible_models: part.compatible_models.join(", "),
        }
    }

    pub fn into_draft(self) -> PartDraft {
        let defaults = PartDraft::default();
        let models = split_models(&self.compatible_models);
        let barcode = self.barcode.trim();

        PartDraft {
            name: self.name.trim().to_string(),
            reference: self.reference.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.trim().parse::<Category>().unwrap_or(defaults.category),
            brand: self.brand.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            barcode: (!barcode.is_empty()).then(|| barcode.to_string()),
            purchase_price: parse_price(&self.purchase_price),
            sale_price: parse_price(&self.sale_price),
            stock: parse_count(&self.stock),
            min_stock: parse_count(&self.min_stock),
            compatible_models: if models.is_empty() { defaults.compatible_models } else { models },
        }
    }
}

/// Whole units from the leading digits ("12.7" is 12). Counts too large for
/// a `u32` saturate.
pub fn parse_count(raw: &str) -> u32 {
    let digits = numeric_prefix(raw, false);
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u32::MAX)
}

/// Decimal amount in currency units from the leading number ("25.5" is 2550
/// cents, "12abc" is 1200).
pub fn parse_price(raw: &str) -> Money {
    match numeric_prefix(raw, true).parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Money::from_cents((v * 100.0).round() as u64),
        _ => Money::ZERO,
    }
}

/// Longest leading run of digits, with at most one decimal point when
/// `fraction` is set. An optional `+` sign is skipped; a `-` sign yields "".
fn numeric_prefix(raw: &str, fraction: bool) -> &str {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let mut seen_point = false;
    let end = unsigned
        .char_indices()
        .find(|&(_, c)| match c {
            '0'..='9' => false,
            '.' if fraction && !seen_point => {
                seen_point = true;
                false
            }
            _ => true,
        })
        .map_or(unsigned.len(), |(i, _)| i);
    &unsigned[..end]
}

fn format_price(amount: Money) -> String {
    format!("{}.{:02}", amount.cents() / 100, amount.cents() % 100)
}

fn split_models(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
