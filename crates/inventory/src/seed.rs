//! Demo inventory the application starts from when no seed file is given.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use autoparts_core::{Money, MovementId, PartId};

use crate::part::{Category, MovementKind, Part, StockMovement};

fn day(year: i32, month: u32, date: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, date)
        .unwrap_or_default()
        .and_time(NaiveTime::default())
        .and_utc()
}

fn models(list: &[&str]) -> Vec<String> {
    list.iter().map(|m| m.to_string()).collect()
}

/// Four parts with fixed ids: one per stock status plus a well-stocked
/// part with purchase history.
pub fn demo_parts() -> Vec<Part> {
    vec![
        Part {
            id: PartId::from_u128(1),
            name: "Pastillas de Freno Delanteras".to_string(),
            reference: "BRK-99201".to_string(),
            description: "Pastillas de cerámica de alto rendimiento para clima cálido.".to_string(),
            category: Category::Frenos,
            brand: "Brembo".to_string(),
            image_url: "https://images.unsplash.com/photo-1486001029854-f745c85fd5a4?auto=format&fit=crop&q=80&w=200&h=200".to_string(),
            barcode: Some("741258963".to_string()),
            purchase_price: Money::from_cents(2550),
            sale_price: Money::from_cents(4500),
            stock: 15,
            min_stock: 5,
            compatible_models: models(&["Toyota Corolla", "Honda Civic"]),
            movements: vec![
                StockMovement {
                    id: MovementId::from_u128(0x102),
                    date: day(2023, 10, 5),
                    kind: MovementKind::Out,
                    quantity: 5,
                    note: "Venta cliente #102".to_string(),
                },
                StockMovement {
                    id: MovementId::from_u128(0x101),
                    date: day(2023, 10, 1),
                    kind: MovementKind::In,
                    quantity: 20,
                    note: "Compra inicial proveedor".to_string(),
                },
            ],
        },
        Part {
            id: PartId::from_u128(2),
            name: "Filtro de Aceite Sintético".to_string(),
            reference: "OIL-FLT-22".to_string(),
            description: "Filtro premium de larga duración (15,000 km).".to_string(),
            category: Category::Motor,
            brand: "Mann Filter".to_string(),
            image_url: "https://images.unsplash.com/photo-1635773054018-02905001a1d6?auto=format&fit=crop&q=80&w=200&h=200".to_string(),
            barcode: None,
            purchase_price: Money::from_cents(800),
            sale_price: Money::from_cents(1500),
            stock: 2,
            min_stock: 10,
            compatible_models: models(&["Chevrolet Cruze", "Ford Focus"]),
            movements: Vec::new(),
        },
        Part {
            id: PartId::from_u128(3),
            name: "Amortiguador Trasero".to_string(),
            reference: "SUS-SHK-05".to_string(),
            description: "Amortiguador a gas para máxima estabilidad.".to_string(),
            category: Category::Suspension,
            brand: "KYB".to_string(),
            image_url: "https://images.unsplash.com/photo-1599256621730-535171e28e50?auto=format&fit=crop&q=80&w=200&h=200".to_string(),
            barcode: None,
            purchase_price: Money::from_cents(4000),
            sale_price: Money::from_cents(7500),
            stock: 0,
            min_stock: 2,
            compatible_models: models(&["Toyota Hilux", "Ford Ranger"]),
            movements: Vec::new(),
        },
        Part {
            id: PartId::from_u128(4),
            name: "Bombilla LED H7".to_string(),
            reference: "LGT-H7-LED".to_string(),
            description: "Kit de luces LED blancas 6000K.".to_string(),
            category: Category::Iluminacion,
            brand: "Philips".to_string(),
            image_url: "https://images.unsplash.com/photo-1511994298241-608e28f14fde?auto=format&fit=crop&q=80&w=200&h=200".to_string(),
            barcode: None,
            purchase_price: Money::from_cents(3000),
            sale_price: Money::from_cents(5500),
            stock: 12,
            min_stock: 4,
            compatible_models: models(&["Honda CR-V", "Nissan Sentra"]),
            movements: Vec::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::StockStatus;

    #[test]
    fn demo_parts_cover_every_status() {
        let statuses: Vec<_> = demo_parts().iter().map(Part::status).collect();
        assert!(statuses.contains(&StockStatus::InStock));
        assert!(statuses.contains(&StockStatus::LowStock));
        assert!(statuses.contains(&StockStatus::OutOfStock));
    }

    #[test]
    fn demo_movements_are_newest_first() {
        let parts = demo_parts();
        let history = &parts[0].movements;
        assert!(history.windows(2).all(|w| w[0].date >= w[1].date));
        assert_eq!(history[1].date, day(2023, 10, 1));
    }

    #[test]
    fn demo_parts_survive_json() {
        let parts = demo_parts();
        let json = serde_json::to_string(&parts).unwrap();
        let back: Vec<Part> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, parts);
    }
}
