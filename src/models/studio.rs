//! Studio catalog models

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

/// Rentable add-on attached to a room, billed per booking by quantity
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub available: bool,
}

/// Bookable room with its own hourly rate and instrument catalog
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_hour: Decimal,
    pub min_hours: i32,
    #[serde(default)]
    pub instruments: Vec<Instrument>,
}

impl Room {
    pub fn instrument(&self, id: Uuid) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.id == id)
    }
}

/// Studio detail from `GET /studios/{id}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Studio {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl Studio {
    pub fn room(&self, id: Uuid) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }
}

/// Studio listing entry from `GET /studios`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioSummary {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub room_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_studio_deserializes_nested_catalog() {
        let json = r#"{
            "id": "4f5c8a0e-1111-2222-3333-444455556666",
            "name": "Echo Chamber",
            "description": "Two live rooms in Shimokitazawa",
            "rooms": [
                {
                    "id": "4f5c8a0e-aaaa-bbbb-cccc-dddd11112222",
                    "name": "Room A",
                    "pricePerHour": "3500",
                    "minHours": 2,
                    "instruments": [
                        {"id": "4f5c8a0e-9999-8888-7777-666655554444", "name": "DW drum kit", "price": "1500", "available": true}
                    ]
                }
            ]
        }"#;
        let studio: Studio = serde_json::from_str(json).unwrap();
        let room = studio.room(studio.rooms[0].id).unwrap();
        assert_eq!(room.price_per_hour, dec!(3500));
        assert_eq!(room.min_hours, 2);
        assert!(room.instrument(room.instruments[0].id).is_some());
    }
}
