//! Room and instrument selection state for the booking form.
//!
//! Instrument quantities are only meaningful relative to the room they
//! belong to, so the selection owns both: choosing a room (including
//! re-choosing the current one) wipes every quantity, which keeps stale
//! cross-room line items from surviving a room switch.

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::Room;

use super::calculators::InstrumentPriceInput;

/// Why an instrument quantity was refused at the form boundary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Select a room before adding instruments")]
    NoRoomSelected,

    #[error("Instrument does not belong to the selected room")]
    UnknownInstrument { instrument_id: Uuid },

    #[error("Instrument is not available for rent")]
    InstrumentUnavailable { instrument_id: Uuid },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CatalogEntry {
    id: Uuid,
    unit_price: Decimal,
    available: bool,
}

/// Active room plus the quantity chosen per instrument
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomSelection {
    room_id: Option<Uuid>,
    catalog: Vec<CatalogEntry>,
    quantities: HashMap<Uuid, u32>,
}

impl RoomSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `room` the active room and reset every quantity to zero
    pub fn select_room(&mut self, room: &Room) {
        self.room_id = Some(room.id);
        self.catalog = room
            .instruments
            .iter()
            .map(|i| CatalogEntry {
                id: i.id,
                unit_price: i.price,
                available: i.available,
            })
            .collect();
        self.quantities.clear();
    }

    pub fn room_id(&self) -> Option<Uuid> {
        self.room_id
    }

    /// Set the quantity for an instrument of the active room.
    ///
    /// Setting a quantity to zero removes the line item.
    pub fn set_quantity(&mut self, instrument_id: Uuid, quantity: u32) -> Result<(), SelectionError> {
        if self.room_id.is_none() {
            return Err(SelectionError::NoRoomSelected);
        }
        let entry = self
            .catalog
            .iter()
            .find(|e| e.id == instrument_id)
            .ok_or(SelectionError::UnknownInstrument { instrument_id })?;
        if !entry.available {
            return Err(SelectionError::InstrumentUnavailable { instrument_id });
        }

        if quantity == 0 {
            self.quantities.remove(&instrument_id);
        } else {
            self.quantities.insert(instrument_id, quantity);
        }
        Ok(())
    }

    pub fn quantity(&self, instrument_id: Uuid) -> u32 {
        self.quantities.get(&instrument_id).copied().unwrap_or(0)
    }

    pub fn quantities(&self) -> &HashMap<Uuid, u32> {
        &self.quantities
    }

    /// Catalog of the active room in the shape the calculator takes
    pub fn price_inputs(&self) -> Vec<InstrumentPriceInput> {
        self.catalog
            .iter()
            .map(|e| InstrumentPriceInput {
                id: e.id,
                unit_price: e.unit_price,
            })
            .collect()
    }

    /// Ids of instruments with a non-zero quantity, the backend wire shape
    pub fn instrument_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self
            .quantities
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }
}
