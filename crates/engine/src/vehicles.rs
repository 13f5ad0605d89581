//! Legacy fleet-pool records.
//!
//! Vehicles moved to being driver-owned (see [`crate::StaffMember`]); this
//! registry is kept for the fleet pool and round-trips through the store, but
//! the costing engine never reads it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub plate: String,
    pub model: String,
    /// Average consumption in km per liter.
    pub avg_consumption: f64,
}

impl Vehicle {
    pub fn new(plate: String, model: String, avg_consumption: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            plate,
            model,
            avg_consumption,
        }
    }
}
