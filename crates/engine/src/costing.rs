//! Trip costing: turns draft trip attributes and the current rates into the
//! five cost fields stored on a trip.
//!
//! The function here is deterministic and side-effect-free. It reads no
//! global state: rates and the drivers' resolved per-km values are passed in
//! explicitly, and numeric input is assumed to be validated by the caller
//! (see [`crate::trips::TripDraft::validate`]).

use crate::{Money, rates::RateConfig, trips::ServiceType};

/// Assumed consumption figure used for fuel estimation, in km per liter.
/// Fixed, not configurable.
const KM_PER_LITER: f64 = 8.5;

/// Resolved inputs for one costing run.
#[derive(Clone, Copy, Debug)]
pub struct CostInputs {
    pub distance_km: f64,
    pub weekend: bool,
    pub service: ServiceType,
    pub helper_assigned: bool,
    pub second_driver_assigned: bool,
    /// Primary driver's agreed per-km rate; `None` means flat daily base.
    pub primary_km_rate: Option<Money>,
    /// Secondary driver's agreed per-km rate, when one is assigned.
    pub second_km_rate: Option<Money>,
    pub toll_cost: Money,
    pub other_cost: Money,
}

/// The five cost fields plus the secondary driver's retained share.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TripCosts {
    pub fuel_cost: Money,
    /// Combined pay of both drivers.
    pub driver_cost: Money,
    /// The secondary driver's share of `driver_cost`; zero when none.
    pub second_driver_cost: Money,
    pub helper_cost: Money,
    pub toll_cost: Money,
    pub other_cost: Money,
}

/// One driver's pay: per-km when a positive rate is agreed, flat daily base
/// otherwise, with the weekend bonus applied on top of whichever was chosen.
fn driver_pay(distance_km: f64, km_rate: Option<Money>, weekend: bool, rates: &RateConfig) -> Money {
    let base = match km_rate.filter(|rate| rate.is_positive()) {
        Some(rate) => rate.scale(distance_km),
        None => rates.driver_daily_base,
    };
    if weekend {
        base + base.scale(rates.weekend_bonus_percent)
    } else {
        base
    }
}

/// Computes all derived costs for a trip.
pub fn cost_trip(inputs: &CostInputs, rates: &RateConfig) -> TripCosts {
    // Helper pay is strictly weekend-only, flat by service type, no proration.
    let helper_cost = if inputs.weekend && inputs.helper_assigned {
        rates.helper_base(inputs.service)
    } else {
        Money::ZERO
    };

    let primary = driver_pay(inputs.distance_km, inputs.primary_km_rate, inputs.weekend, rates);
    let second_driver_cost = if inputs.second_driver_assigned {
        driver_pay(inputs.distance_km, inputs.second_km_rate, inputs.weekend, rates)
    } else {
        Money::ZERO
    };

    let vehicle_count = if inputs.second_driver_assigned { 2.0 } else { 1.0 };
    let fuel_cost = rates
        .fuel_price_avg
        .scale(inputs.distance_km / KM_PER_LITER * vehicle_count);

    TripCosts {
        fuel_cost,
        driver_cost: primary + second_driver_cost,
        second_driver_cost,
        helper_cost,
        toll_cost: inputs.toll_cost,
        other_cost: inputs.other_cost,
    }
}
