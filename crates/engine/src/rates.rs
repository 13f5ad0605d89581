//! The tunable constants governing all cost derivations.

use serde::{Deserialize, Serialize};

use crate::{Money, trips::ServiceType};

/// Current rate snapshot.
///
/// Replaced wholesale by [`crate::Engine::update_rates`]; no history is kept.
/// Trips store the cost values computed at save time, so a rate change only
/// affects calculations from that point on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateConfig {
    /// Helper base pay for an MRI transport, weekend only.
    pub mri_helper_base: Money,
    /// Helper base pay for a CT transport, weekend only.
    pub ct_helper_base: Money,
    /// Helper base pay for any other transport, weekend only.
    pub other_helper_base: Money,
    /// Fraction added to driver pay on Saturdays and Sundays, e.g. `0.20`.
    pub weekend_bonus_percent: f64,
    /// Average fuel price per liter.
    pub fuel_price_avg: Money,
    /// Flat daily driver pay, used when no per-km rate is agreed.
    pub driver_daily_base: Money,
}

impl RateConfig {
    /// The helper base amount for a given service type.
    #[must_use]
    pub fn helper_base(&self, service: ServiceType) -> Money {
        match service {
            ServiceType::Mri => self.mri_helper_base,
            ServiceType::Ct => self.ct_helper_base,
            ServiceType::Other => self.other_helper_base,
        }
    }
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            mri_helper_base: Money::new(80_00),
            ct_helper_base: Money::new(60_00),
            other_helper_base: Money::new(50_00),
            weekend_bonus_percent: 0.20,
            fuel_price_avg: Money::new(5_80),
            driver_daily_base: Money::new(150_00),
        }
    }
}
