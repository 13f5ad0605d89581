//! Trip records: a single transport job with route, team, costs and revenue.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

/// Operator-set progress marker.
///
/// There is no enforced transition order: an `Open` trip may jump straight to
/// `Completed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Open,
    InProgress,
    Completed,
}

impl TripStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Mri,
    Ct,
    Other,
}

impl ServiceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mri => "mri",
            Self::Ct => "ct",
            Self::Other => "other",
        }
    }
}

/// Returns `true` when the date falls on Saturday or Sunday.
///
/// The stored weekend flag on a trip is always derived through this function
/// when the trip is built; it is never editable on its own.
#[must_use]
pub fn falls_on_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub date: NaiveDate,
    pub status: TripStatus,
    pub origin: String,
    pub destination: String,
    pub client_name: String,
    pub distance_km: f64,
    /// Primary driver; required on every trip.
    pub driver_id: Uuid,
    /// Vehicle description snapshotted from the primary driver at save time.
    pub vehicle_label: Option<String>,
    pub second_driver_id: Option<Uuid>,
    /// The secondary driver's share of [`Trip::driver_cost`]. Retained so a
    /// statement can attribute earnings per individual driver.
    pub second_driver_cost: Money,
    pub helper_id: Option<Uuid>,
    pub service: ServiceType,
    /// Derived from `date`; see [`falls_on_weekend`].
    pub weekend: bool,
    pub revenue: Money,
    pub fuel_cost: Money,
    /// Combined pay of both drivers. The primary's implied share is
    /// `driver_cost - second_driver_cost`.
    pub driver_cost: Money,
    pub helper_cost: Money,
    pub toll_cost: Money,
    pub other_cost: Money,
    pub notes: Option<String>,
}

impl Trip {
    #[must_use]
    pub fn total_cost(&self) -> Money {
        self.fuel_cost + self.driver_cost + self.helper_cost + self.toll_cost + self.other_cost
    }

    #[must_use]
    pub fn profit(&self) -> Money {
        self.revenue - self.total_cost()
    }
}

/// User-supplied fields for creating or replacing a trip.
///
/// Costs and the weekend flag are not part of the draft: the engine derives
/// them when the draft is saved.
#[derive(Clone, Debug)]
pub struct TripDraft {
    pub date: NaiveDate,
    pub status: TripStatus,
    pub origin: String,
    pub destination: String,
    pub client_name: String,
    pub distance_km: f64,
    pub driver_id: Uuid,
    pub second_driver_id: Option<Uuid>,
    pub helper_id: Option<Uuid>,
    pub service: ServiceType,
    pub revenue: Money,
    pub toll_cost: Money,
    pub other_cost: Money,
    pub notes: Option<String>,
}

impl TripDraft {
    /// Boundary validation for numeric input.
    ///
    /// The costing engine assumes clean numbers, so malformed input must be
    /// rejected here and never reach it.
    pub(crate) fn validate(&self) -> ResultEngine<()> {
        if !self.distance_km.is_finite() || self.distance_km < 0.0 {
            return Err(EngineError::InvalidRecord(format!(
                "distance must be a number >= 0, got {}",
                self.distance_km
            )));
        }
        if self.revenue.is_negative() {
            return Err(EngineError::InvalidAmount(
                "revenue must be >= 0".to_string(),
            ));
        }
        if self.toll_cost.is_negative() || self.other_cost.is_negative() {
            return Err(EngineError::InvalidAmount(
                "toll and other costs must be >= 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekend_flag_tracks_the_calendar() {
        // 2024-06-01 is a Saturday, 2024-06-02 a Sunday, 2024-06-03 a Monday.
        assert!(falls_on_weekend(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        assert!(falls_on_weekend(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()));
        assert!(!falls_on_weekend(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()));
        assert!(!falls_on_weekend(NaiveDate::from_ymd_opt(2024, 6, 7).unwrap()));
    }

    fn draft() -> TripDraft {
        TripDraft {
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            status: TripStatus::Open,
            origin: "São Paulo".to_string(),
            destination: "Campinas".to_string(),
            client_name: "Hospital Central".to_string(),
            distance_km: 100.0,
            driver_id: Uuid::new_v4(),
            second_driver_id: None,
            helper_id: None,
            service: ServiceType::Other,
            revenue: Money::new(100_000),
            toll_cost: Money::ZERO,
            other_cost: Money::ZERO,
            notes: None,
        }
    }

    #[test]
    fn validate_rejects_bad_numbers() {
        let mut bad = draft();
        bad.distance_km = f64::NAN;
        assert!(bad.validate().is_err());

        let mut bad = draft();
        bad.distance_km = -1.0;
        assert!(bad.validate().is_err());

        let mut bad = draft();
        bad.revenue = Money::new(-1);
        assert!(bad.validate().is_err());

        let mut bad = draft();
        bad.toll_cost = Money::new(-500);
        assert!(bad.validate().is_err());

        assert!(draft().validate().is_ok());
    }

    #[test]
    fn total_cost_sums_all_five_fields() {
        let trip = Trip {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            status: TripStatus::Completed,
            origin: String::new(),
            destination: String::new(),
            client_name: String::new(),
            distance_km: 10.0,
            driver_id: Uuid::new_v4(),
            vehicle_label: None,
            second_driver_id: None,
            second_driver_cost: Money::ZERO,
            helper_id: None,
            service: ServiceType::Other,
            weekend: false,
            revenue: Money::new(50_000),
            fuel_cost: Money::new(1_000),
            driver_cost: Money::new(15_000),
            helper_cost: Money::ZERO,
            toll_cost: Money::new(2_000),
            other_cost: Money::new(500),
            notes: None,
        };

        assert_eq!(trip.total_cost(), Money::new(18_500));
        assert_eq!(trip.profit(), Money::new(31_500));
    }
}
