//! Fleet-level monthly figures for the dashboard.

use chrono::Datelike;

use crate::{Money, trips::Trip};

/// Totals over one calendar month of trips. Derived, never stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MonthlySummary {
    pub revenue: Money,
    pub cost: Money,
    pub profit: Money,
    /// Profit as a percentage of revenue; 0 when there is no revenue.
    pub margin_percent: f64,
    pub trip_count: usize,
    pub weekend_trip_count: usize,
    pub distance_km: f64,
}

/// Sums revenue, cost and distance over the trips of `(year, month)`.
#[must_use]
pub fn monthly_summary(trips: &[Trip], year: i32, month: u32) -> MonthlySummary {
    let mut summary = MonthlySummary::default();

    for trip in trips
        .iter()
        .filter(|trip| trip.date.year() == year && trip.date.month() == month)
    {
        summary.revenue += trip.revenue;
        summary.cost += trip.total_cost();
        summary.distance_km += trip.distance_km;
        summary.trip_count += 1;
        if trip.weekend {
            summary.weekend_trip_count += 1;
        }
    }

    summary.profit = summary.revenue - summary.cost;
    summary.margin_percent = if summary.revenue.is_positive() {
        summary.profit.centavos() as f64 / summary.revenue.centavos() as f64 * 100.0
    } else {
        0.0
    };
    summary
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;
    use crate::trips::{ServiceType, TripStatus};

    fn trip(date: NaiveDate, revenue: Money, driver_cost: Money) -> Trip {
        Trip {
            id: Uuid::new_v4(),
            date,
            status: TripStatus::Completed,
            origin: String::new(),
            destination: String::new(),
            client_name: String::new(),
            distance_km: 50.0,
            driver_id: Uuid::new_v4(),
            vehicle_label: None,
            second_driver_id: None,
            second_driver_cost: Money::ZERO,
            helper_id: None,
            service: ServiceType::Other,
            weekend: crate::trips::falls_on_weekend(date),
            revenue,
            fuel_cost: Money::ZERO,
            driver_cost,
            helper_cost: Money::ZERO,
            toll_cost: Money::ZERO,
            other_cost: Money::ZERO,
            notes: None,
        }
    }

    #[test]
    fn only_the_requested_month_counts() {
        let june_sat = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let june_mon = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let july = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

        let trips = [
            trip(june_sat, Money::new(500_00), Money::new(200_00)),
            trip(june_mon, Money::new(300_00), Money::new(100_00)),
            trip(july, Money::new(900_00), Money::new(400_00)),
        ];

        let summary = monthly_summary(&trips, 2024, 6);

        assert_eq!(summary.trip_count, 2);
        assert_eq!(summary.weekend_trip_count, 1);
        assert_eq!(summary.revenue, Money::new(800_00));
        assert_eq!(summary.cost, Money::new(300_00));
        assert_eq!(summary.profit, Money::new(500_00));
        assert_eq!(summary.distance_km, 100.0);
        assert!((summary.margin_percent - 62.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_month_has_zero_margin() {
        let summary = monthly_summary(&[], 2024, 6);
        assert_eq!(summary, MonthlySummary::default());
    }
}
