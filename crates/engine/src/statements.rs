//! Per-staff balance statements, derived on every read.
//!
//! A statement is a pure computation over the full trip and payment
//! collections; nothing here is cached or persisted. Balances therefore can
//! never diverge from the source records.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    Money,
    payments::Payment,
    staff::{Role, StaffMember},
    trips::{Trip, TripStatus},
};

/// One completed trip's contribution to a member's earnings.
#[derive(Clone, Debug, PartialEq)]
pub struct EarningRow {
    pub trip_id: Uuid,
    pub date: NaiveDate,
    pub client_name: String,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub weekend: bool,
    /// `true` when the member rode as the secondary driver on this trip.
    pub as_second_driver: bool,
    pub earned: Money,
}

/// Earned/paid/balance view for one staff member.
///
/// Row order follows store iteration order: most recently added first.
#[derive(Clone, Debug, PartialEq)]
pub struct StaffStatement {
    pub staff_id: Uuid,
    pub role: Role,
    pub earned: Money,
    pub paid: Money,
    /// `earned - paid`; negative means the member was overpaid.
    pub balance: Money,
    pub trips: Vec<EarningRow>,
    pub payments: Vec<Payment>,
}

fn earning_row(trip: &Trip, as_second_driver: bool, earned: Money) -> EarningRow {
    EarningRow {
        trip_id: trip.id,
        date: trip.date,
        client_name: trip.client_name.clone(),
        origin: trip.origin.clone(),
        destination: trip.destination.clone(),
        distance_km: trip.distance_km,
        weekend: trip.weekend,
        as_second_driver,
        earned,
    }
}

/// Completed trips a driver earned on, with the per-trip share.
///
/// The primary's share is the combined driver cost minus the secondary's
/// retained share; a row with a non-positive share is dropped from the
/// statement entirely.
fn driver_rows(member: &StaffMember, trips: &[Trip]) -> Vec<EarningRow> {
    trips
        .iter()
        .filter(|trip| trip.status == TripStatus::Completed)
        .filter_map(|trip| {
            let row = if trip.driver_id == member.id {
                earning_row(trip, false, trip.driver_cost - trip.second_driver_cost)
            } else if trip.second_driver_id == Some(member.id) {
                earning_row(trip, true, trip.second_driver_cost)
            } else {
                return None;
            };
            row.earned.is_positive().then_some(row)
        })
        .collect()
}

/// Completed weekend trips a helper earned on.
fn helper_rows(member: &StaffMember, trips: &[Trip]) -> Vec<EarningRow> {
    trips
        .iter()
        .filter(|trip| {
            trip.status == TripStatus::Completed
                && trip.helper_id == Some(member.id)
                && trip.weekend
                && trip.helper_cost.is_positive()
        })
        .map(|trip| earning_row(trip, false, trip.helper_cost))
        .collect()
}

/// Builds the statement for one member from the full collections.
#[must_use]
pub fn statement_for(member: &StaffMember, trips: &[Trip], payments: &[Payment]) -> StaffStatement {
    let rows = match member.role {
        Role::Driver => driver_rows(member, trips),
        Role::Helper => helper_rows(member, trips),
    };

    // Every recorded payment counts, regardless of any trip's status.
    let member_payments: Vec<Payment> = payments
        .iter()
        .filter(|payment| payment.staff_id == member.id)
        .cloned()
        .collect();

    let earned: Money = rows.iter().map(|row| row.earned).sum();
    let paid: Money = member_payments.iter().map(|payment| payment.amount).sum();

    StaffStatement {
        staff_id: member.id,
        role: member.role,
        earned,
        paid,
        balance: earned - paid,
        trips: rows,
        payments: member_payments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        staff::StaffDraft,
        trips::ServiceType,
    };

    fn driver(name: &str) -> StaffMember {
        StaffMember::new(
            Uuid::new_v4(),
            StaffDraft {
                name: name.to_string(),
                role: Role::Driver,
                phone: String::new(),
                vehicle_model: None,
                license_plate: None,
                km_rate: Some(Money::new(2_50)),
            },
        )
    }

    fn helper(name: &str) -> StaffMember {
        StaffMember::new(
            Uuid::new_v4(),
            StaffDraft {
                name: name.to_string(),
                role: Role::Helper,
                phone: String::new(),
                vehicle_model: None,
                license_plate: None,
                km_rate: None,
            },
        )
    }

    fn trip(status: TripStatus, driver_id: Uuid) -> Trip {
        Trip {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            status,
            origin: "São Paulo".to_string(),
            destination: "Santos".to_string(),
            client_name: "Clínica Mar".to_string(),
            distance_km: 70.0,
            driver_id,
            vehicle_label: None,
            second_driver_id: None,
            second_driver_cost: Money::ZERO,
            helper_id: None,
            service: ServiceType::Mri,
            weekend: true,
            revenue: Money::new(900_00),
            fuel_cost: Money::new(47_76),
            driver_cost: Money::new(300_00),
            helper_cost: Money::ZERO,
            toll_cost: Money::ZERO,
            other_cost: Money::ZERO,
            notes: None,
        }
    }

    #[test]
    fn driver_earns_primary_and_secondary_shares() {
        let member = driver("Carlos Silva");

        let trip_a = trip(TripStatus::Completed, member.id);

        let mut trip_b = trip(TripStatus::Completed, Uuid::new_v4());
        trip_b.second_driver_id = Some(member.id);
        trip_b.second_driver_cost = Money::new(120_00);
        trip_b.driver_cost = Money::new(420_00);

        let payment =
            Payment::new(member.id, Money::new(100_00), trip_a.date, None).unwrap();

        let statement =
            statement_for(&member, &[trip_a, trip_b], std::slice::from_ref(&payment));

        assert_eq!(statement.earned, Money::new(420_00));
        assert_eq!(statement.paid, Money::new(100_00));
        assert_eq!(statement.balance, Money::new(320_00));
        assert_eq!(statement.trips.len(), 2);
        assert!(!statement.trips[0].as_second_driver);
        assert!(statement.trips[1].as_second_driver);
        assert_eq!(statement.trips[1].earned, Money::new(120_00));
    }

    #[test]
    fn unfinished_trips_never_contribute() {
        let member = driver("Carlos Silva");
        let open = trip(TripStatus::Open, member.id);
        let in_progress = trip(TripStatus::InProgress, member.id);

        let statement = statement_for(&member, &[open, in_progress], &[]);

        assert_eq!(statement.earned, Money::ZERO);
        assert!(statement.trips.is_empty());
    }

    #[test]
    fn zero_share_trips_are_dropped_from_the_statement() {
        let member = driver("Carlos Silva");
        let mut no_share = trip(TripStatus::Completed, member.id);
        no_share.driver_cost = Money::new(120_00);
        no_share.second_driver_cost = Money::new(120_00);

        let statement = statement_for(&member, &[no_share], &[]);

        assert!(statement.trips.is_empty());
        assert_eq!(statement.earned, Money::ZERO);
    }

    #[test]
    fn helper_earns_only_on_completed_weekend_trips() {
        let member = helper("João Souza");

        let mut earning = trip(TripStatus::Completed, Uuid::new_v4());
        earning.helper_id = Some(member.id);
        earning.helper_cost = Money::new(80_00);

        let mut weekday = earning.clone();
        weekday.id = Uuid::new_v4();
        weekday.weekend = false;
        weekday.helper_cost = Money::ZERO;

        let mut unfinished = earning.clone();
        unfinished.id = Uuid::new_v4();
        unfinished.status = TripStatus::Open;

        let statement = statement_for(&member, &[earning, weekday, unfinished], &[]);

        assert_eq!(statement.trips.len(), 1);
        assert_eq!(statement.earned, Money::new(80_00));
        assert_eq!(statement.balance, Money::new(80_00));
    }

    #[test]
    fn idle_helper_has_an_all_zero_statement() {
        let member = helper("Maria Oliveira");
        let statement = statement_for(&member, &[], &[]);

        assert_eq!(statement.earned, Money::ZERO);
        assert_eq!(statement.paid, Money::ZERO);
        assert_eq!(statement.balance, Money::ZERO);
        assert!(statement.trips.is_empty());
        assert!(statement.payments.is_empty());
    }

    #[test]
    fn payments_count_regardless_of_trip_status() {
        let member = driver("Carlos Silva");
        let open = trip(TripStatus::Open, member.id);
        let payment =
            Payment::new(member.id, Money::new(50_00), open.date, None).unwrap();

        let statement = statement_for(&member, &[open], &[payment]);

        assert_eq!(statement.earned, Money::ZERO);
        assert_eq!(statement.paid, Money::new(50_00));
        assert_eq!(statement.balance, Money::new(-50_00));
    }
}
