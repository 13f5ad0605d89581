use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

pub use costing::{CostInputs, TripCosts, cost_trip};
pub use error::EngineError;
pub use money::Money;
pub use payments::Payment;
pub use rates::RateConfig;
pub use staff::{Role, StaffDraft, StaffMember};
pub use statements::{EarningRow, StaffStatement, statement_for};
pub use summary::{MonthlySummary, monthly_summary};
pub use trips::{ServiceType, Trip, TripDraft, TripStatus, falls_on_weekend};
pub use vehicles::Vehicle;

pub mod assist;
pub mod store;

mod costing;
mod error;
mod money;
mod payments;
mod rates;
mod staff;
mod statements;
mod summary;
mod trips;
mod vehicles;

use store::{StateStore, StoreError, keys};

type ResultEngine<T> = Result<T, EngineError>;

/// The application state: every collection the dashboard works on, plus the
/// store it persists to.
///
/// All mutation funnels through the named operations below, which is where
/// derived fields (weekend flag, cost fields) are recomputed, so the record
/// invariants hold no matter which caller drives the engine. Mutations are
/// synchronous and atomic from the caller's point of view; after each one the
/// affected key is written back best-effort (a failed write is logged, not
/// rolled back).
pub struct Engine {
    trips: Vec<Trip>,
    staff: Vec<StaffMember>,
    vehicles: Vec<Vehicle>,
    payments: Vec<Payment>,
    rates: RateConfig,
    logo: Option<String>,
    store: Box<dyn StateStore>,
}

impl Engine {
    /// Return a builder for `Engine`.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    // --- queries ---------------------------------------------------------

    /// All trips, most recently added first.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// The staff directory, in registration order.
    pub fn staff(&self) -> &[StaffMember] {
        &self.staff
    }

    /// Legacy fleet-pool vehicles.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// All payments, most recently recorded first.
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn rates(&self) -> &RateConfig {
        &self.rates
    }

    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref()
    }

    fn member(&self, staff_id: Uuid) -> Option<&StaffMember> {
        self.staff.iter().find(|member| member.id == staff_id)
    }

    fn driver(&self, staff_id: Uuid) -> Option<&StaffMember> {
        self.member(staff_id)
            .filter(|member| member.role == Role::Driver)
    }

    /// Earned/paid/balance statement for one member.
    ///
    /// Recomputed from the trip and payment collections on every call; the
    /// balance is never stored anywhere.
    pub fn statement(&self, staff_id: Uuid) -> ResultEngine<StaffStatement> {
        let member = self
            .member(staff_id)
            .ok_or_else(|| EngineError::KeyNotFound(staff_id.to_string()))?;
        Ok(statement_for(member, &self.trips, &self.payments))
    }

    /// Statements for every member of a role, in directory order.
    pub fn statements(&self, role: Role) -> Vec<StaffStatement> {
        self.staff
            .iter()
            .filter(|member| member.role == role)
            .map(|member| statement_for(member, &self.trips, &self.payments))
            .collect()
    }

    /// Fleet totals over one calendar month.
    pub fn monthly_summary(&self, year: i32, month: u32) -> MonthlySummary {
        monthly_summary(&self.trips, year, month)
    }

    // --- trips -----------------------------------------------------------

    /// Validates and costs a draft, then prepends the resulting trip.
    pub fn add_trip(&mut self, draft: TripDraft) -> ResultEngine<Uuid> {
        let trip = self.build_trip(Uuid::new_v4(), draft)?;
        let trip_id = trip.id;
        self.trips.insert(0, trip);
        self.persist_trips();
        tracing::debug!(trip = %trip_id, "trip added");
        Ok(trip_id)
    }

    /// Full replace by identity; costs and the weekend flag are re-derived
    /// from the draft and the *current* rates.
    ///
    /// Returns [`EngineError::KeyNotFound`] for an unknown id.
    pub fn update_trip(&mut self, trip_id: Uuid, draft: TripDraft) -> ResultEngine<()> {
        let index = self
            .trips
            .iter()
            .position(|trip| trip.id == trip_id)
            .ok_or_else(|| EngineError::KeyNotFound(trip_id.to_string()))?;
        let replacement = self.build_trip(trip_id, draft)?;
        self.trips[index] = replacement;
        self.persist_trips();
        tracing::debug!(trip = %trip_id, "trip updated");
        Ok(())
    }

    /// Removes a trip. Returns [`EngineError::KeyNotFound`] for an unknown id.
    pub fn delete_trip(&mut self, trip_id: Uuid) -> ResultEngine<()> {
        let index = self
            .trips
            .iter()
            .position(|trip| trip.id == trip_id)
            .ok_or_else(|| EngineError::KeyNotFound(trip_id.to_string()))?;
        self.trips.remove(index);
        self.persist_trips();
        tracing::debug!(trip = %trip_id, "trip deleted");
        Ok(())
    }

    /// Derives the stored trip from a draft: boundary validation, weekend
    /// flag from the date, costs from the current rates and the assigned
    /// drivers' resolved per-km values.
    fn build_trip(&self, trip_id: Uuid, draft: TripDraft) -> ResultEngine<Trip> {
        draft.validate()?;

        let weekend = falls_on_weekend(draft.date);
        // A driver id that no longer resolves keeps working: no positive
        // per-km rate means the flat daily base applies.
        let primary_km_rate = self.driver(draft.driver_id).and_then(StaffMember::effective_km_rate);
        let second_km_rate = draft
            .second_driver_id
            .and_then(|id| self.driver(id))
            .and_then(StaffMember::effective_km_rate);

        let costs = cost_trip(
            &CostInputs {
                distance_km: draft.distance_km,
                weekend,
                service: draft.service,
                helper_assigned: draft.helper_id.is_some(),
                second_driver_assigned: draft.second_driver_id.is_some(),
                primary_km_rate,
                second_km_rate,
                toll_cost: draft.toll_cost,
                other_cost: draft.other_cost,
            },
            &self.rates,
        );

        let vehicle_label = self
            .driver(draft.driver_id)
            .and_then(StaffMember::vehicle_label);

        Ok(Trip {
            id: trip_id,
            date: draft.date,
            status: draft.status,
            origin: draft.origin,
            destination: draft.destination,
            client_name: draft.client_name,
            distance_km: draft.distance_km,
            driver_id: draft.driver_id,
            vehicle_label,
            second_driver_id: draft.second_driver_id,
            second_driver_cost: costs.second_driver_cost,
            helper_id: draft.helper_id,
            service: draft.service,
            weekend,
            revenue: draft.revenue,
            fuel_cost: costs.fuel_cost,
            driver_cost: costs.driver_cost,
            helper_cost: costs.helper_cost,
            toll_cost: costs.toll_cost,
            other_cost: costs.other_cost,
            notes: draft.notes,
        })
    }

    // --- staff directory -------------------------------------------------

    /// Registers a driver or helper.
    pub fn add_staff(&mut self, draft: StaffDraft) -> ResultEngine<Uuid> {
        if draft.name.trim().is_empty() {
            return Err(EngineError::InvalidRecord(
                "staff name must not be empty".to_string(),
            ));
        }
        let member = StaffMember::new(Uuid::new_v4(), draft);
        let staff_id = member.id;
        self.staff.push(member);
        self.persist_staff();
        tracing::debug!(staff = %staff_id, "staff member added");
        Ok(staff_id)
    }

    /// Full replace by identity, with the same normalization as
    /// [`Engine::add_staff`]. Returns [`EngineError::KeyNotFound`] for an
    /// unknown id.
    pub fn update_staff(&mut self, staff_id: Uuid, draft: StaffDraft) -> ResultEngine<()> {
        if draft.name.trim().is_empty() {
            return Err(EngineError::InvalidRecord(
                "staff name must not be empty".to_string(),
            ));
        }
        let index = self
            .staff
            .iter()
            .position(|member| member.id == staff_id)
            .ok_or_else(|| EngineError::KeyNotFound(staff_id.to_string()))?;
        self.staff[index] = StaffMember::new(staff_id, draft);
        self.persist_staff();
        tracing::debug!(staff = %staff_id, "staff member updated");
        Ok(())
    }

    // --- vehicles --------------------------------------------------------

    pub fn add_vehicle(
        &mut self,
        plate: String,
        model: String,
        avg_consumption: f64,
    ) -> ResultEngine<Uuid> {
        if !avg_consumption.is_finite() || avg_consumption <= 0.0 {
            return Err(EngineError::InvalidRecord(
                "vehicle consumption must be > 0 km/l".to_string(),
            ));
        }
        let vehicle = Vehicle::new(plate, model, avg_consumption);
        let vehicle_id = vehicle.id;
        self.vehicles.push(vehicle);
        best_effort_put(self.store.as_mut(), keys::VEHICLES, &self.vehicles);
        Ok(vehicle_id)
    }

    // --- payment ledger --------------------------------------------------

    /// Appends a payment against a staff member's balance.
    ///
    /// Beyond requiring a positive amount there is no validation here — in
    /// particular no upper bound against the current balance, which is
    /// advisory and shown by the caller at entry time.
    pub fn record_payment(
        &mut self,
        staff_id: Uuid,
        amount: Money,
        date: NaiveDate,
        note: Option<String>,
    ) -> ResultEngine<Uuid> {
        let payment = Payment::new(staff_id, amount, date, note)?;
        let payment_id = payment.id;
        self.payments.insert(0, payment);
        self.persist_payments();
        tracing::debug!(payment = %payment_id, staff = %staff_id, "payment recorded");
        Ok(payment_id)
    }

    /// Removes a payment by identity; a no-op when the id is unknown.
    ///
    /// Earnings derive solely from trips, so nothing cascades: the owning
    /// member's balance simply rises by the deleted amount on the next read.
    pub fn delete_payment(&mut self, payment_id: Uuid) {
        let before = self.payments.len();
        self.payments.retain(|payment| payment.id != payment_id);
        if self.payments.len() == before {
            tracing::debug!(payment = %payment_id, "delete_payment: unknown id");
            return;
        }
        self.persist_payments();
        tracing::debug!(payment = %payment_id, "payment deleted");
    }

    // --- rates & branding ------------------------------------------------

    /// Replaces the rate snapshot wholesale.
    ///
    /// Applies to calculations from now on; stored trips keep the cost
    /// values computed when they were saved.
    pub fn update_rates(&mut self, rates: RateConfig) {
        self.rates = rates;
        best_effort_put(self.store.as_mut(), keys::RATES, &self.rates);
        tracing::debug!("rates replaced");
    }

    /// Stores or clears the company logo (a data-URI string).
    pub fn set_logo(&mut self, logo: Option<String>) {
        match &logo {
            Some(data) => best_effort_put(self.store.as_mut(), keys::LOGO, data),
            None => {
                if let Err(err) = self.store.remove(keys::LOGO) {
                    tracing::warn!("failed to remove {}: {err}", keys::LOGO);
                }
            }
        }
        self.logo = logo;
    }

    // --- persistence -----------------------------------------------------

    fn persist_trips(&mut self) {
        best_effort_put(self.store.as_mut(), keys::TRIPS, &self.trips);
    }

    fn persist_staff(&mut self) {
        best_effort_put(self.store.as_mut(), keys::STAFF, &self.staff);
    }

    fn persist_payments(&mut self) {
        best_effort_put(self.store.as_mut(), keys::PAYMENTS, &self.payments);
    }
}

/// Serializes and writes one key, logging instead of failing: persistence is
/// best-effort and a lost write must not roll back the in-memory mutation.
fn best_effort_put(store: &mut dyn StateStore, key: &str, value: &impl Serialize) {
    match serde_json::to_string(value) {
        Ok(json) => {
            if let Err(err) = store.put(key, &json) {
                tracing::warn!("failed to persist {key}: {err}");
            }
        }
        Err(err) => tracing::warn!("failed to serialize {key}: {err}"),
    }
}

fn load_or_default<T>(store: &dyn StateStore, key: &str) -> ResultEngine<T>
where
    T: DeserializeOwned + Default,
{
    match store.get(key)? {
        Some(json) => Ok(serde_json::from_str(&json).map_err(StoreError::from)?),
        None => Ok(T::default()),
    }
}

/// The builder for `Engine`.
#[derive(Default)]
pub struct EngineBuilder {
    store: Option<Box<dyn StateStore>>,
}

impl EngineBuilder {
    /// Pass the backing store. Defaults to an empty in-memory store.
    pub fn store(mut self, store: impl StateStore + 'static) -> EngineBuilder {
        self.store = Some(Box::new(store));
        self
    }

    /// Loads all persisted keys and constructs the `Engine`.
    ///
    /// A missing key falls back to its empty/default value; a present but
    /// unreadable key is a hard error, since silently dropping records would
    /// lose data on the next write.
    pub fn build(self) -> ResultEngine<Engine> {
        let store = self
            .store
            .unwrap_or_else(|| Box::new(store::MemoryStore::new()));

        let trips: Vec<Trip> = load_or_default(store.as_ref(), keys::TRIPS)?;
        let staff: Vec<StaffMember> = load_or_default(store.as_ref(), keys::STAFF)?;
        let vehicles: Vec<Vehicle> = load_or_default(store.as_ref(), keys::VEHICLES)?;
        let payments: Vec<Payment> = load_or_default(store.as_ref(), keys::PAYMENTS)?;
        let rates: RateConfig = load_or_default(store.as_ref(), keys::RATES)?;
        let logo: Option<String> = load_or_default(store.as_ref(), keys::LOGO)?;

        tracing::info!(
            trips = trips.len(),
            staff = staff.len(),
            payments = payments.len(),
            "engine state loaded"
        );

        Ok(Engine {
            trips,
            staff,
            vehicles,
            payments,
            rates,
            logo,
            store,
        })
    }
}
