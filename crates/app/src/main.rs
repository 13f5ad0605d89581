use chrono::Datelike;
use engine::{Engine, Role, TripStatus, assist::distance_or_zero, store::FileStore};

mod assistant;
mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "carreto={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let store = FileStore::open(&settings.store.path)?;
    let engine = Engine::builder().store(store).build()?;

    let today = chrono::Local::now().date_naive();
    let summary = engine.monthly_summary(today.year(), today.month());
    tracing::info!(
        trips = engine.trips().len(),
        staff = engine.staff().len(),
        payments = engine.payments().len(),
        "state loaded from {}",
        settings.store.path
    );
    tracing::info!(
        "month so far: {} revenue, {} cost, {} profit over {} trip(s)",
        summary.revenue,
        summary.cost,
        summary.profit,
        summary.trip_count
    );

    for statement in engine
        .statements(Role::Driver)
        .into_iter()
        .chain(engine.statements(Role::Helper))
    {
        if !statement.balance.is_zero() {
            tracing::info!(
                staff = %statement.staff_id,
                role = statement.role.as_str(),
                "outstanding balance: {}",
                statement.balance
            );
        }
    }

    // Advisory only: estimates are logged for the operator, never written
    // back to a trip without going through the normal update path.
    if let Some(assist) = settings.assistant {
        let assistant = assistant::HttpAssistant::new(assist.endpoint, assist.api_key);
        for trip in engine
            .trips()
            .iter()
            .filter(|trip| trip.status == TripStatus::Open && trip.distance_km == 0.0)
        {
            let km = distance_or_zero(&assistant, &trip.origin, &trip.destination).await;
            if km > 0.0 {
                tracing::info!(
                    trip = %trip.id,
                    "estimated distance {} -> {}: {km} km",
                    trip.origin,
                    trip.destination
                );
            } else {
                tracing::info!(trip = %trip.id, "could not estimate distance, fill it in manually");
            }
        }
    }

    Ok(())
}
