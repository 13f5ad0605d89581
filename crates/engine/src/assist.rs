//! External distance-estimation / business-analysis capability.
//!
//! The engine never talks to the network itself. Callers inject an
//! [`Assistant`] implementation (the app binary ships an HTTP-backed one) and
//! the costing/aggregation code stays fully testable offline. Replies are
//! advisory: the caller decides whether to accept an estimated distance, and
//! it goes through the same validation as manual input.
//!
//! Calls are single-attempt and cancellable by dropping the future; a failure
//! is surfaced as a sentinel value, never an engine error.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::{
    Money,
    trips::{ServiceType, Trip},
};

#[derive(Error, Debug)]
pub enum AssistError {
    #[error("assistant unavailable: {0}")]
    Unavailable(String),
    #[error("assistant reply was not usable: {0}")]
    Unusable(String),
}

/// Compact per-trip summary sent out for analysis instead of full records.
#[derive(Clone, Debug, Serialize)]
pub struct TripDigest {
    pub date: NaiveDate,
    pub service: ServiceType,
    pub distance_km: f64,
    pub revenue: Money,
    pub cost: Money,
    pub weekend: bool,
}

/// Builds the analysis payload from the trip list.
#[must_use]
pub fn digest_trips(trips: &[Trip]) -> Vec<TripDigest> {
    trips
        .iter()
        .map(|trip| TripDigest {
            date: trip.date,
            service: trip.service,
            distance_km: trip.distance_km,
            revenue: trip.revenue,
            cost: trip.total_cost(),
            weekend: trip.weekend,
        })
        .collect()
}

/// The injected external reasoning service.
pub trait Assistant {
    /// Estimates the road distance between two free-text places, in km.
    fn estimate_distance(
        &self,
        origin: &str,
        destination: &str,
    ) -> impl Future<Output = Result<f64, AssistError>> + Send;

    /// Produces a free-form text report over the digest.
    fn analyze(
        &self,
        digest: &[TripDigest],
    ) -> impl Future<Output = Result<String, AssistError>> + Send;
}

/// Shown when the analysis call fails; mirrors the sentinel contract of the
/// distance path (a failure is an answer, not an error).
pub const ANALYSIS_UNAVAILABLE: &str = "Ocorreu um erro ao tentar analisar seus dados.";

/// Distance with the failure sentinel applied: 0 km means "could not
/// compute", the caller asks the operator to fill it in manually.
pub async fn distance_or_zero(
    assistant: &impl Assistant,
    origin: &str,
    destination: &str,
) -> f64 {
    match assistant.estimate_distance(origin, destination).await {
        Ok(km) => km,
        Err(err) => {
            tracing::warn!("distance estimate failed: {err}");
            0.0
        }
    }
}

/// Analysis with the failure sentinel applied.
pub async fn analysis_or_message(assistant: &impl Assistant, digest: &[TripDigest]) -> String {
    match assistant.analyze(digest).await {
        Ok(report) => report,
        Err(err) => {
            tracing::warn!("analysis failed: {err}");
            ANALYSIS_UNAVAILABLE.to_string()
        }
    }
}

/// Pulls the first decimal number out of a free-form reply.
///
/// The service is asked to answer with a bare number but often wraps it in
/// text ("Aprox 150km") or uses a comma separator ("15,5"). Anything without
/// a usable non-negative finite number yields `None`.
#[must_use]
pub fn parse_distance_reply(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let run: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let normalized = run.trim_end_matches(['.', ',']).replace(',', ".");
    // A second separator ends the number ("1.2.3" reads as 1.2).
    let normalized = match normalized.match_indices('.').nth(1) {
        Some((idx, _)) => &normalized[..idx],
        None => normalized.as_str(),
    };

    let km = normalized.parse::<f64>().ok()?;
    (km.is_finite() && km >= 0.0).then_some(km)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Offline;

    impl Assistant for Offline {
        async fn estimate_distance(&self, _: &str, _: &str) -> Result<f64, AssistError> {
            Err(AssistError::Unavailable("no api key".to_string()))
        }

        async fn analyze(&self, _: &[TripDigest]) -> Result<String, AssistError> {
            Err(AssistError::Unavailable("no api key".to_string()))
        }
    }

    #[test]
    fn parses_bare_and_wrapped_numbers() {
        assert_eq!(parse_distance_reply("15.5"), Some(15.5));
        assert_eq!(parse_distance_reply("15,5"), Some(15.5));
        assert_eq!(parse_distance_reply("Aprox 150km"), Some(150.0));
        assert_eq!(parse_distance_reply("A distância é 98,4 km."), Some(98.4));
        assert_eq!(parse_distance_reply("1.2.3"), Some(1.2));
    }

    #[test]
    fn garbage_replies_yield_none() {
        assert_eq!(parse_distance_reply(""), None);
        assert_eq!(parse_distance_reply("não sei"), None);
        assert_eq!(parse_distance_reply("km"), None);
    }

    #[tokio::test]
    async fn failures_collapse_to_sentinels() {
        assert_eq!(distance_or_zero(&Offline, "São Paulo", "Santos").await, 0.0);
        assert_eq!(
            analysis_or_message(&Offline, &[]).await,
            ANALYSIS_UNAVAILABLE
        );
    }
}
