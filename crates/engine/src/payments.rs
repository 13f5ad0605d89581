//! Payment ledger records.
//!
//! A `Payment` is a debit against a staff member's earned balance. Earnings
//! derive solely from trips, so deleting a payment has no cascading effects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub staff_id: Uuid,
    pub amount: Money,
    pub date: NaiveDate,
    pub note: Option<String>,
}

impl Payment {
    pub fn new(
        staff_id: Uuid,
        amount: Money,
        date: NaiveDate,
        note: Option<String>,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "payment amount must be > 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            staff_id,
            amount,
            date,
            note,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn rejects_non_positive_amounts() {
        let staff_id = Uuid::new_v4();
        assert!(Payment::new(staff_id, Money::ZERO, date(), None).is_err());
        assert!(Payment::new(staff_id, Money::new(-100), date(), None).is_err());
    }

    #[test]
    fn accepts_positive_amounts() {
        let payment = Payment::new(
            Uuid::new_v4(),
            Money::new(10000),
            date(),
            Some("Pagamento de Frete".to_string()),
        )
        .unwrap();
        assert_eq!(payment.amount, Money::new(10000));
    }
}
