//! Staff directory records: drivers and helpers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Money;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Driver,
    Helper,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Driver => "driver",
            Self::Helper => "helper",
        }
    }
}

/// A driver or helper in the staff directory.
///
/// Vehicle description, license plate and the per-km rate only carry meaning
/// for drivers. Helper records never hold them: [`StaffMember::new`] drops
/// the driver-only fields for any non-driver role, so the costing engine can
/// rely on `km_rate` being absent for helpers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    /// Stable identifier, generated once; trips and payments reference it.
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub phone: String,
    pub vehicle_model: Option<String>,
    pub license_plate: Option<String>,
    /// Agreed per-kilometer rate. `None` (or zero) means the driver is paid
    /// the flat daily base instead.
    pub km_rate: Option<Money>,
}

/// User-supplied fields for creating or replacing a staff record.
#[derive(Clone, Debug)]
pub struct StaffDraft {
    pub name: String,
    pub role: Role,
    pub phone: String,
    pub vehicle_model: Option<String>,
    pub license_plate: Option<String>,
    pub km_rate: Option<Money>,
}

impl StaffMember {
    /// Builds a member from a draft, normalizing role-dependent fields.
    pub fn new(id: Uuid, draft: StaffDraft) -> Self {
        let is_driver = draft.role == Role::Driver;
        Self {
            id,
            name: draft.name,
            role: draft.role,
            phone: draft.phone,
            vehicle_model: draft.vehicle_model.filter(|_| is_driver),
            license_plate: draft.license_plate.filter(|_| is_driver),
            km_rate: draft.km_rate.filter(|_| is_driver),
        }
    }

    /// The positive per-km rate, when one applies.
    ///
    /// Zero and absent collapse to `None`: both mean "flat daily rate".
    #[must_use]
    pub fn effective_km_rate(&self) -> Option<Money> {
        self.km_rate.filter(|rate| rate.is_positive())
    }

    /// Display label for the driver's vehicle, e.g. `Fiat Ducato (ABC-1234)`.
    #[must_use]
    pub fn vehicle_label(&self) -> Option<String> {
        match (&self.vehicle_model, &self.license_plate) {
            (Some(model), Some(plate)) => Some(format!("{model} ({plate})")),
            (Some(model), None) => Some(model.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helper_drafts_lose_driver_fields() {
        let member = StaffMember::new(
            Uuid::new_v4(),
            StaffDraft {
                name: "João Souza".to_string(),
                role: Role::Helper,
                phone: "11 88888-8888".to_string(),
                vehicle_model: Some("Fiat Ducato".to_string()),
                license_plate: Some("ABC-1234".to_string()),
                km_rate: Some(Money::new(250)),
            },
        );

        assert_eq!(member.role, Role::Helper);
        assert_eq!(member.vehicle_model, None);
        assert_eq!(member.license_plate, None);
        assert_eq!(member.km_rate, None);
        assert_eq!(member.effective_km_rate(), None);
    }

    #[test]
    fn zero_rate_counts_as_flat_daily() {
        let member = StaffMember::new(
            Uuid::new_v4(),
            StaffDraft {
                name: "Carlos Silva".to_string(),
                role: Role::Driver,
                phone: "11 99999-9999".to_string(),
                vehicle_model: None,
                license_plate: None,
                km_rate: Some(Money::ZERO),
            },
        );

        assert_eq!(member.km_rate, Some(Money::ZERO));
        assert_eq!(member.effective_km_rate(), None);
    }

    #[test]
    fn vehicle_label_formats_model_and_plate() {
        let member = StaffMember::new(
            Uuid::new_v4(),
            StaffDraft {
                name: "Carlos Silva".to_string(),
                role: Role::Driver,
                phone: String::new(),
                vehicle_model: Some("Fiat Ducato".to_string()),
                license_plate: Some("ABC-1234".to_string()),
                km_rate: None,
            },
        );

        assert_eq!(member.vehicle_label().as_deref(), Some("Fiat Ducato (ABC-1234)"));
    }
}
