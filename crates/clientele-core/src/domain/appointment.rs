use crate::domain::char_len;
use crate::domain::ids::{AppointmentId, CustomerId};
use crate::domain::status::ActivityStatus;
use crate::error::{ensure_no_violations, CoreError, Violation};
use serde::Serialize;
use std::hash::{Hash, Hasher};

pub const MAX_DESCRIPTION_LEN: usize = 250;

#[derive(Debug, Clone)]
pub struct AppointmentNew {
    pub customer_id: CustomerId,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: i64,
    pub location: Option<String>,
    pub status: ActivityStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct Appointment {
    id: AppointmentId,
    customer_id: CustomerId,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: i64,
    pub location: Option<String>,
    pub status: ActivityStatus,
    created_at: i64,
}

impl Appointment {
    pub fn new(now_utc: i64, input: AppointmentNew) -> Self {
        Self::restore(AppointmentId::new(), now_utc, input)
    }

    pub fn restore(id: AppointmentId, created_at: i64, input: AppointmentNew) -> Self {
        Self {
            id,
            customer_id: input.customer_id,
            title: input.title,
            description: input.description,
            scheduled_at: input.scheduled_at,
            location: input.location,
            status: input.status,
            created_at,
        }
    }

    pub fn id(&self) -> AppointmentId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// The future-date rule is anchored at `created_at`, so the result does
    /// not drift as the wall clock advances.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.title.trim().is_empty() {
            violations.push(Violation::TitleRequired);
        }
        if self.scheduled_at <= self.created_at {
            violations.push(Violation::AppointmentNotInFuture);
        }
        if let Some(description) = self.description.as_deref() {
            if char_len(description) > MAX_DESCRIPTION_LEN {
                violations.push(Violation::DescriptionTooLong);
            }
        }

        violations
    }

    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        ensure_no_violations(self.validate())
    }

    pub fn mark_done(&mut self) {
        self.status = ActivityStatus::Done;
    }

    pub fn mark_cancelled(&mut self) {
        self.status = ActivityStatus::Cancelled;
    }

    pub fn is_upcoming(&self, now_utc: i64) -> bool {
        self.scheduled_at > now_utc
    }
}

impl PartialEq for Appointment {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Appointment {}

impl Hash for Appointment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::{Appointment, AppointmentNew};
    use crate::domain::{ActivityStatus, CustomerId};
    use crate::error::Violation;

    const NOW: i64 = 1_700_000_000;

    fn appointment_at(scheduled_at: i64) -> Appointment {
        Appointment::new(
            NOW,
            AppointmentNew {
                customer_id: CustomerId::new(),
                title: "Quarterly review".to_string(),
                description: None,
                scheduled_at,
                location: Some("Office".to_string()),
                status: ActivityStatus::default(),
            },
        )
    }

    #[test]
    fn future_date_passes() {
        let appointment = appointment_at(NOW + 1);
        assert!(appointment.validate().is_empty());
        assert_eq!(appointment.status, ActivityStatus::Pending);
    }

    #[test]
    fn date_equal_to_creation_fails() {
        assert_eq!(
            appointment_at(NOW).validate(),
            vec![Violation::AppointmentNotInFuture]
        );
    }

    #[test]
    fn past_date_fails() {
        assert_eq!(
            appointment_at(NOW - 3600).validate(),
            vec![Violation::AppointmentNotInFuture]
        );
    }

    #[test]
    fn blank_title_fails() {
        let mut appointment = appointment_at(NOW + 60);
        appointment.title = " \t".to_string();
        assert_eq!(appointment.validate(), vec![Violation::TitleRequired]);
    }

    #[test]
    fn collects_title_and_description_violations() {
        let mut appointment = appointment_at(NOW + 60);
        appointment.title = String::new();
        appointment.description = Some("d".repeat(251));
        assert_eq!(
            appointment.validate(),
            vec![Violation::TitleRequired, Violation::DescriptionTooLong]
        );
    }

    #[test]
    fn status_moves_freely() {
        let mut appointment = appointment_at(NOW + 60);
        appointment.mark_cancelled();
        assert_eq!(appointment.status, ActivityStatus::Cancelled);
        appointment.mark_done();
        assert_eq!(appointment.status, ActivityStatus::Done);
        appointment.status = ActivityStatus::Pending;
        assert_eq!(appointment.status, ActivityStatus::Pending);
    }

    #[test]
    fn upcoming_is_strictly_after_now() {
        let appointment = appointment_at(NOW + 60);
        assert!(appointment.is_upcoming(NOW));
        assert!(!appointment.is_upcoming(NOW + 60));
        assert!(!appointment.is_upcoming(NOW + 120));
    }
}
