use crate::domain::ids::{CustomerId, TaskId};
use crate::domain::status::ActivityStatus;
use crate::error::{ensure_no_violations, CoreError, Violation};
use serde::Serialize;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
pub struct TaskNew {
    pub customer_id: CustomerId,
    pub title: String,
    pub description: Option<String>,
    pub status: ActivityStatus,
    pub due_at: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Task {
    id: TaskId,
    customer_id: CustomerId,
    pub title: String,
    pub description: Option<String>,
    pub status: ActivityStatus,
    pub due_at: Option<i64>,
    created_at: i64,
}

impl Task {
    pub fn new(now_utc: i64, input: TaskNew) -> Self {
        Self::restore(TaskId::new(), now_utc, input)
    }

    pub fn restore(id: TaskId, created_at: i64, input: TaskNew) -> Self {
        Self {
            id,
            customer_id: input.customer_id,
            title: input.title,
            description: input.description,
            status: input.status,
            due_at: input.due_at,
            created_at,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.title.trim().is_empty() {
            violations.push(Violation::TitleRequired);
        }
        if let Some(due_at) = self.due_at {
            if due_at < self.created_at {
                violations.push(Violation::DueBeforeCreation);
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

    /// Cancelled tasks still count as overdue; only `Done` clears it.
    pub fn is_overdue(&self, now_utc: i64) -> bool {
        match self.due_at {
            Some(due_at) => due_at < now_utc && self.status != ActivityStatus::Done,
            None => false,
        }
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskNew};
    use crate::domain::{ActivityStatus, CustomerId};
    use crate::error::Violation;

    const NOW: i64 = 1_700_000_000;

    fn task_due(due_at: Option<i64>) -> Task {
        Task::new(
            NOW,
            TaskNew {
                customer_id: CustomerId::new(),
                title: "Send invoice".to_string(),
                description: None,
                status: ActivityStatus::Pending,
                due_at,
            },
        )
    }

    #[test]
    fn due_date_equal_to_creation_passes() {
        assert!(task_due(Some(NOW)).validate().is_empty());
    }

    #[test]
    fn due_date_before_creation_fails() {
        assert_eq!(
            task_due(Some(NOW - 1)).validate(),
            vec![Violation::DueBeforeCreation]
        );
    }

    #[test]
    fn missing_due_date_is_fine() {
        let task = task_due(None);
        assert!(task.validate().is_empty());
        assert!(!task.is_overdue(NOW + 1_000_000));
    }

    #[test]
    fn empty_title_fails() {
        let mut task = task_due(None);
        task.title = " ".to_string();
        assert_eq!(task.validate(), vec![Violation::TitleRequired]);
    }

    #[test]
    fn overdue_until_done() {
        let mut task = task_due(Some(NOW + 100));
        assert!(!task.is_overdue(NOW + 100));
        assert!(task.is_overdue(NOW + 101));
        task.mark_cancelled();
        assert!(task.is_overdue(NOW + 101));
        task.mark_done();
        assert!(!task.is_overdue(NOW + 101));
    }
}
