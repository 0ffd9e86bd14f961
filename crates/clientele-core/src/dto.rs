use crate::domain::{Appointment, Communication, Customer, Task};
use serde::Serialize;

/// A customer with everything that references it.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerOverviewDto {
    pub customer: Customer,
    pub appointments: Vec<Appointment>,
    pub tasks: Vec<Task>,
    pub communications: Vec<Communication>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgendaDto {
    pub now: i64,
    pub until: i64,
    pub upcoming_appointments: Vec<Appointment>,
    pub overdue_tasks: Vec<Task>,
}
