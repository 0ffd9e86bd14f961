pub mod appointment;
pub mod communication;
pub mod customer;
pub mod ids;
pub mod status;
pub mod task;

pub use appointment::{Appointment, AppointmentNew};
pub use communication::{
    CallOutcome, Communication, CommunicationChannel, CommunicationNew, CommunicationType,
};
pub use customer::{Customer, CustomerCategory, CustomerNew};
pub use ids::{AppointmentId, CommunicationId, CustomerId, TaskId};
pub use status::ActivityStatus;
pub use task::{Task, TaskNew};

pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}
