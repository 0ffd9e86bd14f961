pub mod appointments;
pub mod communications;
pub mod customers;
pub mod tasks;

pub use appointments::AppointmentsRepo;
pub use communications::CommunicationsRepo;
pub use customers::CustomersRepo;
pub use tasks::TasksRepo;

use crate::error::{Result, StoreError};
use std::str::FromStr;

pub(crate) fn parse_id<T: FromStr>(raw: String) -> Result<T> {
    T::from_str(&raw).map_err(|_| StoreError::InvalidId(raw))
}

pub(crate) fn parse_enum<T: FromStr>(column: &'static str, raw: String) -> Result<T> {
    T::from_str(&raw).map_err(|_| StoreError::InvalidEnum { column, value: raw })
}
