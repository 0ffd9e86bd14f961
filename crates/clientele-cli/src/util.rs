use anyhow::Result;
use chrono::Duration;
use clientele_core::domain::{
    ActivityStatus, AppointmentId, CallOutcome, CommunicationId, CommunicationType,
    CustomerCategory, CustomerId, TaskId,
};
use clientele_core::time::parse_local_timestamp;
use std::str::FromStr;

use crate::error::invalid_input;

pub use clientele_core::time::{format_timestamp_datetime, format_timestamp_display, now_utc};

macro_rules! id_parser {
    ($fn_name:ident, $ty:ty, $label:literal) => {
        pub fn $fn_name(raw: &str) -> Result<$ty> {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(invalid_input(concat!($label, " id cannot be empty")));
            }
            <$ty>::from_str(trimmed).map_err(|_| invalid_input(concat!("invalid ", $label, " id")))
        }
    };
}

id_parser!(parse_customer_id, CustomerId, "customer");
id_parser!(parse_appointment_id, AppointmentId, "appointment");
id_parser!(parse_task_id, TaskId, "task");
id_parser!(parse_communication_id, CommunicationId, "communication");

pub fn parse_timestamp(raw: &str) -> Result<i64> {
    Ok(parse_local_timestamp(raw)?)
}

pub fn parse_optional_timestamp(raw: Option<&str>) -> Result<Option<i64>> {
    raw.map(parse_timestamp).transpose()
}

pub fn parse_category(raw: &str) -> Result<CustomerCategory> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "new" => Ok(CustomerCategory::New),
        "regular" => Ok(CustomerCategory::Regular),
        "vip" => Ok(CustomerCategory::Vip),
        _ => Err(invalid_input("invalid category: expected new|regular|vip")),
    }
}

pub fn parse_status(raw: &str) -> Result<ActivityStatus> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pending" => Ok(ActivityStatus::Pending),
        "done" => Ok(ActivityStatus::Done),
        "cancelled" | "canceled" => Ok(ActivityStatus::Cancelled),
        _ => Err(invalid_input("invalid status: expected pending|done|cancelled")),
    }
}

pub fn parse_outcome(raw: &str) -> Result<CallOutcome> {
    match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "answered" => Ok(CallOutcome::Answered),
        "no_answer" => Ok(CallOutcome::NoAnswer),
        "voicemail" => Ok(CallOutcome::Voicemail),
        "busy" => Ok(CallOutcome::Busy),
        _ => Err(invalid_input(
            "invalid outcome: expected answered|no-answer|voicemail|busy",
        )),
    }
}

pub fn parse_communication_type(raw: &str) -> Result<CommunicationType> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "call" => Ok(CommunicationType::Call),
        "email" => Ok(CommunicationType::Email),
        _ => Err(invalid_input("invalid communication type: expected call|email")),
    }
}

/// Empty strings clear an optional field.
pub fn normalize_optional_value(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

pub fn window_end(now_utc: i64, days: i64) -> i64 {
    now_utc + Duration::days(days).num_seconds()
}

pub fn format_optional(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

pub fn format_optional_timestamp(value: Option<i64>) -> String {
    value
        .map(format_timestamp_datetime)
        .unwrap_or_else(|| "N/A".to_string())
}
