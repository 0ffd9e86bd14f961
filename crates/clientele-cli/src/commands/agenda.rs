use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::{format_optional_timestamp, format_timestamp_datetime, now_utc, window_end};
use anyhow::Result;
use clap::Args;
use clientele_config::MAX_UPCOMING_DAYS;
use clientele_core::dto::AgendaDto;
use tracing::debug;

#[derive(Debug, Args)]
pub struct AgendaArgs {
    /// Override the configured look-ahead window
    #[arg(long)]
    pub days: Option<i64>,
}

pub fn agenda(ctx: &Context<'_>, args: AgendaArgs) -> Result<()> {
    let now = now_utc();
    let days = args.days.unwrap_or(ctx.config.upcoming_days);
    if !(1..=MAX_UPCOMING_DAYS).contains(&days) {
        return Err(invalid_input(format!(
            "--days must be between 1 and {MAX_UPCOMING_DAYS}"
        )));
    }
    let until = window_end(now, days);
    debug!(days, "agenda window");

    let dto = AgendaDto {
        now,
        until,
        upcoming_appointments: ctx.store.appointments().list_upcoming(now, until)?,
        overdue_tasks: ctx.store.tasks().list_overdue(now)?,
    };

    if ctx.json {
        return print_json(&dto);
    }

    println!("Upcoming appointments (next {} days):", days);
    if dto.upcoming_appointments.is_empty() {
        println!("  none");
    }
    for appointment in &dto.upcoming_appointments {
        println!(
            "  {}  {}  {}",
            format_timestamp_datetime(appointment.scheduled_at),
            appointment.customer_id(),
            appointment.title
        );
    }

    println!("Overdue tasks:");
    if dto.overdue_tasks.is_empty() {
        println!("  none");
    }
    for task in &dto.overdue_tasks {
        println!(
            "  {}  {}  {} ({})",
            format_optional_timestamp(task.due_at),
            task.customer_id(),
            task.title,
            task.status
        );
    }
    Ok(())
}
