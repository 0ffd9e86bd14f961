use crate::commands::{print_json, require_customer, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{
    format_optional, format_timestamp_datetime, format_timestamp_display,
    normalize_optional_value, now_utc, parse_appointment_id, parse_customer_id, parse_status,
    parse_timestamp,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use clientele_core::domain::{ActivityStatus, Appointment, AppointmentNew};
use serde_json::json;
use tracing::debug;

#[derive(Debug, Subcommand)]
pub enum AppointmentCommand {
    Add(AddAppointmentArgs),
    Edit(EditAppointmentArgs),
    Show(AppointmentIdArgs),
    List(ListAppointmentsArgs),
    Delete(AppointmentIdArgs),
    /// Mark an appointment as done
    Done(AppointmentIdArgs),
    /// Mark an appointment as cancelled
    Cancel(AppointmentIdArgs),
}

#[derive(Debug, Args)]
pub struct AddAppointmentArgs {
    /// Customer id
    pub customer: String,
    #[arg(long)]
    pub title: String,
    /// Local date/time, e.g. "2030-01-15 13:45"
    #[arg(long)]
    pub at: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditAppointmentArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub at: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Debug, Args)]
pub struct AppointmentIdArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListAppointmentsArgs {
    #[arg(long)]
    pub customer: Option<String>,
}

pub fn run(ctx: &Context<'_>, command: AppointmentCommand) -> Result<()> {
    match command {
        AppointmentCommand::Add(args) => add_appointment(ctx, args),
        AppointmentCommand::Edit(args) => edit_appointment(ctx, args),
        AppointmentCommand::Show(args) => show_appointment(ctx, args),
        AppointmentCommand::List(args) => list_appointments(ctx, args),
        AppointmentCommand::Delete(args) => delete_appointment(ctx, args),
        AppointmentCommand::Done(args) => set_status(ctx, args, ActivityStatus::Done),
        AppointmentCommand::Cancel(args) => set_status(ctx, args, ActivityStatus::Cancelled),
    }
}

fn add_appointment(ctx: &Context<'_>, args: AddAppointmentArgs) -> Result<()> {
    let customer_id = parse_customer_id(&args.customer)?;
    require_customer(ctx, customer_id)?;
    let status = match args.status {
        Some(raw) => parse_status(&raw)?,
        None => ActivityStatus::default(),
    };

    let appointment = Appointment::new(
        now_utc(),
        AppointmentNew {
            customer_id,
            title: args.title,
            description: args.description.and_then(normalize_optional_value),
            scheduled_at: parse_timestamp(&args.at)?,
            location: args.location.and_then(normalize_optional_value),
            status,
        },
    );
    ctx.store.appointments().add(&appointment)?;
    debug!(id = %appointment.id(), customer = %customer_id, "appointment added");

    if ctx.json {
        print_json(&appointment)?;
    } else {
        println!(
            "created {} {} at {}",
            appointment.id(),
            appointment.title,
            format_timestamp_datetime(appointment.scheduled_at)
        );
    }
    Ok(())
}

fn edit_appointment(ctx: &Context<'_>, args: EditAppointmentArgs) -> Result<()> {
    if args.title.is_none()
        && args.at.is_none()
        && args.description.is_none()
        && args.location.is_none()
        && args.status.is_none()
    {
        return Err(invalid_input("no updates provided"));
    }

    let mut appointment = load(ctx, &args.id)?;
    if let Some(title) = args.title {
        appointment.title = title;
    }
    if let Some(raw) = args.at {
        appointment.scheduled_at = parse_timestamp(&raw)?;
    }
    if let Some(description) = args.description {
        appointment.description = normalize_optional_value(description);
    }
    if let Some(location) = args.location {
        appointment.location = normalize_optional_value(location);
    }
    if let Some(raw) = args.status {
        appointment.status = parse_status(&raw)?;
    }

    ctx.store.appointments().update(&appointment)?;
    debug!(id = %appointment.id(), "appointment updated");
    print_result(ctx, &appointment, "updated")
}

fn set_status(ctx: &Context<'_>, args: AppointmentIdArgs, status: ActivityStatus) -> Result<()> {
    let mut appointment = load(ctx, &args.id)?;
    match status {
        ActivityStatus::Done => appointment.mark_done(),
        ActivityStatus::Cancelled => appointment.mark_cancelled(),
        ActivityStatus::Pending => appointment.status = ActivityStatus::Pending,
    }
    ctx.store.appointments().update(&appointment)?;
    debug!(id = %appointment.id(), status = %status, "appointment status changed");
    print_result(ctx, &appointment, "marked")
}

fn show_appointment(ctx: &Context<'_>, args: AppointmentIdArgs) -> Result<()> {
    let appointment = load(ctx, &args.id)?;
    if ctx.json {
        return print_json(&appointment);
    }

    println!("ID: {}", appointment.id());
    println!("Customer ID: {}", appointment.customer_id());
    println!("Title: {}", appointment.title);
    println!(
        "Description: {}",
        format_optional(appointment.description.as_deref())
    );
    println!(
        "Appointment Date: {}",
        format_timestamp_display(appointment.scheduled_at)
    );
    println!("Location: {}", format_optional(appointment.location.as_deref()));
    println!("Status: {}", appointment.status);
    println!(
        "Created At: {}",
        format_timestamp_display(appointment.created_at())
    );
    Ok(())
}

fn list_appointments(ctx: &Context<'_>, args: ListAppointmentsArgs) -> Result<()> {
    let appointments = match args.customer {
        Some(raw) => ctx
            .store
            .appointments()
            .list_for_customer(parse_customer_id(&raw)?)?,
        None => ctx.store.appointments().list_all()?,
    };

    if ctx.json {
        return print_json(&appointments);
    }
    if appointments.is_empty() {
        println!("no appointments");
        return Ok(());
    }
    let now = now_utc();
    for appointment in appointments {
        let marker = if appointment.is_upcoming(now) { "*" } else { " " };
        println!(
            "{} {}  {}  {}  {}",
            marker,
            appointment.id(),
            format_timestamp_datetime(appointment.scheduled_at),
            appointment.status,
            appointment.title
        );
    }
    Ok(())
}

fn delete_appointment(ctx: &Context<'_>, args: AppointmentIdArgs) -> Result<()> {
    let id = parse_appointment_id(&args.id)?;
    ctx.store.appointments().delete(id)?;
    debug!(id = %id, "appointment deleted");
    if ctx.json {
        print_json(&json!({ "deleted": id }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}

fn load(ctx: &Context<'_>, raw_id: &str) -> Result<Appointment> {
    let id = parse_appointment_id(raw_id)?;
    ctx.store
        .appointments()
        .get(id)?
        .ok_or_else(|| not_found("appointment not found"))
}

fn print_result(ctx: &Context<'_>, appointment: &Appointment, verb: &str) -> Result<()> {
    if ctx.json {
        print_json(appointment)
    } else {
        println!(
            "{} {} {} ({})",
            verb,
            appointment.id(),
            appointment.title,
            appointment.status
        );
        Ok(())
    }
}
