use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{
    format_optional, format_timestamp_display, normalize_optional_value, now_utc, parse_category,
    parse_customer_id,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use clientele_core::domain::{Customer, CustomerNew};
use clientele_core::dto::CustomerOverviewDto;
use serde_json::json;
use tracing::debug;

#[derive(Debug, Subcommand)]
pub enum CustomerCommand {
    Add(AddCustomerArgs),
    Edit(EditCustomerArgs),
    Show(ShowCustomerArgs),
    List(ListCustomersArgs),
    Delete(DeleteCustomerArgs),
    #[command(name = "find-email")]
    FindEmail(FindEmailArgs),
}

#[derive(Debug, Args)]
pub struct AddCustomerArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub email: String,
    /// new|regular|vip (defaults to the configured category)
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditCustomerArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    /// Pass an empty string to clear.
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowCustomerArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListCustomersArgs {
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeleteCustomerArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct FindEmailArgs {
    pub email: String,
}

pub fn run(ctx: &Context<'_>, command: CustomerCommand) -> Result<()> {
    match command {
        CustomerCommand::Add(args) => add_customer(ctx, args),
        CustomerCommand::Edit(args) => edit_customer(ctx, args),
        CustomerCommand::Show(args) => show_customer(ctx, args),
        CustomerCommand::List(args) => list_customers(ctx, args),
        CustomerCommand::Delete(args) => delete_customer(ctx, args),
        CustomerCommand::FindEmail(args) => find_by_email(ctx, args),
    }
}

fn add_customer(ctx: &Context<'_>, args: AddCustomerArgs) -> Result<()> {
    let category = match args.category {
        Some(raw) => parse_category(&raw)?,
        None => ctx.config.default_category,
    };
    let customer = Customer::new(
        now_utc(),
        CustomerNew {
            full_name: args.name,
            phone: args.phone,
            email: args.email,
            category,
            notes: args.notes.and_then(normalize_optional_value),
        },
    );
    ctx.store.customers().add(&customer)?;
    debug!(id = %customer.id(), "customer added");

    if ctx.json {
        print_json(&customer)?;
    } else {
        println!("created {} {}", customer.id(), customer.full_name);
    }
    Ok(())
}

fn edit_customer(ctx: &Context<'_>, args: EditCustomerArgs) -> Result<()> {
    let id = parse_customer_id(&args.id)?;
    if args.name.is_none()
        && args.phone.is_none()
        && args.email.is_none()
        && args.category.is_none()
        && args.notes.is_none()
    {
        return Err(invalid_input("no updates provided"));
    }

    let mut customer = ctx
        .store
        .customers()
        .get(id)?
        .ok_or_else(|| not_found("customer not found"))?;
    if let Some(name) = args.name {
        customer.full_name = name;
    }
    if let Some(phone) = args.phone {
        customer.phone = phone;
    }
    if let Some(email) = args.email {
        customer.email = email;
    }
    if let Some(raw) = args.category {
        customer.category = parse_category(&raw)?;
    }
    if let Some(notes) = args.notes {
        customer.notes = normalize_optional_value(notes);
    }

    ctx.store.customers().update(&customer)?;
    debug!(id = %customer.id(), "customer updated");

    if ctx.json {
        print_json(&customer)?;
    } else {
        println!("updated {} {}", customer.id(), customer.full_name);
    }
    Ok(())
}

fn show_customer(ctx: &Context<'_>, args: ShowCustomerArgs) -> Result<()> {
    let id = parse_customer_id(&args.id)?;
    let customer = ctx
        .store
        .customers()
        .get(id)?
        .ok_or_else(|| not_found("customer not found"))?;

    let overview = CustomerOverviewDto {
        appointments: ctx.store.appointments().list_for_customer(id)?,
        tasks: ctx.store.tasks().list_for_customer(id)?,
        communications: ctx.store.communications().list_for_customer(id)?,
        customer,
    };

    if ctx.json {
        return print_json(&overview);
    }

    let customer = &overview.customer;
    println!("ID: {}", customer.id());
    println!("Full Name: {}", customer.full_name);
    println!("Phone Number: {}", customer.phone);
    println!("Email: {}", customer.email);
    println!("Category: {}", customer.category);
    println!("Notes: {}", format_optional(customer.notes.as_deref()));
    println!("Created at: {}", format_timestamp_display(customer.created_at()));
    println!(
        "Appointments: {}  Tasks: {}  Communications: {}",
        overview.appointments.len(),
        overview.tasks.len(),
        overview.communications.len()
    );
    Ok(())
}

fn list_customers(ctx: &Context<'_>, args: ListCustomersArgs) -> Result<()> {
    let customers = match args.category {
        Some(raw) => ctx
            .store
            .customers()
            .list_by_category(parse_category(&raw)?)?,
        None => ctx.store.customers().list_all()?,
    };

    if ctx.json {
        return print_json(&customers);
    }
    if customers.is_empty() {
        println!("no customers");
        return Ok(());
    }
    for customer in customers {
        println!(
            "{}  {}  {}  {}  {}",
            customer.id(),
            customer.full_name,
            customer.phone,
            customer.email,
            customer.category
        );
    }
    Ok(())
}

fn delete_customer(ctx: &Context<'_>, args: DeleteCustomerArgs) -> Result<()> {
    let id = parse_customer_id(&args.id)?;
    ctx.store.customers().delete(id)?;
    debug!(id = %id, "customer deleted");
    if ctx.json {
        print_json(&json!({ "deleted": id }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}

fn find_by_email(ctx: &Context<'_>, args: FindEmailArgs) -> Result<()> {
    let customer = ctx
        .store
        .customers()
        .find_by_email(&args.email)?
        .ok_or_else(|| not_found(format!("no customer with email {}", args.email.trim())))?;
    if ctx.json {
        print_json(&customer)?;
    } else {
        println!("{} {}", customer.id(), customer.full_name);
    }
    Ok(())
}
