use crate::commands::{print_json, require_customer, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{
    format_optional, format_timestamp_datetime, format_timestamp_display,
    normalize_optional_value, now_utc, parse_communication_id, parse_communication_type,
    parse_customer_id, parse_outcome,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use clientele_core::domain::{Communication, CommunicationChannel, CommunicationNew};
use serde_json::json;
use tracing::debug;

#[derive(Debug, Subcommand)]
pub enum CommunicationCommand {
    /// Log a phone call
    #[command(name = "add-call")]
    AddCall(AddCallArgs),
    /// Log an email
    #[command(name = "add-email")]
    AddEmail(AddEmailArgs),
    Edit(EditCommunicationArgs),
    Show(CommunicationIdArgs),
    List(ListCommunicationsArgs),
    Delete(CommunicationIdArgs),
}

#[derive(Debug, Args)]
pub struct AddCallArgs {
    /// Customer id
    pub customer: String,
    #[arg(long)]
    pub subject: String,
    #[arg(long)]
    pub message: Option<String>,
    /// Call length in seconds
    #[arg(long, default_value_t = 0)]
    pub duration: u32,
    /// answered|no-answer|voicemail|busy
    #[arg(long, default_value = "answered")]
    pub outcome: String,
}

#[derive(Debug, Args)]
pub struct AddEmailArgs {
    /// Customer id
    pub customer: String,
    #[arg(long)]
    pub subject: String,
    #[arg(long)]
    pub message: Option<String>,
    #[arg(long = "to")]
    pub recipient: Option<String>,
    #[arg(long)]
    pub attachment: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditCommunicationArgs {
    pub id: String,
    #[arg(long)]
    pub subject: Option<String>,
    #[arg(long)]
    pub message: Option<String>,
    #[arg(long)]
    pub duration: Option<u32>,
    #[arg(long)]
    pub outcome: Option<String>,
    #[arg(long = "to")]
    pub recipient: Option<String>,
    #[arg(long)]
    pub attachment: Option<String>,
}

#[derive(Debug, Args)]
pub struct CommunicationIdArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListCommunicationsArgs {
    #[arg(long, conflicts_with = "kind")]
    pub customer: Option<String>,
    /// call|email
    #[arg(long = "type")]
    pub kind: Option<String>,
}

pub fn run(ctx: &Context<'_>, command: CommunicationCommand) -> Result<()> {
    match command {
        CommunicationCommand::AddCall(args) => add_call(ctx, args),
        CommunicationCommand::AddEmail(args) => add_email(ctx, args),
        CommunicationCommand::Edit(args) => edit_communication(ctx, args),
        CommunicationCommand::Show(args) => show_communication(ctx, args),
        CommunicationCommand::List(args) => list_communications(ctx, args),
        CommunicationCommand::Delete(args) => delete_communication(ctx, args),
    }
}

fn add_call(ctx: &Context<'_>, args: AddCallArgs) -> Result<()> {
    let customer_id = parse_customer_id(&args.customer)?;
    let channel = CommunicationChannel::Call {
        duration_seconds: args.duration,
        outcome: parse_outcome(&args.outcome)?,
    };
    add_communication(
        ctx,
        CommunicationNew {
            customer_id,
            subject: args.subject,
            message: args.message.and_then(normalize_optional_value),
            channel,
        },
    )
}

fn add_email(ctx: &Context<'_>, args: AddEmailArgs) -> Result<()> {
    let customer_id = parse_customer_id(&args.customer)?;
    let channel = CommunicationChannel::Email {
        recipient_email: args.recipient.and_then(normalize_optional_value),
        attachment_name: args.attachment.and_then(normalize_optional_value),
    };
    add_communication(
        ctx,
        CommunicationNew {
            customer_id,
            subject: args.subject,
            message: args.message.and_then(normalize_optional_value),
            channel,
        },
    )
}

fn add_communication(ctx: &Context<'_>, input: CommunicationNew) -> Result<()> {
    require_customer(ctx, input.customer_id)?;
    let communication = Communication::new(now_utc(), input);
    ctx.store.communications().add(&communication)?;
    debug!(
        id = %communication.id(),
        kind = %communication.kind(),
        "communication added"
    );

    if ctx.json {
        print_json(&communication)?;
    } else {
        println!(
            "logged {} {} {}",
            communication.kind(),
            communication.id(),
            communication.subject
        );
    }
    Ok(())
}

fn edit_communication(ctx: &Context<'_>, args: EditCommunicationArgs) -> Result<()> {
    let call_fields = args.duration.is_some() || args.outcome.is_some();
    let email_fields = args.recipient.is_some() || args.attachment.is_some();
    if args.subject.is_none() && args.message.is_none() && !call_fields && !email_fields {
        return Err(invalid_input("no updates provided"));
    }

    let mut communication = load(ctx, &args.id)?;
    if let Some(subject) = args.subject {
        communication.subject = subject;
    }
    if let Some(message) = args.message {
        communication.message = normalize_optional_value(message);
    }

    match &mut communication.channel {
        CommunicationChannel::Call {
            duration_seconds,
            outcome,
        } => {
            if email_fields {
                return Err(invalid_input("--to/--attachment only apply to emails"));
            }
            if let Some(value) = args.duration {
                *duration_seconds = value;
            }
            if let Some(raw) = args.outcome {
                *outcome = parse_outcome(&raw)?;
            }
        }
        CommunicationChannel::Email {
            recipient_email,
            attachment_name,
        } => {
            if call_fields {
                return Err(invalid_input("--duration/--outcome only apply to calls"));
            }
            if let Some(value) = args.recipient {
                *recipient_email = normalize_optional_value(value);
            }
            if let Some(value) = args.attachment {
                *attachment_name = normalize_optional_value(value);
            }
        }
    }

    ctx.store.communications().update(&communication)?;
    debug!(id = %communication.id(), "communication updated");
    if ctx.json {
        print_json(&communication)?;
    } else {
        println!("updated {} {}", communication.id(), communication.subject);
    }
    Ok(())
}

fn show_communication(ctx: &Context<'_>, args: CommunicationIdArgs) -> Result<()> {
    let communication = load(ctx, &args.id)?;
    if ctx.json {
        return print_json(&communication);
    }

    println!("Communication ID: {}", communication.id());
    println!("Customer ID: {}", communication.customer_id());
    println!("Type: {}", communication.kind());
    println!("Subject: {}", communication.subject);
    println!(
        "Message: {}",
        format_optional(communication.message.as_deref())
    );
    println!(
        "Created At: {}",
        format_timestamp_display(communication.created_at())
    );
    match &communication.channel {
        CommunicationChannel::Call {
            duration_seconds,
            outcome,
        } => {
            println!("Call Duration: {} sec", duration_seconds);
            println!("Outcome: {}", outcome);
        }
        CommunicationChannel::Email {
            recipient_email,
            attachment_name,
        } => {
            println!(
                "Recipient Email: {}",
                format_optional(recipient_email.as_deref())
            );
            println!(
                "Attachment: {}",
                attachment_name.as_deref().unwrap_or("None")
            );
        }
    }
    Ok(())
}

fn list_communications(ctx: &Context<'_>, args: ListCommunicationsArgs) -> Result<()> {
    let communications = match (args.customer, args.kind) {
        (Some(raw), _) => ctx
            .store
            .communications()
            .list_for_customer(parse_customer_id(&raw)?)?,
        (None, Some(raw)) => ctx
            .store
            .communications()
            .list_by_type(parse_communication_type(&raw)?)?,
        (None, None) => ctx.store.communications().list_all()?,
    };

    if ctx.json {
        return print_json(&communications);
    }
    if communications.is_empty() {
        println!("no communications");
        return Ok(());
    }
    for communication in communications {
        println!(
            "{}  {}  {:<5}  {}",
            communication.id(),
            format_timestamp_datetime(communication.created_at()),
            communication.kind().as_str(),
            communication.subject
        );
    }
    Ok(())
}

fn delete_communication(ctx: &Context<'_>, args: CommunicationIdArgs) -> Result<()> {
    let id = parse_communication_id(&args.id)?;
    ctx.store.communications().delete(id)?;
    debug!(id = %id, "communication deleted");
    if ctx.json {
        print_json(&json!({ "deleted": id }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}

fn load(ctx: &Context<'_>, raw_id: &str) -> Result<Communication> {
    let id = parse_communication_id(raw_id)?;
    ctx.store
        .communications()
        .get(id)?
        .ok_or_else(|| not_found("communication not found"))
}
