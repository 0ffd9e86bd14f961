use crate::commands::{print_json, require_customer, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{
    format_optional, format_optional_timestamp, format_timestamp_display,
    normalize_optional_value, now_utc, parse_customer_id, parse_optional_timestamp, parse_status,
    parse_task_id, parse_timestamp,
};
use anyhow::Result;
use clap::{ArgAction, Args, Subcommand};
use clientele_core::domain::{ActivityStatus, Task, TaskNew};
use serde_json::json;
use tracing::debug;

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    Add(AddTaskArgs),
    Edit(EditTaskArgs),
    Show(TaskIdArgs),
    List(ListTasksArgs),
    Delete(TaskIdArgs),
    /// Mark a task as done
    Done(TaskIdArgs),
    /// Mark a task as cancelled
    Cancel(TaskIdArgs),
}

#[derive(Debug, Args)]
pub struct AddTaskArgs {
    /// Customer id
    pub customer: String,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    /// Local date/time, e.g. "2030-01-15" or "2030-01-15 17:00"
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditTaskArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long, conflicts_with = "clear_due")]
    pub due: Option<String>,
    #[arg(long, action = ArgAction::SetTrue)]
    pub clear_due: bool,
}

#[derive(Debug, Args)]
pub struct TaskIdArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListTasksArgs {
    #[arg(long, conflicts_with = "overdue")]
    pub customer: Option<String>,
    #[arg(long, action = ArgAction::SetTrue)]
    pub overdue: bool,
}

pub fn run(ctx: &Context<'_>, command: TaskCommand) -> Result<()> {
    match command {
        TaskCommand::Add(args) => add_task(ctx, args),
        TaskCommand::Edit(args) => edit_task(ctx, args),
        TaskCommand::Show(args) => show_task(ctx, args),
        TaskCommand::List(args) => list_tasks(ctx, args),
        TaskCommand::Delete(args) => delete_task(ctx, args),
        TaskCommand::Done(args) => set_status(ctx, args, ActivityStatus::Done),
        TaskCommand::Cancel(args) => set_status(ctx, args, ActivityStatus::Cancelled),
    }
}

fn add_task(ctx: &Context<'_>, args: AddTaskArgs) -> Result<()> {
    let customer_id = parse_customer_id(&args.customer)?;
    require_customer(ctx, customer_id)?;
    let status = match args.status {
        Some(raw) => parse_status(&raw)?,
        None => ActivityStatus::default(),
    };

    let task = Task::new(
        now_utc(),
        TaskNew {
            customer_id,
            title: args.title,
            description: args.description.and_then(normalize_optional_value),
            status,
            due_at: parse_optional_timestamp(args.due.as_deref())?,
        },
    );
    ctx.store.tasks().add(&task)?;
    debug!(id = %task.id(), customer = %customer_id, "task added");

    if ctx.json {
        print_json(&task)?;
    } else {
        println!("created {} {}", task.id(), task.title);
    }
    Ok(())
}

fn edit_task(ctx: &Context<'_>, args: EditTaskArgs) -> Result<()> {
    if args.title.is_none()
        && args.description.is_none()
        && args.status.is_none()
        && args.due.is_none()
        && !args.clear_due
    {
        return Err(invalid_input("no updates provided"));
    }

    let mut task = load(ctx, &args.id)?;
    if let Some(title) = args.title {
        task.title = title;
    }
    if let Some(description) = args.description {
        task.description = normalize_optional_value(description);
    }
    if let Some(raw) = args.status {
        task.status = parse_status(&raw)?;
    }
    if let Some(raw) = args.due {
        task.due_at = Some(parse_timestamp(&raw)?);
    }
    if args.clear_due {
        task.due_at = None;
    }

    ctx.store.tasks().update(&task)?;
    debug!(id = %task.id(), "task updated");
    print_result(ctx, &task, "updated")
}

fn set_status(ctx: &Context<'_>, args: TaskIdArgs, status: ActivityStatus) -> Result<()> {
    let mut task = load(ctx, &args.id)?;
    match status {
        ActivityStatus::Done => task.mark_done(),
        ActivityStatus::Cancelled => task.mark_cancelled(),
        ActivityStatus::Pending => task.status = ActivityStatus::Pending,
    }
    ctx.store.tasks().update(&task)?;
    debug!(id = %task.id(), status = %status, "task status changed");
    print_result(ctx, &task, "marked")
}

fn show_task(ctx: &Context<'_>, args: TaskIdArgs) -> Result<()> {
    let task = load(ctx, &args.id)?;
    if ctx.json {
        return print_json(&task);
    }

    println!("Task ID: {}", task.id());
    println!("Customer ID: {}", task.customer_id());
    println!("Title: {}", task.title);
    println!("Description: {}", format_optional(task.description.as_deref()));
    println!("Status: {}", task.status);
    println!("Due Date: {}", format_optional_timestamp(task.due_at));
    println!("Created At: {}", format_timestamp_display(task.created_at()));
    if task.is_overdue(now_utc()) {
        println!("Overdue: yes");
    }
    Ok(())
}

fn list_tasks(ctx: &Context<'_>, args: ListTasksArgs) -> Result<()> {
    let now = now_utc();
    let tasks = if args.overdue {
        ctx.store.tasks().list_overdue(now)?
    } else {
        match args.customer {
            Some(raw) => ctx
                .store
                .tasks()
                .list_for_customer(parse_customer_id(&raw)?)?,
            None => ctx.store.tasks().list_all()?,
        }
    };

    if ctx.json {
        return print_json(&tasks);
    }
    if tasks.is_empty() {
        println!("no tasks");
        return Ok(());
    }
    for task in tasks {
        let marker = if task.is_overdue(now) { "!" } else { " " };
        println!(
            "{} {}  {}  {}  {}",
            marker,
            task.id(),
            format_optional_timestamp(task.due_at),
            task.status,
            task.title
        );
    }
    Ok(())
}

fn delete_task(ctx: &Context<'_>, args: TaskIdArgs) -> Result<()> {
    let id = parse_task_id(&args.id)?;
    ctx.store.tasks().delete(id)?;
    debug!(id = %id, "task deleted");
    if ctx.json {
        print_json(&json!({ "deleted": id }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}

fn load(ctx: &Context<'_>, raw_id: &str) -> Result<Task> {
    let id = parse_task_id(raw_id)?;
    ctx.store
        .tasks()
        .get(id)?
        .ok_or_else(|| not_found("task not found"))
}

fn print_result(ctx: &Context<'_>, task: &Task, verb: &str) -> Result<()> {
    if ctx.json {
        print_json(task)
    } else {
        println!("{} {} {} ({})", verb, task.id(), task.title, task.status);
        Ok(())
    }
}
