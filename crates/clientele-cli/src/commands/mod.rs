use anyhow::Result;
use clientele_config::AppConfig;
use clientele_core::domain::CustomerId;
use clientele_store::Store;
use serde::Serialize;
use std::io::{self, Write};

use crate::error::not_found;

pub mod agenda;
pub mod appointments;
pub mod backup;
pub mod communications;
pub mod completions;
pub mod customers;
pub mod tasks;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// The store accepts orphaned references; the CLI does not create new ones.
pub fn require_customer(ctx: &Context<'_>, id: CustomerId) -> Result<()> {
    if ctx.store.customers().exists(id)? {
        Ok(())
    } else {
        Err(not_found(format!("customer {id}")))
    }
}
