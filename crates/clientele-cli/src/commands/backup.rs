use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use clap::Args;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Args)]
pub struct BackupArgs {
    /// Destination file for the copy
    pub path: PathBuf,
}

pub fn backup(ctx: &Context<'_>, args: BackupArgs) -> Result<()> {
    ctx.store
        .backup_to(&args.path)
        .with_context(|| format!("backup to {}", args.path.display()))?;
    info!(path = %args.path.display(), "backup written");
    if ctx.json {
        print_json(&json!({ "backup": args.path.display().to_string() }))?;
    } else {
        println!("backup written to {}", args.path.display());
    }
    Ok(())
}
