//! Draft subcommands: show, complete, import, import-profile, discard.
//!
//! Each command opens a builder session the same way an editor would, so
//! guest drafts land in the device cache and `--owner` sessions migrate
//! that cache into the durable store on first use.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use console::style;

use redraft_core::draft::sync::SaveOutcome;
use redraft_types::document::ResumeDocument;
use redraft_types::draft::Step;

use crate::state::{AppState, CliBuilder};

#[derive(Args)]
pub struct OwnerArg {
    /// Signed-in owner id. Omit to work as a guest on this device.
    #[arg(long, env = "REDRAFT_OWNER")]
    pub owner: Option<String>,
}

#[derive(Subcommand)]
pub enum DraftCommand {
    /// Show the draft the builder would resume from.
    Show {
        #[command(flatten)]
        owner: OwnerArg,
    },

    /// Complete a step with a JSON section payload and save.
    Complete {
        /// Step to complete (basic_info, work_history, education, summary, review).
        #[arg(long)]
        step: Step,

        /// Sections to merge, as a JSON resume document.
        #[arg(long)]
        data: String,

        #[command(flatten)]
        owner: OwnerArg,
    },

    /// Merge a partial resume document from a JSON file.
    Import {
        #[arg(long)]
        file: PathBuf,

        #[command(flatten)]
        owner: OwnerArg,
    },

    /// Parse pasted profile text with the assistant and merge the result.
    #[command(name = "import-profile")]
    ImportProfile {
        #[arg(long)]
        file: PathBuf,

        #[command(flatten)]
        owner: OwnerArg,
    },

    /// Delete the draft everywhere and start over.
    Discard {
        #[command(flatten)]
        owner: OwnerArg,
    },
}

/// Handle a draft subcommand.
pub async fn handle_draft_command(
    cmd: DraftCommand,
    state: &AppState,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let out = Output { json, quiet };
    match cmd {
        DraftCommand::Show { owner } => show(state, owner, out).await,
        DraftCommand::Complete { step, data, owner } => {
            complete(state, step, &data, owner, out).await
        }
        DraftCommand::Import { file, owner } => import(state, &file, owner, out).await,
        DraftCommand::ImportProfile { file, owner } => {
            import_profile(state, &file, owner, out).await
        }
        DraftCommand::Discard { owner } => discard(state, owner, out).await,
    }
}

#[derive(Clone, Copy)]
struct Output {
    json: bool,
    quiet: bool,
}

impl Output {
    fn styled(&self) -> bool {
        !self.json && !self.quiet
    }
}

async fn show(state: &AppState, owner: OwnerArg, out: Output) -> Result<()> {
    let builder = state.open_builder(owner.owner.as_deref()).await?;
    let working = builder.working_state();

    if out.json {
        let result = serde_json::json!({
            "mode": builder.mode(),
            "current_step": builder.current_step(),
            "last_completed_step": working.last_completed_step,
            "document": working.document,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    if out.quiet {
        return Ok(());
    }

    println!();
    println!(
        "  {} Draft ({})",
        style("*").bold(),
        style(builder.mode()).cyan()
    );
    println!();
    println!("  {:<16} {}", style("Current step").dim(), builder.current_step());
    println!(
        "  {:<16} {}",
        style("Last completed").dim(),
        working
            .last_completed_step
            .map_or_else(|| "none".to_string(), |s| s.to_string())
    );
    let sections: Vec<&str> = working
        .document
        .sections()
        .iter()
        .map(|s| s.as_str())
        .collect();
    println!(
        "  {:<16} {}",
        style("Sections").dim(),
        if sections.is_empty() {
            "none".to_string()
        } else {
            sections.join(", ")
        }
    );
    if builder.show_sign_in_banner() {
        println!();
        println!(
            "  {}",
            style("Saved on this device only. Pass --owner to keep it across devices.").yellow()
        );
    }
    println!();
    Ok(())
}

async fn complete(
    state: &AppState,
    step: Step,
    data: &str,
    owner: OwnerArg,
    out: Output,
) -> Result<()> {
    let document: ResumeDocument =
        serde_json::from_str(data).context("--data must be a JSON resume document")?;

    let builder = state.open_builder(owner.owner.as_deref()).await?;
    builder.jump_to(step);
    let outcome = builder.complete_current_step(document).await;

    report_save(&builder, outcome, &format!("Completed '{step}'"), out)
}

async fn import(state: &AppState, file: &Path, owner: OwnerArg, out: Output) -> Result<()> {
    let raw = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let partial: ResumeDocument = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON resume document", file.display()))?;

    let builder = state.open_builder(owner.owner.as_deref()).await?;
    let outcome = builder.import_external(partial).await;

    report_save(&builder, outcome, "Imported", out)
}

async fn import_profile(
    state: &AppState,
    file: &Path,
    owner: OwnerArg,
    out: Output,
) -> Result<()> {
    let assistant = state.assistant.as_deref().with_context(|| {
        format!(
            "assistant is not configured; set ${}",
            state.config.assistant.api_key_env
        )
    })?;
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let builder = state.open_builder(owner.owner.as_deref()).await?;
    let outcome = builder.import_profile(assistant, &text).await?;

    report_save(&builder, outcome, "Imported profile", out)
}

async fn discard(state: &AppState, owner: OwnerArg, out: Output) -> Result<()> {
    let builder = state.open_builder(owner.owner.as_deref()).await?;
    builder
        .discard()
        .await
        .context("failed to delete the stored draft")?;

    if out.json {
        println!("{}", serde_json::json!({ "discarded": true, "mode": builder.mode() }));
    } else if out.styled() {
        println!();
        println!("  {} Draft discarded", style("ok").green());
        println!();
    }
    Ok(())
}

fn outcome_label(outcome: SaveOutcome) -> &'static str {
    match outcome {
        SaveOutcome::Durable => "durable",
        SaveOutcome::CacheFallback => "cache_fallback",
        SaveOutcome::Cache => "cache",
    }
}

fn report_save(builder: &CliBuilder, outcome: SaveOutcome, action: &str, out: Output) -> Result<()> {
    if out.json {
        let result = serde_json::json!({
            "saved": outcome_label(outcome),
            "mode": builder.mode(),
            "current_step": builder.current_step(),
            "last_completed_step": builder.working_state().last_completed_step,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    if !out.styled() {
        return Ok(());
    }

    let saved = match outcome {
        SaveOutcome::Durable => style("saved").green(),
        SaveOutcome::Cache => style("saved on this device").cyan(),
        SaveOutcome::CacheFallback => {
            style("saved on this device; sync failed and will retry").yellow()
        }
    };
    println!();
    println!("  {} {action}, {saved}", style("ok").green());
    println!(
        "  {} {}",
        style("Next step").dim(),
        style(builder.current_step()).cyan()
    );
    if builder.show_sign_in_banner() {
        println!(
            "  {}",
            style("Pass --owner to keep this draft across devices.").dim()
        );
    }
    println!();
    Ok(())
}
