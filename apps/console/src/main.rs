use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    badge_for_status, Badge, BadgeStyle, BatchApiError, BatchCallClient, DetailView, ListRender,
    ListView,
};
use shared::domain::BatchCallId;
use shared::protocol::BatchCallSummary;

#[derive(Parser, Debug)]
struct Cli {
    /// Base URL of the batch-calling API.
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    api_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List batch call campaigns.
    List {
        /// Filter the fetched list by name (client-side).
        #[arg(long)]
        query: Option<String>,
    },
    /// Show one campaign with its recipients.
    Show { id: String },
    /// Cancel a campaign. Asks for confirmation unless --yes is passed.
    Cancel {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Re-dispatch a campaign's failed calls.
    Retry { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("warn").init();
    let cli = Cli::parse();
    let client = BatchCallClient::new(&cli.api_url);

    match cli.command {
        Command::List { query } => {
            println!("Loading batch calls...");
            let mut view = ListView::new(client.list_batch_calls().await?);
            if let Some(query) = query {
                view.set_query(query);
            }
            render_list(&view);
        }
        Command::Show { id } => {
            let id = BatchCallId::new(id);
            show_batch_call(&client, &id).await?;
        }
        Command::Cancel { id, yes } => {
            let id = BatchCallId::new(id);
            if !yes
                && !confirm(&format!(
                    "Cancel batch call {id}? This stops all pending calls."
                ))?
            {
                println!("aborted");
                return Ok(());
            }
            if let Err(err) = client.cancel_batch_call(&id).await {
                eprintln!("failed to cancel batch call: {err}");
                std::process::exit(1);
            }
            // Re-fetch from the source of truth instead of patching local
            // state.
            show_batch_call(&client, &id).await?;
        }
        Command::Retry { id } => {
            let id = BatchCallId::new(id);
            if let Err(err) = client.retry_batch_call(&id).await {
                eprintln!("failed to retry batch call: {err}");
                std::process::exit(1);
            }
            show_batch_call(&client, &id).await?;
        }
    }

    Ok(())
}

async fn show_batch_call(client: &BatchCallClient, id: &BatchCallId) -> Result<()> {
    println!("Loading batch call {id}...");
    match client.get_batch_call(id).await {
        Ok(detail) => {
            render_detail(&DetailView::new(detail));
            Ok(())
        }
        Err(BatchApiError::NotFound) => {
            eprintln!("batch call {id} not found");
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn render_list(view: &ListView) {
    match view.render() {
        ListRender::EmptyState => println!("No batch calls yet."),
        ListRender::NoResults => println!("No batch calls match the current search."),
        ListRender::Rows(rows) => {
            println!(
                "{:<24} {:<28} {:>9} {:>14}  STATUS",
                "ID", "NAME", "CALLS", "CREATED"
            );
            for batch in rows {
                println!(
                    "{:<24} {:<28} {:>9} {:>14}  {}",
                    batch.id,
                    batch.name,
                    format!(
                        "{}/{}",
                        batch.total_calls_dispatched, batch.total_calls_scheduled
                    ),
                    batch.created_at.format("%Y-%m-%d"),
                    paint(&badge_for_status(batch.status.as_str())),
                );
            }
        }
    }
}

fn render_detail(view: &DetailView) {
    let batch = &view.detail.batch;
    println!("{} ({})", batch.name, batch.id);
    println!(
        "  agent:   {}",
        batch.agent_name.as_deref().unwrap_or(batch.agent_id.as_str())
    );
    println!("  status:  {}", paint(&badge_for_status(batch.status.as_str())));
    println!("  created: {}", batch.created_at.format("%Y-%m-%d %H:%M"));
    if let Some(scheduled_at) = batch.scheduled_at {
        println!("  scheduled: {}", scheduled_at.format("%Y-%m-%d %H:%M"));
    }
    if let Some(provider) = provider_line(batch) {
        println!("  line:    {provider}");
    }
    println!("  {}", view.progress_label());

    let stats = view.recipient_stats();
    println!(
        "  recipients: {} total, {} completed, {} failed, {} voicemail, {} cancelled, {} in flight",
        stats.total, stats.completed, stats.failed, stats.voicemail, stats.cancelled, stats.in_flight
    );

    if view.detail.recipients.is_empty() {
        println!("\nNo recipients in this batch call.");
        return;
    }

    println!("\n{:<24} {:<18} {:<26}  STATUS", "ID", "TARGET", "CONVERSATION");
    for recipient in &view.detail.recipients {
        let target = recipient
            .phone_number
            .as_deref()
            .or(recipient.whatsapp_user_id.as_deref())
            .unwrap_or("-");
        let conversation = recipient
            .conversation_id
            .as_ref()
            .map(|id| id.as_str())
            .unwrap_or("-");
        println!(
            "{:<24} {:<18} {:<26}  {}",
            recipient.id,
            target,
            conversation,
            paint(&badge_for_status(recipient.status.as_str())),
        );
    }
}

fn provider_line(batch: &BatchCallSummary) -> Option<String> {
    let number = batch.phone_number_id.as_ref()?;
    match &batch.phone_provider {
        Some(provider) => Some(format!("{number} ({provider})")),
        None => Some(number.to_string()),
    }
}

fn paint(badge: &Badge) -> String {
    let color = match badge.style {
        BadgeStyle::Pending => "33",
        BadgeStyle::Active => "34",
        BadgeStyle::Success => "32",
        BadgeStyle::Danger => "31",
        BadgeStyle::Muted => "90",
        BadgeStyle::Voicemail => "35",
    };
    format!("\x1b[{color}m{}\x1b[0m", badge.label)
}
