//! Mailbox - terminal front end for the Appsus email service
//!
//! Lists, reads and mutates the local mail collection. Each invocation
//! runs one command against the SQLite-backed store.

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{error, info, warn};
use mail::{EmailFilter, EmailId, EmailService, MailConfig, MailStatus, SentWithin, TrashOutcome};

mod render;

#[derive(Parser)]
#[command(name = "mailbox")]
#[command(about = "Appsus mailbox: filter and manage local email", long_about = None)]
struct Cli {
    /// Print records as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List emails matching a filter
    List {
        /// Case-insensitive text to look for in subject, body, sender or recipient
        #[arg(long, default_value = "")]
        txt: String,

        /// Only show read emails
        #[arg(long)]
        read: bool,

        /// Sent-date range: any_time, 1_week_ago, 1_month_ago, 6_month_ago, 1_year_ago, over_1_year
        #[arg(long, default_value = "any_time")]
        sent_at: SentWithin,

        /// Mailbox facet: all, inbox, sent, starred, drafts, trash
        #[arg(long, default_value = "all")]
        status: MailStatus,
    },

    /// Show one email with its neighbours
    Show { id: String },

    /// Toggle the star on an email
    Star { id: String },

    /// Toggle the read state of an email
    Read { id: String },

    /// Toggle the mark on an email
    Mark { id: String },

    /// Move an email to trash, or delete it if already trashed
    Trash { id: String },

    /// Delete an email permanently
    Rm { id: String },

    /// Compose and send a new email
    Compose {
        #[arg(long)]
        to: String,

        #[arg(long, default_value = "")]
        subject: String,

        #[arg(long, default_value = "")]
        body: String,

        /// Save as a draft
        #[arg(long)]
        draft: bool,
    },

    /// Clear the mailbox so it is reseeded with sample emails
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Bootstrap config and data directories
    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    let cli = Cli::parse();

    let mail_config = MailConfig::load().unwrap_or_else(|e| {
        warn!("Falling back to default mail settings: {:#}", e);
        if let Some(path) = MailConfig::default_config_path() {
            warn!("Settings are read from {}", path.display());
        }
        MailConfig::default()
    });

    let service = EmailService::open(&mail_config)?;
    run(&service, cli.cmd, cli.json).await
}

async fn run(service: &EmailService, cmd: Command, json: bool) -> Result<()> {
    match cmd {
        Command::List {
            txt,
            read,
            sent_at,
            status,
        } => {
            let filter = EmailFilter::default()
                .with_txt(txt)
                .with_read(read)
                .with_sent_within(sent_at)
                .with_status(status);
            let emails = service.query(&filter).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&emails)?);
            } else {
                print!("{}", render::table(&emails));
            }
        }

        Command::Show { id } => {
            let email = service.get_by_id(&EmailId::new(id)).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&email)?);
            } else {
                print!("{}", render::detail(&email));
            }
        }

        Command::Star { id } => {
            let email = service.toggle_star(&EmailId::new(id)).await?;
            println!("{}", render::row(&email));
        }

        Command::Read { id } => {
            let email = service.toggle_read(&EmailId::new(id)).await?;
            println!("{}", render::row(&email));
        }

        Command::Mark { id } => {
            let email = service.toggle_marked(&EmailId::new(id)).await?;
            println!("{}", render::row(&email));
        }

        Command::Trash { id } => match service.toggle_trash(&EmailId::new(id)).await? {
            TrashOutcome::Trashed(email) => println!("Trashed {}", render::row(&email)),
            TrashOutcome::Deleted(id) => println!("Deleted {}", id),
        },

        Command::Rm { id } => {
            let id = EmailId::new(id);
            service.remove(&id).await?;
            println!("Deleted {}", id);
        }

        Command::Compose {
            to,
            subject,
            body,
            draft,
        } => {
            let mut email = service.empty_email(&to, &subject, &body);
            email.is_draft = draft;
            let saved = service.save(email).await?;
            println!("{}", render::row(&saved));
        }

        Command::Reset => {
            service.reset().await?;
            info!("Mailbox will be reseeded on next listing");
        }
    }

    Ok(())
}
