//! Inquiry CLI — submit material quote requests from the terminal.
//!
//! A standalone HTTP client for the relay endpoint. Every quote outcome is
//! printed together with a pre-filled WhatsApp link, so the customer always
//! has a second way to reach the supplier.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod client;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use inquiry_core::fallback::{self, DEFAULT_WHATSAPP_NUMBER};
use inquiry_core::form::QuoteForm;

use crate::client::{OutcomeKind, QuoteClient};

// ── ANSI color helpers ───────────────────────────────────────────────

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";

// ── CLI structure ────────────────────────────────────────────────────

/// Request a building-materials quote.
#[derive(Parser)]
#[command(
    name = "inquiry",
    version,
    about = "Inquiry CLI — send material quote requests and newsletter sign-ups",
    long_about = None,
    after_help = format!(
        "{DIM}Environment variables:{RESET}\n  \
         INQUIRY_ENDPOINT   Relay endpoint (default: http://127.0.0.1:3001/send-mail)\n  \
         WHATSAPP_NUMBER    Number for fallback links (default: {DEFAULT_WHATSAPP_NUMBER})\n\n\
         {DIM}Examples:{RESET}\n  \
         inquiry quote --name Asha --phone 9876543210 --material Cement --quantity '50 bags'\n  \
         inquiry subscribe --email asha@example.com\n  \
         inquiry link --name Asha --material Cement"
    ),
)]
struct Cli {
    /// Relay endpoint URL.
    #[arg(long, env = "INQUIRY_ENDPOINT", default_value = "http://127.0.0.1:3001/send-mail")]
    endpoint: String,

    /// WhatsApp number used for fallback links.
    #[arg(long, env = "WHATSAPP_NUMBER", default_value = DEFAULT_WHATSAPP_NUMBER)]
    whatsapp_number: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct QuoteArgs {
    /// Your name.
    #[arg(long)]
    name: String,
    /// Phone number to call back on.
    #[arg(long)]
    phone: String,
    /// Email address (optional).
    #[arg(long, default_value = "")]
    email: String,
    /// Material you need, e.g. Cement, TMT Bars, Sand.
    #[arg(long)]
    material: String,
    /// Quantity (optional).
    #[arg(long, default_value = "")]
    quantity: String,
    /// Additional details (optional).
    #[arg(long, default_value = "")]
    message: String,
}

impl From<QuoteArgs> for QuoteForm {
    fn from(args: QuoteArgs) -> Self {
        Self {
            name: args.name,
            phone: args.phone,
            email: args.email,
            material: args.material,
            quantity: args.quantity,
            message: args.message,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Send a quote request to the relay.
    Quote(QuoteArgs),
    /// Subscribe an address to price updates.
    Subscribe {
        /// Address to subscribe.
        #[arg(long)]
        email: String,
    },
    /// Print a WhatsApp link without contacting the relay.
    Link(LinkArgs),
}

/// Quote fields for `link`; all optional. With none given the link carries
/// the generic greeting.
#[derive(clap::Args)]
struct LinkArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    material: Option<String>,
    #[arg(long)]
    quantity: Option<String>,
    #[arg(long)]
    message: Option<String>,
}

impl LinkArgs {
    fn into_form(self) -> Option<QuoteForm> {
        let form = QuoteForm {
            name: self.name.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            material: self.material.unwrap_or_default(),
            quantity: self.quantity.unwrap_or_default(),
            message: self.message.unwrap_or_default(),
        };
        (!form.is_empty()).then_some(form)
    }
}

// ── Command dispatch ─────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    let client = QuoteClient::new(cli.endpoint, cli.whatsapp_number);

    match run(client, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("  {RED}{BOLD}✗ Error:{RESET} {e:#}");
            eprintln!();
            ExitCode::FAILURE
        }
    }
}

async fn run(mut client: QuoteClient, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Quote(args) => cmd_quote(&mut client, args.into()).await,
        Commands::Subscribe { email } => cmd_subscribe(&client, &email).await,
        Commands::Link(args) => {
            cmd_link(&client, args.into_form().as_ref());
            Ok(())
        }
    }
}

async fn cmd_quote(client: &mut QuoteClient, mut form: QuoteForm) -> Result<()> {
    println!();
    println!("  {DIM}sending inquiry for {}...{RESET}", form.material);

    let outcome = client.submit(&mut form).await;

    println!();
    match outcome.kind {
        OutcomeKind::Success => {
            println!("  {GREEN}{BOLD}✓{RESET} {}", outcome.message);
            println!();
            println!("  {DIM}Contact on WhatsApp:{RESET}");
        }
        OutcomeKind::Error => {
            println!("  {RED}{BOLD}✗{RESET} {}", outcome.message);
            println!();
            println!("  {DIM}Try WhatsApp Instead:{RESET}");
        }
    }
    println!("  {CYAN}{}{RESET}", outcome.fallback_link);
    println!();

    if outcome.is_success() {
        Ok(())
    } else {
        anyhow::bail!("inquiry was not delivered")
    }
}

async fn cmd_subscribe(client: &QuoteClient, email: &str) -> Result<()> {
    client.subscribe(email).await?;
    println!();
    println!("  {GREEN}{BOLD}✓{RESET} Thank you for subscribing! Price updates will reach {email}.");
    println!();
    Ok(())
}

fn cmd_link(client: &QuoteClient, form: Option<&QuoteForm>) {
    let link = match form {
        Some(f) => fallback::quote_link(client.whatsapp_number(), f),
        None => fallback::general_link(client.whatsapp_number()),
    };
    println!("{link}");
}
