//! `intake`: terminal dashboard and submission tool for lead intake.
//!
//! # Usage
//!
//! ```text
//! intake --url http://localhost:8080 --user admin --password secret
//! intake --config ~/.config/intake/config.toml
//! intake submit --first-name Li --last-name Zijin --email li@example.com \
//!   --country "South Korea" --linked-in https://linkedin.com/in/lizijin \
//!   --visa O-1 --visa EB-1A --resume ./cv.pdf
//! ```

mod app;
mod client;
mod ui;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result, bail};
use app::App;
use clap::{Args as ClapArgs, Parser, Subcommand};
use client::{ApiClient, ApiConfig, Resume};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use intake_core::validate::{self, RawSubmission};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "intake", about = "Terminal dashboard for lead intake")]
struct Args {
  /// Path to a TOML config file (url, username, password).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the intake server (default: http://localhost:8080).
  #[arg(long, env = "INTAKE_URL")]
  url: Option<String>,

  /// Admin username.
  #[arg(long, env = "INTAKE_USER")]
  user: Option<String>,

  /// Admin password (plaintext).
  #[arg(long, env = "INTAKE_PASSWORD")]
  password: Option<String>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Check a lead locally, then submit it the way the public form does.
  Submit(SubmitArgs),
}

#[derive(ClapArgs, Debug)]
struct SubmitArgs {
  #[arg(long)]
  first_name:      Option<String>,
  #[arg(long)]
  last_name:       Option<String>,
  #[arg(long)]
  email:           Option<String>,
  #[arg(long)]
  country:         Option<String>,
  #[arg(long)]
  linked_in:       Option<String>,
  /// Visa category; repeat for several (`O-1`, `EB-1A`, `EB-2 NIW`, `I don't know`).
  #[arg(long = "visa", value_name = "CATEGORY")]
  visa_categories: Vec<String>,
  #[arg(long)]
  additional_info: Option<String>,
  /// Resume file to attach.
  #[arg(long, value_name = "FILE")]
  resume:          Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:      String,
  #[serde(default)]
  username: String,
  #[serde(default)]
  password: String,
}

/// `flag`, else the non-empty file value, else `default`.
fn pick(flag: Option<String>, file: &str, default: &str) -> String {
  flag
    .or_else(|| (!file.is_empty()).then(|| file.to_string()))
    .unwrap_or_else(|| default.to_string())
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: pick(args.url, &file_cfg.url, "http://localhost:8080"),
    username: pick(args.user, &file_cfg.username, ""),
    password: pick(args.password, &file_cfg.password, ""),
  };
  let client = ApiClient::new(api_config)?;

  match args.command {
    Some(Command::Submit(submit_args)) => submit(&client, submit_args).await,
    None => dashboard(client).await,
  }
}

// ─── Submit ───────────────────────────────────────────────────────────────────

async fn submit(client: &ApiClient, args: SubmitArgs) -> Result<()> {
  // The terminal is not taken over here, so logs can go to stderr.
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let visa_categories = (!args.visa_categories.is_empty())
    .then(|| serde_json::to_string(&args.visa_categories))
    .transpose()
    .context("encoding visa categories")?;

  let resume = match &args.resume {
    Some(path) => {
      let contents = std::fs::read(path)
        .with_context(|| format!("reading resume {}", path.display()))?;
      let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string());
      Some(Resume { file_name, contents })
    }
    None => None,
  };

  let raw = RawSubmission {
    first_name: args.first_name,
    last_name: args.last_name,
    email: args.email,
    country: args.country,
    linked_in: args.linked_in,
    visa_categories,
    additional_info: args.additional_info,
    resume_file_name: resume.as_ref().map(|r| r.file_name.clone()),
  };

  if let Err(errors) = validate::validate(&raw) {
    for (field, error) in errors.iter() {
      eprintln!("  {field}: {}", error.message(field));
    }
    bail!("submission has {} invalid field(s); nothing was sent", errors.len());
  }

  tracing::debug!("submission passed local validation");
  let lead = client.submit(raw, resume).await?;
  println!("Submitted {} (id {}, {})", lead.full_name(), lead.id, lead.status);
  Ok(())
}

// ─── Dashboard ────────────────────────────────────────────────────────────────

async fn dashboard(client: ApiClient) -> Result<()> {
  let mut app = App::new(client);

  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let load_result = app.load_leads().await;

  // Run the event loop; restore terminal even on error.
  let run_result = if load_result.is_ok() {
    run_event_loop(&mut terminal, &mut app).await
  } else {
    load_result
  };

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && !app.handle_key(key).await?
    {
      break;
    }
  }

  Ok(())
}
