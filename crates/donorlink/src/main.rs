//! `donorlink` - CLI for registering and searching organ donors.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::Path;

use anyhow::{bail, Context};
use clap::Parser;

use donorlink::cli::{
    Cli, Command, ConfigCommand, OutputFormat, RegisterCommand, SearchCommand,
};
use donorlink::present::{render, MarkerBoard, Notice, Presenter, RecordDetail};
use donorlink::record::FormData;
use donorlink::registration::{DraftStore, RegistrationForm, SubmitOutcome};
use donorlink::{init_logging, store, Config, DonorRepository, Error};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Search(cmd) => handle_search(&config, &cmd).await,
        Command::Register(cmd) => handle_register(&config, &cmd).await,
        Command::Show { id } => handle_show(&config, &id).await,
        Command::Status(cmd) => handle_status(&config, cmd.json).await,
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

async fn open_repository(config: &Config) -> anyhow::Result<DonorRepository> {
    let store = store::open_configured(config)?;
    let mut repo = DonorRepository::new(store).with_seed_on_empty(config.store.seed_on_empty);
    let report = repo.load_all().await;
    if report.is_degraded() {
        eprintln!("Warning: record store unavailable, showing sample donors only.");
    }
    Ok(repo)
}

async fn handle_search(config: &Config, cmd: &SearchCommand) -> anyhow::Result<()> {
    let mut repo = open_repository(config).await?;

    let result = match donorlink::search::search(&mut repo, &cmd.criteria()).await {
        Ok(result) => result,
        Err(e @ Error::EmptyCriteria) => {
            println!("{}", Notice::from_error(&e));
            bail!(e);
        }
        Err(e) => return Err(e.into()),
    };

    let mut board = MarkerBoard::new(&config.map);
    let shown = Presenter::new(&config.map).present(&result, &mut board);

    match cmd.format {
        OutputFormat::Plain => print!("{}", render::plain(&shown, &board)),
        OutputFormat::Table => print!("{}", render::table(&shown, &board)),
        OutputFormat::Json => println!("{}", render::json(&shown, &board)?),
    }
    Ok(())
}

async fn handle_register(config: &Config, cmd: &RegisterCommand) -> anyhow::Result<()> {
    let mut registration =
        RegistrationForm::new(cmd.kind.into()).with_drafts(DraftStore::new(Config::drafts_dir()));

    if cmd.resume && !registration.load_draft().await.context("failed to resume draft")? {
        eprintln!("No saved {} draft; starting a new form.", registration.kind());
    }
    if let Some(path) = &cmd.form {
        registration.form_mut().overlay(read_form(path)?);
    }
    for (name, value) in &cmd.fields {
        registration.form_mut().append(name, value);
    }
    if let Err(e) = registration.save_draft().await {
        tracing::warn!("Draft not saved: {e}");
    }

    let mut repo = open_repository(config).await?;

    match registration.complete(&mut repo).await {
        SubmitOutcome::Saved { id, notice } => {
            if cmd.json {
                let saved = serde_json::json!({
                    "id": id,
                    "kind": registration.kind(),
                    "title": notice.title,
                });
                println!("{}", serde_json::to_string_pretty(&saved)?);
            } else {
                println!("{notice}");
                println!("ID: {id}");
            }
            Ok(())
        }
        SubmitOutcome::Invalid { step } => {
            let schema = registration.wizard().schema();
            let title = schema.step(step).map_or("", |s| s.title);
            eprintln!("Step {step} of {} ({title}) is incomplete:", schema.total_steps());
            for (field, error) in registration.markers().iter() {
                eprintln!("  {field}: {error}");
            }
            eprintln!("Entered values were kept; rerun with --resume to continue.");
            bail!("registration not submitted");
        }
        SubmitOutcome::Rejected { notice } | SubmitOutcome::Failed { notice } => {
            eprintln!("{notice}");
            bail!("registration not submitted");
        }
        SubmitOutcome::NotReady { step } => bail!("registration stopped at step {step}"),
        SubmitOutcome::Busy => bail!("a registration is already being saved"),
    }
}

fn read_form(path: &Path) -> anyhow::Result<FormData> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read form file {}", path.display()))?;
    FormData::from_json(&text)
        .with_context(|| format!("invalid form file {}", path.display()))
}

async fn handle_show(config: &Config, id: &str) -> anyhow::Result<()> {
    let repo = open_repository(config).await?;
    let Some(record) = repo.find(id) else {
        let err = Error::RecordNotFound(id.to_string());
        eprintln!("{}", Notice::from_error(&err));
        return Err(err.into());
    };
    println!("{}", RecordDetail::new(&record));
    Ok(())
}

async fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let repo = open_repository(config).await?;
    let stats = repo.stats();
    let backend = repo.store().backend_name();

    if json {
        let status = serde_json::json!({
            "backend": backend,
            "database_path": config.database_path(),
            "donors": stats,
            "total": stats.total(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("donorlink status");
        println!("----------------");
        println!("Backend:         {backend}");
        println!("Database:        {}", config.database_path().display());
        println!("Living donors:   {}", stats.living);
        println!("Deceased donors: {}", stats.deceased);
        if stats.unpersisted > 0 {
            println!("Not persisted:   {}", stats.unpersisted);
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Store]");
                println!("  Backend:        {:?}", config.store.backend);
                println!("  Database path:  {}", config.database_path().display());
                println!("  Seed on empty:  {}", config.store.seed_on_empty);
                println!("  Drafts:         {}", Config::drafts_dir().display());
                println!();
                println!("[Map]");
                println!(
                    "  Centre:         {}, {}",
                    config.map.center_lat, config.map.center_lng
                );
                println!("  Zoom:           {}", config.map.zoom);
                println!("  Fit padding:    {}", config.map.fit_padding);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
