use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use forecast_input::config::Settings;
use forecast_input::domain::entities::forecast::WellProductionInput;
use forecast_input::domain::entities::table::{TableKind, TypedTable};
use forecast_input::domain::error::{RegistryError, SessionError};
use forecast_input::infra::sqlite::repo::SqliteRepo;
use forecast_input::platform::terminal::stdin_clipboard::StdinClipboard;
use forecast_input::usecase::services::edit_session::EditSession;
use forecast_input::usecase::services::model_registry::NamedModelRegistry;
use forecast_input::usecase::services::table_service::TableService;

#[derive(Parser, Debug)]
#[command(
    name = "forecast-input",
    version,
    about = "Paste spreadsheet selections into forecast input tables"
)]
struct Cli {
    /// SQLite file holding the tables
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Read `,` as the decimal separator
    #[arg(long, global = true)]
    decimal_comma: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Production table: date, recovery fraction, water cut
    #[command(subcommand)]
    Niz(NizCommand),
    /// Named referent curves
    #[command(subcommand)]
    Models(ModelsCommand),
}

#[derive(Subcommand, Debug)]
enum NizCommand {
    Show,
    /// Replace the table with rows piped on stdin
    Paste {
        /// Keep existing rows and append the pasted ones
        #[arg(long)]
        append: bool,
    },
    Clear,
    /// Print the forecast service payload
    Payload {
        #[arg(long)]
        kin: Option<f64>,
        #[arg(long)]
        debit: Option<f64>,
        #[arg(long)]
        total: Option<f64>,
    },
}

#[derive(Subcommand, Debug)]
enum ModelsCommand {
    List,
    /// Append pasted values to a model, or create one when no index is given
    Paste {
        #[arg(long)]
        index: Option<usize>,
        #[arg(long)]
        name: Option<String>,
    },
    Delete {
        #[arg(long)]
        index: usize,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::from_env()?;
    if let Some(db) = cli.db {
        settings.db_path = db;
    }
    if cli.decimal_comma {
        settings.decimal_comma = true;
    }

    let service = TableService::new(Arc::new(SqliteRepo {
        db_path: settings.db_path.clone(),
    }));
    service.init().context("failed to prepare storage")?;

    match cli.command {
        Command::Niz(command) => run_niz(&service, &settings, command),
        Command::Models(command) => run_models(&service, &settings, command),
    }
}

fn run_niz(service: &TableService, settings: &Settings, command: NizCommand) -> Result<()> {
    let mut bound = service.niz_table()?;

    match command {
        NizCommand::Show => print_table(&bound),
        NizCommand::Paste { append } => {
            let mut session = EditSession::for_kind(TableKind::Niz, settings.number_format());
            session.open(&bound);
            if !append {
                session.manual_clear()?;
            }
            let added = session
                .import_from_clipboard(&mut StdinClipboard)
                .map_err(session_error)?;
            session.commit(&mut bound)?;
            service.save_niz_table(&bound)?;
            println!("imported {added} rows, table has {} rows", bound.len());
        }
        NizCommand::Clear => {
            let mut session = EditSession::for_kind(TableKind::Niz, settings.number_format());
            session.open(&bound);
            session.manual_clear()?;
            session.commit(&mut bound)?;
            service.save_niz_table(&bound)?;
            println!("table cleared");
        }
        NizCommand::Payload { kin, debit, total } => {
            let input = WellProductionInput::from_table(&bound).with_parameters(kin, debit, total);
            input.check()?;
            println!("{}", input.to_json()?);
        }
    }
    Ok(())
}

fn run_models(service: &TableService, settings: &Settings, command: ModelsCommand) -> Result<()> {
    let mut registry = NamedModelRegistry::new(service.referent_models()?, settings.number_format());

    match command {
        ModelsCommand::List => {
            for (index, model) in registry.models().iter().enumerate() {
                println!("{index}\t{}\t{} values", model.name, model.table.len());
            }
        }
        ModelsCommand::Paste { index, name } => {
            registry.select_for_edit(index);
            if registry.editing_index().is_none() && name.is_none() {
                bail!("a name is required when creating a model");
            }
            let session = registry.session_mut();
            if let Some(name) = name {
                session.rename(name)?;
            }
            let added = session
                .import_from_clipboard(&mut StdinClipboard)
                .map_err(session_error)?;
            let saved = registry.save().map_err(registry_error)?;
            service.save_referent_models(registry.models())?;
            println!(
                "imported {added} values into model {saved} '{}'",
                registry.models()[saved].name
            );
        }
        ModelsCommand::Delete { index, yes } => {
            registry.request_delete(index).map_err(registry_error)?;
            let name = registry.models()[index].name.clone();
            if !yes {
                registry.cancel_delete();
                println!("model {index} '{name}' would be deleted; re-run with --yes to confirm");
                return Ok(());
            }
            registry.confirm_delete().map_err(registry_error)?;
            service.save_referent_models(registry.models())?;
            println!("model {index} '{name}' deleted");
        }
    }
    Ok(())
}

fn print_table(table: &TypedTable) {
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("{}", cells.join("\t"));
    }
}

fn session_error(err: SessionError) -> anyhow::Error {
    match err {
        SessionError::Import(import) => anyhow!(import.user_message()),
        other => other.into(),
    }
}

fn registry_error(err: RegistryError) -> anyhow::Error {
    match err {
        RegistryError::Session(session) => session_error(session),
        other => other.into(),
    }
}
