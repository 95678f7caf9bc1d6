use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

mod columns;
mod controller;
mod dataset;
mod debounce;
mod domain;
mod export;
mod grid;
mod inputter;
mod model;
mod ui;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use controller::Controller;
use domain::{
    CountScope, DEFAULT_DEBOUNCE_MS, ExportScope, GridConfig, GridError, PAGE_SIZES, SelectScope,
};
use model::{Model, Status};
use ui::TableUI;

#[derive(Parser)]
#[command(version, about = "A tui grid viewer for music-track CSV datasets.")]
struct Cli {
    /// CSV file to load (~ and environment variables are expanded)
    path: String,

    /// Abort the load on the first malformed row instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Initial page size (25, 50, 100 or 200)
    #[arg(long, default_value_t = PAGE_SIZES[0])]
    page_size: usize,

    /// Clamp out-of-range page jumps instead of rejecting them
    #[arg(long)]
    clamp_pages: bool,

    /// Scope of select-all [default: filtered]
    #[arg(long, value_enum)]
    select_scope: Option<SelectScope>,

    /// Scope of the selected counter [default: filtered]
    #[arg(long, value_enum)]
    count_scope: Option<CountScope>,

    /// Scope of csv export [default: filtered]
    #[arg(long, value_enum)]
    export_scope: Option<ExportScope>,

    /// Quiet period for the debounced quick search, in milliseconds
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    debounce_ms: u64,

    /// Write tracing output (filtered by RUST_LOG) to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run() {
        Err(e) => {
            ratatui::restore();
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => {
            ratatui::restore();
            ExitCode::SUCCESS
        }
    }
}

fn run() -> Result<(), GridError> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    if !PAGE_SIZES.contains(&cli.page_size) {
        return Err(GridError::InvalidPageSize(cli.page_size));
    }
    let cfg = GridConfig {
        strict_decode: cli.strict,
        page_size: cli.page_size,
        clamp_pages: cli.clamp_pages,
        select_scope: cli.select_scope.unwrap_or_default(),
        count_scope: cli.count_scope.unwrap_or_default(),
        export_scope: cli.export_scope.unwrap_or_default(),
        debounce_ms: cli.debounce_ms,
        ..GridConfig::default()
    };
    let path = PathBuf::from(
        shellexpand::full(&cli.path)
            .map_err(|e| GridError::LoadingFailed(e.to_string()))?
            .into_owned(),
    );
    info!("Starting trackview on {}", path.display());

    let mut model = Model::init(&cfg);
    let mut ui = TableUI::new();
    let controller = Controller::new(&cfg);

    let mut terminal = ratatui::init();

    // Show the loading state, then decode; until the load settles the rest
    // of the system is inert.
    model.begin_loading();
    terminal.draw(|f| ui.draw(model.get_uidata(), f))?;
    if let Err(e) = model.load_data_file(path) {
        model.load_failed(&e);
    }

    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|f| ui.draw(model.get_uidata(), f))?;

        // Handle events and map to a Message
        if let Some(message) = controller.handle_event(&model)? {
            model.update(message);
        }

        // Drive the search debounce timer
        model.tick(Instant::now());
    }

    Ok(())
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<(), GridError> {
    // The terminal belongs to ratatui, so logs only ever go to a file.
    if let Some(path) = log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .init();
    }
    Ok(())
}
