use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use pokedex_catalog_manager::app::App;
use pokedex_catalog_manager::config::Settings;
use pokedex_catalog_manager::domain::SpeciesRef;
use pokedex_catalog_manager::error::DexError;
use pokedex_catalog_manager::output::{CardView, CatalogSink, ConsoleSink, JsonSink, NullSink};
use pokedex_catalog_manager::pokeapi::PokeApiHttpClient;

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "In-memory Pokédex catalog: bulk fetch, instant search, stat summaries")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Fetch the catalog and print each card as it arrives")]
    Catalog(CatalogArgs),
    #[command(about = "Fetch the catalog, then print the species matching a query")]
    Search(SearchArgs),
    #[command(about = "Fetch one species in detail and print its stat summary")]
    Stats(StatsArgs),
}

#[derive(Args, Clone)]
struct CatalogArgs {
    #[arg(long)]
    count: Option<u32>,

    #[arg(long)]
    workers: Option<usize>,
}

#[derive(Args)]
struct SearchArgs {
    query: String,

    #[command(flatten)]
    catalog: CatalogArgs,
}

#[derive(Args)]
struct StatsArgs {
    identifier: String,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(dex) = report.downcast_ref::<DexError>() {
            return ExitCode::from(map_exit_code(dex));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &DexError) -> u8 {
    match error {
        DexError::SpeciesNotFound { .. } | DexError::InvalidSpeciesRef(_) => 2,
        DexError::PokeApiHttp(_) | DexError::PokeApiDecode { .. } => 3,
        DexError::EmptyStats => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env();
    let sink: Box<dyn CatalogSink> = if cli.json {
        Box::new(JsonSink)
    } else {
        Box::new(ConsoleSink)
    };

    match cli.command {
        Commands::Catalog(args) => run_catalog(args, settings, cli.json, sink.as_ref()),
        Commands::Search(args) => run_search(args, settings, sink.as_ref()),
        Commands::Stats(args) => run_stats(args, settings, sink.as_ref()),
    }
}

fn build_app(
    mut settings: Settings,
    args: &CatalogArgs,
) -> miette::Result<(App<PokeApiHttpClient>, u32)> {
    if let Some(workers) = args.workers {
        settings = settings.with_workers(workers);
    }
    let count = args.count.unwrap_or(settings.catalog_size);
    let client = PokeApiHttpClient::new(&settings).into_diagnostic()?;
    Ok((App::new(client, settings.workers), count))
}

fn run_catalog(
    args: CatalogArgs,
    settings: Settings,
    json: bool,
    sink: &dyn CatalogSink,
) -> miette::Result<()> {
    let (mut app, count) = build_app(settings, &args)?;
    let report = app.load_catalog(count, sink);
    if json {
        let line = serde_json::to_string_pretty(&report).into_diagnostic()?;
        println!("{line}");
    } else {
        println!(
            "loaded {}/{} species ({} failed)",
            report.loaded, report.attempted, report.failed
        );
    }
    Ok(())
}

fn run_search(args: SearchArgs, settings: Settings, sink: &dyn CatalogSink) -> miette::Result<()> {
    let (mut app, count) = build_app(settings, &args.catalog)?;
    // Failures still land in the log; only per-card progress is muted.
    app.load_catalog(count, &NullSink);
    for species in app.filter(&args.query) {
        sink.card(&CardView::from(species));
    }
    Ok(())
}

fn run_stats(args: StatsArgs, settings: Settings, sink: &dyn CatalogSink) -> miette::Result<()> {
    let re: SpeciesRef = args.identifier.parse::<SpeciesRef>().into_diagnostic()?;
    let client = PokeApiHttpClient::new(&settings).into_diagnostic()?;
    let app = App::new(client, settings.workers);
    app.show_stats(&re, sink);
    Ok(())
}
