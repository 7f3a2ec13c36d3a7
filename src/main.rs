use clap::{Args, Parser, Subcommand};
use folio::{
    Catalog, DEFAULT_ANIMATION_STEP, DEFAULT_SECTION_HEIGHT, LayoutDocument, Replay, ReplayError,
    ReplayStep, SpyConfig, uniform_layout,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about = "Scroll-spy navigation controller for portfolio pages")]
struct Cli {
    /// Log every sample and phase change
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sections of a catalog in navigation order
    Sections {
        /// Catalog JSON file (defaults to the built-in portfolio)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Replay a scripted visit and print every active-section change
    Replay(ReplayArgs),
}

#[derive(Args)]
struct ReplayArgs {
    /// Layout JSON file: { "sections": [{ "id", "top", "height" }] }
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Catalog JSON file (defaults to the built-in portfolio)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Controller config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Height of each section when no layout file is given
    #[arg(long, default_value_t = DEFAULT_SECTION_HEIGHT)]
    section_height: f64,

    /// Pixels a smooth scroll advances per frame
    #[arg(long, default_value_t = DEFAULT_ANIMATION_STEP)]
    animation_step: f64,

    /// Scroll offsets visited before any --step
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    offsets: Vec<f64>,

    /// Section ids navigated to after the offsets, in order
    #[arg(long, value_delimiter = ',')]
    navigate: Vec<String>,

    /// Further steps: <offset>, scroll:<offset>, resize, nav:<id>, next, cta
    #[arg(long = "step", value_parser = parse_step)]
    steps: Vec<ReplayStep>,
}

fn main() -> Result<(), ReplayError> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Sections { catalog } => print_sections(&load_catalog(catalog)?),
        Commands::Replay(args) => run_replay(args)?,
    }
    Ok(())
}

fn parse_step(raw: &str) -> Result<ReplayStep, String> {
    raw.parse().map_err(|e: ReplayError| e.to_string())
}

fn load_catalog(path: Option<PathBuf>) -> Result<Catalog, ReplayError> {
    Ok(match path {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::builtin()?,
    })
}

fn print_sections(catalog: &Catalog) {
    for (index, entry) in catalog.nav_entries().iter().enumerate() {
        println!("{:>2}  {:<12} {}", index + 1, entry.id.as_str(), entry.label);
    }
}

fn run_replay(args: ReplayArgs) -> Result<(), ReplayError> {
    let catalog = load_catalog(args.catalog)?;
    let config = match args.config {
        Some(path) => SpyConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SpyConfig::default(),
    };
    let layout = match args.layout {
        Some(path) => LayoutDocument::from_file(path)?.into_layout()?,
        None => uniform_layout(&catalog, args.section_height)?,
    };

    let steps: Vec<ReplayStep> = args
        .offsets
        .into_iter()
        .map(ReplayStep::Scroll)
        .chain(args.navigate.into_iter().map(ReplayStep::Navigate))
        .chain(args.steps)
        .collect();

    let mut replay = Replay::new(catalog, layout, config)?.with_animation_step(args.animation_step)?;
    let report = replay.run(&steps)?;

    for transition in &report.transitions {
        let cause = transition
            .step
            .and_then(|index| steps.get(index))
            .map_or_else(|| "mount".to_string(), ToString::to_string);
        println!(
            "{:>8.1}  {:<12} ({})",
            transition.offset,
            transition.active.as_str(),
            cause
        );
    }
    match &report.final_active {
        Some(id) => println!("Final: '{}' at offset {}", id, report.final_offset),
        None => println!("Final: no active section at offset {}", report.final_offset),
    }
    Ok(())
}
