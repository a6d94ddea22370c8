use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use log::{info, warn};

use food_nutri::ingestion::{
    CompositeObserver, FOUNDATION_FOOD_ZIPPED_CSV, LoadObserver, LoadOptions, LogObserver,
    ProgressObserver, SUPPORTING_DATA_ZIPPED_CSV,
};
use food_nutri::processing::{aggregate, rank};
use food_nutri::report::write_top_list;
use food_nutri::types::FoodDb;

/// Exit status when no nutrient was selected.
const EXIT_USAGE: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "food-nutri",
    version,
    about = "Lists the top foods by nutrient content from the FoodData Central CSV archives"
)]
struct Cli {
    /// Select a nutrient, e.g. Cholesterol (required).
    #[arg(short, long)]
    nutrient: Option<String>,

    /// Zipped CSV archive with categories and nutrients. Loaded first.
    #[arg(long, value_name = "ZIP", default_value = SUPPORTING_DATA_ZIPPED_CSV)]
    supporting: PathBuf,

    /// Zipped CSV archive with foundation foods and their nutrient values.
    #[arg(long, value_name = "ZIP", default_value = FOUNDATION_FOOD_ZIPPED_CSV)]
    foundation: PathBuf,

    /// Rank every loaded food instead of averaging duplicate foods first.
    #[arg(long)]
    raw: bool,

    /// Print the loaded food with this FDC ID as JSON before ranking.
    #[arg(long, value_name = "FDCID")]
    dump: Option<String>,

    /// Don't print which archives and CSV files are being read.
    #[arg(short, long)]
    quiet: bool,

    /// Pass multiple times for additional verbosity (info, debug, trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbosity: u8,
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let Some(query) = args.nutrient.as_deref().filter(|n| !n.is_empty()) else {
        eprintln!("{}", Cli::command().render_help());
        return ExitCode::from(EXIT_USAGE);
    };

    let mut errlog = stderrlog::new();
    errlog.verbosity(usize::from(args.verbosity) + 1);
    if let Err(e) = errlog.init() {
        eprintln!("couldn't set up logging: {e}");
    }

    match run(&args, query) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli, query: &str) -> Result<()> {
    let observer: Arc<dyn LoadObserver> = if args.quiet {
        Arc::new(LogObserver)
    } else {
        let observers: Vec<Arc<dyn LoadObserver>> =
            vec![Arc::new(ProgressObserver::stdout()), Arc::new(LogObserver)];
        Arc::new(CompositeObserver::new(observers))
    };
    let opts = LoadOptions {
        supporting: args.supporting.clone(),
        foundation: args.foundation.clone(),
        observer: Some(observer),
        ..Default::default()
    };

    let db = FoodDb::load(&opts).context("Couldn't load the food database")?;
    info!(
        "{} rows, {} foods, {} nutrient values",
        db.rows,
        db.food_count(),
        db.food_nutrient_count()
    );

    if let Some(fdc_id) = &args.dump {
        match db.dump_food(fdc_id)? {
            Some(json) => println!("{json}"),
            None => warn!("No food with FDC ID {fdc_id}"),
        }
    }

    let db = if args.raw { db } else { aggregate(db) };
    let rows = rank(&db, query);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_top_list(&mut out, query, &rows)?;
    out.flush()?;
    Ok(())
}
