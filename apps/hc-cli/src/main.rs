use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use hc_analysis::{Cell, Table};
use hc_app::{
    AppConfig, AppContext, AppError, AppResult, Comparison, ComparisonService, UserSession,
};
use hc_demand::{DemandRepository, DemandType, InMemoryDemandRepository};
use hc_results::ResultId;
use hc_scenarios::ScenarioKind;
use tracing::info;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Parser)]
#[command(name = "hc-cli")]
#[command(
    about = "Compare heating technologies by hourly energy-system simulation",
    long_about = None
)]
struct Cli {
    /// Configuration file; built-in defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the activated scenarios
    Scenarios,
    /// Show the reference parameters of a scenario
    Parameters {
        scenario: String,
        /// Use the district parameters
        #[arg(long)]
        district: bool,
    },
    /// Simulate scenarios for a demand and compare them
    Simulate {
        /// Demand file with households and districts
        demand_path: PathBuf,
        /// Scenario to simulate (repeatable); all activated when omitted
        #[arg(short, long = "scenario")]
        scenarios: Vec<String>,
        /// Id of the household or district in the demand file
        #[arg(long, default_value_t = 1)]
        id: u32,
        /// Look the id up among the districts
        #[arg(long)]
        district: bool,
        /// Override the simulated hours
        #[arg(long)]
        periods: Option<usize>,
        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare stored results
    Compare {
        #[arg(required = true)]
        result_ids: Vec<ResultId>,
        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a scenario as changed so its cached results are no longer used
    Touch { scenario: String },
    /// Delete every stored result and simulation record
    Reset,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Scenarios => cmd_scenarios(&config),
        Commands::Parameters { scenario, district } => {
            cmd_parameters(config, &scenario, district)
        }
        Commands::Simulate {
            demand_path,
            scenarios,
            id,
            district,
            periods,
            json,
        } => {
            let mut config = config;
            if let Some(periods) = periods {
                config.periods = periods;
            }
            cmd_simulate(config, &demand_path, &scenarios, id, district, json)
        }
        Commands::Compare { result_ids, json } => cmd_compare(config, &result_ids, json),
        Commands::Touch { scenario } => cmd_touch(config, &scenario),
        Commands::Reset => cmd_reset(config),
    }
}

fn parse_kind(name: &str) -> AppResult<ScenarioKind> {
    Ok(name.parse::<ScenarioKind>()?)
}

fn cmd_scenarios(config: &AppConfig) -> AppResult<()> {
    println!("Activated scenarios:");
    for kind in config.registry().kinds() {
        let display = config.display(*kind);
        let components: Vec<_> = kind
            .scenario()
            .needed_parameters()
            .components()
            .map(str::to_string)
            .collect();
        println!("  {:<12} {} [{}]", kind.name(), display.name, components.join(", "));
    }
    Ok(())
}

fn cmd_parameters(config: AppConfig, scenario: &str, district: bool) -> AppResult<()> {
    let ctx = AppContext::from_config(config)?;
    let scenario = ctx.registry.get(scenario)?;
    let demand_type = if district {
        DemandType::District
    } else {
        DemandType::Single
    };
    let parameters = ctx
        .parameters
        .get_scenario_parameters(scenario.name(), demand_type)?;

    println!("Parameters of {} ({}):", scenario.name(), demand_type.suffix());
    for (component, values) in parameters.components() {
        println!("  {component}");
        for (name, value) in values {
            let unit = value.unit.as_deref().unwrap_or("");
            let label = value.label.as_deref().unwrap_or("");
            println!("    {name:<22} {:>10} {unit:<10} {label}", value.value);
        }
    }
    Ok(())
}

fn cmd_simulate(
    config: AppConfig,
    demand_path: &Path,
    scenarios: &[String],
    id: u32,
    district: bool,
    json: bool,
) -> AppResult<()> {
    let ctx = AppContext::from_config(config)?;
    let repository = InMemoryDemandRepository::load(demand_path)?;
    let demand_type = if district {
        DemandType::District
    } else {
        DemandType::Single
    };
    let demand = repository.get_demand(demand_type, id)?;

    let kinds = if scenarios.is_empty() {
        ctx.registry.kinds().to_vec()
    } else {
        scenarios
            .iter()
            .map(|s| parse_kind(s))
            .collect::<AppResult<Vec<_>>>()?
    };

    let mut session = UserSession::new(demand, id, kinds);
    info!(demand = session.demand_name(), periods = ctx.config.periods, "starting simulations");
    session.start(&ctx)?;
    session.wait(&ctx, POLL_INTERVAL);

    for simulation in session.simulations() {
        println!("  {:<12} {:?}", simulation.kind().name(), simulation.state());
    }

    let results = session.results();
    if results.is_empty() {
        return Err(AppError::Solver("no scenario produced a result".into()));
    }
    let comparison = ComparisonService::new(&ctx).compare(&results)?;
    print_comparison(&comparison, json)
}

fn cmd_compare(config: AppConfig, result_ids: &[ResultId], json: bool) -> AppResult<()> {
    let ctx = AppContext::from_config(config)?;
    let comparison = ComparisonService::new(&ctx).compare_ids(result_ids)?;
    print_comparison(&comparison, json)
}

fn cmd_touch(config: AppConfig, scenario: &str) -> AppResult<()> {
    let kind = parse_kind(scenario)?;
    let ctx = AppContext::from_config(config)?;
    let when = ctx.store.touch_scenario(kind.name())?;
    println!("✓ {} marked as changed at {when}", kind.name());
    Ok(())
}

fn cmd_reset(config: AppConfig) -> AppResult<()> {
    let ctx = AppContext::from_config(config)?;
    ctx.store.reset()?;
    println!("✓ Result store reset");
    Ok(())
}

fn print_comparison(comparison: &Comparison, json: bool) -> AppResult<()> {
    if json {
        let text = serde_json::to_string_pretty(comparison)
            .map_err(|e| AppError::Results(e.to_string()))?;
        println!("{text}");
        return Ok(());
    }

    print_table(&comparison.technologies);
    print_table(&comparison.lcoe);
    for ranking in &comparison.rankings {
        println!();
        println!("{}:", ranking.ranking.title);
        for (place, entry) in ranking.entries.iter().enumerate() {
            println!("  {}. {:<30} {}", place + 1, entry.label, entry.value);
        }
    }
    Ok(())
}

fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Empty => "-".to_string(),
        Cell::Number(v) => format!("{v:.3}"),
        Cell::Text(t) => t.replace('\n', "; "),
    }
}

fn print_table(table: &Table) {
    println!();
    println!("{}", table.name);
    let width = table
        .index
        .iter()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0);
    print!("  {:<width$}", "");
    for column in &table.columns {
        print!(" | {column:>20}");
    }
    println!();
    for (label, row) in table.index.iter().zip(&table.cells) {
        print!("  {label:<width$}");
        for cell in row {
            print!(" | {:>20}", format_cell(cell));
        }
        println!();
    }
}
