//! PAYE engine command line.
//!
//! # Commands
//!
//! - `serve`: run the HTTP API
//! - `calculate`: compute PAYE for one set of inputs
//! - `classify`: determine taxpayer category and obligations
//! - `assess`: score compliance readiness
//! - `checklist`: list compliance to-dos for a category
//!
//! Exit code 2 on invalid input, 1 on any other failure.

use std::fs;
use std::io::{self, Read};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use paye_engine::api::{ApiEnvelope, AppState, CalculationRequest, ClassifyRequest, create_router};
use paye_engine::calculation::calculate_paye;
use paye_engine::classification::{
    Checklist, ClassificationResult, ProfileOption, ReadinessAnswers, ReadinessReport,
    TaxProfile, TaxpayerCategory, assess_readiness, build_checklist, classify,
};
use paye_engine::config::ConfigLoader;
use paye_engine::error::EngineError;
use paye_engine::format::{format_naira, round_half_up};
use paye_engine::models::{CalculationInput, CalculationResult};

/// Nigerian PAYE calculator (Nigeria Tax Act 2025)
#[derive(Parser)]
#[command(name = "paye-engine")]
#[command(version)]
#[command(about = "Personal income tax calculator for the Nigeria Tax Act 2025")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Compute PAYE for a gross income and its deductions
    Calculate(CalculateArgs),
    /// Determine taxpayer category and obligations
    Classify(ClassifyArgs),
    /// Score compliance readiness from yes/no answers
    Assess(AssessArgs),
    /// List the compliance to-dos for a taxpayer category
    Checklist(ChecklistArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5000")]
    bind: SocketAddr,

    /// Directory containing rules.yaml (built-in NTA 2025 rules if omitted)
    #[arg(long, value_name = "DIR")]
    rules: Option<PathBuf>,
}

#[derive(Args)]
struct CalculateArgs {
    /// Annual gross income
    #[arg(long, value_name = "AMOUNT", required_unless_present = "json")]
    gross_income: Option<Decimal>,

    #[arg(long, value_name = "AMOUNT")]
    pension: Option<Decimal>,

    #[arg(long, value_name = "AMOUNT")]
    nhf: Option<Decimal>,

    #[arg(long, value_name = "AMOUNT")]
    nhis: Option<Decimal>,

    #[arg(long, value_name = "AMOUNT")]
    loan_interest: Option<Decimal>,

    #[arg(long, value_name = "AMOUNT")]
    life_insurance: Option<Decimal>,

    /// Annual rent paid; 20% is relieved up to ₦500,000
    #[arg(long, value_name = "AMOUNT")]
    annual_rent: Option<Decimal>,

    /// Read a request body from FILE, or stdin when FILE is "-"
    #[arg(long, value_name = "FILE", conflicts_with = "gross_income")]
    json: Option<String>,

    /// Directory containing rules.yaml
    #[arg(long, value_name = "DIR")]
    rules: Option<PathBuf>,

    /// Print a table instead of JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct ClassifyArgs {
    /// salary, freelance, business, mix, company or ngo
    #[arg(long)]
    work_type: String,

    /// staff, shop, sales or cac (repeatable)
    #[arg(long)]
    complexity: Vec<String>,

    /// religious, charity, ngo, cooperative or union (repeatable)
    #[arg(long = "ngo-type")]
    ngo_types: Vec<String>,

    /// donations, membership, sales, training or rent (repeatable)
    #[arg(long)]
    ngo_income: Vec<String>,

    /// local, foreign or mixed
    #[arg(long)]
    income_source: Option<String>,

    /// Print a list instead of JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct AssessArgs {
    #[arg(long)]
    has_tin: bool,
    #[arg(long)]
    keeps_records: bool,
    #[arg(long)]
    filed_last_year: bool,
    #[arg(long)]
    understands_deductions: bool,
    #[arg(long)]
    separates_business_personal: bool,

    /// Print a summary instead of JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct ChecklistArgs {
    /// salary-earner, self-employed, business-owner, mixed-income,
    /// company-owner or non-profit
    #[arg(long)]
    category: String,

    /// Id of an item already done (repeatable)
    #[arg(long)]
    completed: Vec<String>,

    /// Print a checkbox list instead of JSON
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Calculate(args) => run_calculate(args),
        Commands::Classify(args) => run_classify(args),
        Commands::Assess(args) => run_assess(args),
        Commands::Checklist(args) => run_checklist(args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "Command failed");
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

/// Logs go to stderr so JSON on stdout stays parseable.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<EngineError>() {
        Some(engine_error) if engine_error.is_client_error() => 2,
        _ => 1,
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = ConfigLoader::load_or_builtin(args.rules.as_ref())?;
    info!(
        code = %config.metadata().code,
        source = %config
            .source()
            .map_or_else(|| "built-in".to_string(), |p| p.display().to_string()),
        "Tax rules ready"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;

    info!("PAYE API listening on http://{}", args.bind);
    axum::serve(listener, router.into_make_service())
        .await
        .context("server error")?;
    Ok(())
}

fn run_calculate(args: CalculateArgs) -> anyhow::Result<()> {
    let config = ConfigLoader::load_or_builtin(args.rules.as_ref())?;

    let request = match args.json.as_deref() {
        Some(source) => CalculationRequest::from_json_str(&read_source(source)?)?,
        None => CalculationRequest {
            gross_income: args.gross_income,
            pension: args.pension,
            nhf: args.nhf,
            nhis: args.nhis,
            loan_interest: args.loan_interest,
            life_insurance: args.life_insurance,
            annual_rent: args.annual_rent,
        },
    };
    debug!(?request, "Calculation request");

    let input = CalculationInput::try_from(request)?;
    let result = calculate_paye(&input, config.rules())?;

    if args.pretty {
        print!("{}", render_calculation(&result));
        Ok(())
    } else {
        print_envelope(result)
    }
}

fn run_classify(args: ClassifyArgs) -> anyhow::Result<()> {
    let profile = TaxProfile::try_from(ClassifyRequest {
        work_type: Some(args.work_type),
        complexity: args.complexity,
        ngo_types: args.ngo_types,
        ngo_income: args.ngo_income,
        income_source: args.income_source,
    })?;
    let result = classify(&profile);

    if args.pretty {
        print!("{}", render_classification(&result));
        Ok(())
    } else {
        print_envelope(result)
    }
}

fn run_assess(args: AssessArgs) -> anyhow::Result<()> {
    let report = assess_readiness(&ReadinessAnswers {
        has_tin: args.has_tin,
        keeps_records: args.keeps_records,
        filed_last_year: args.filed_last_year,
        understands_deductions: args.understands_deductions,
        separates_business_personal: args.separates_business_personal,
    });

    if args.pretty {
        print!("{}", render_readiness(&report));
        Ok(())
    } else {
        print_envelope(report)
    }
}

fn run_checklist(args: ChecklistArgs) -> anyhow::Result<()> {
    let category = TaxpayerCategory::parse("category", &args.category)?;
    let checklist = build_checklist(category, &args.completed);

    if args.pretty {
        print!("{}", render_checklist(&checklist));
        Ok(())
    } else {
        print_envelope(checklist)
    }
}

fn read_source(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("failed to read request from stdin")?;
        Ok(content)
    } else {
        fs::read_to_string(source).with_context(|| format!("failed to read {}", source))
    }
}

fn print_envelope<T: Serialize>(data: T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&ApiEnvelope::ok(data))?;
    println!("{json}");
    Ok(())
}

fn render_calculation(result: &CalculationResult) -> String {
    let mut out = String::new();
    let row = |out: &mut String, label: &str, value: String| {
        out.push_str(&format!("{label:<34}{value:>22}\n"));
    };

    row(&mut out, "Gross income", format_naira(result.gross_income));
    for (label, amount) in result.deductions_breakdown.entries() {
        if !amount.is_zero() {
            row(&mut out, &format!("  less {label}"), format_naira(amount));
        }
    }
    row(&mut out, "Total deductions", format_naira(result.total_deductions));
    row(&mut out, "Taxable income", format_naira(result.taxable_income));
    out.push('\n');

    for line in &result.tax_breakdown {
        out.push_str(&format!(
            "{:<34}{:>22}{:>18}\n",
            line.label,
            format_naira(line.amount),
            format_naira(line.tax)
        ));
    }
    out.push('\n');

    row(&mut out, "Annual tax", format_naira(result.total_tax));
    row(&mut out, "Monthly tax", format_naira(result.monthly_tax));
    row(
        &mut out,
        "Effective rate",
        format!("{}%", round_half_up(result.effective_rate)),
    );
    out
}

fn render_classification(result: &ClassificationResult) -> String {
    let mut out = format!("Classification: {}\n\n", result.classification);
    for obligation in &result.obligations {
        out.push_str(&format!("- {obligation}\n"));
    }
    out
}

fn render_readiness(report: &ReadinessReport) -> String {
    let mut out = format!("{} ({}/100)\n", report.level, report.score);
    for tip in &report.advice {
        out.push_str(&format!("- {tip}\n"));
    }
    out
}

fn render_checklist(checklist: &Checklist) -> String {
    let mut out = format!("{} checklist ({}% done)\n", checklist.category, checklist.progress);
    for item in &checklist.items {
        let mark = if checklist.completed.contains(&item.id) {
            'x'
        } else {
            ' '
        };
        out.push_str(&format!("[{mark}] {:<18}{}\n", item.id, item.text));
    }
    out
}
