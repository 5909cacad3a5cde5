//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::card_svg::render_card;
use crate::adapters::catalogue_adapter::CatalogueAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::CardError;
use crate::domain::format::{format_date, format_number, format_realized_gain};
use crate::domain::recalc::recalculate;
use crate::domain::transaction::{Side, TransactionPatch, TransactionRecord};
use crate::ports::config_port::ConfigPort;
use crate::ports::stock_port::StockPort;

#[derive(Parser, Debug)]
#[command(name = "sahamcard", about = "IDX transaction card generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a transaction card and write it as SVG
    Card {
        #[arg(long, value_parser = parse_side)]
        side: Option<Side>,
        #[arg(long)]
        ticker: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        lot: Option<f64>,
        #[arg(long)]
        buy_price: Option<f64>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Search the ticker catalogue
    Search {
        #[arg(short, long)]
        query: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show one ticker's catalogue entry
    Info {
        #[arg(long)]
        code: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Start the web server
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn parse_side(input: &str) -> Result<Side, String> {
    Side::parse(input).ok_or_else(|| format!("expected BUY or SELL, got '{}'", input))
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Card {
            side,
            ticker,
            price,
            lot,
            buy_price,
            date,
            output,
            config,
        } => run_card(
            side,
            ticker.as_deref(),
            price,
            lot,
            buy_price,
            date,
            output.as_ref(),
            config.as_ref(),
        ),
        Command::Search {
            query,
            limit,
            config,
        } => run_search(&query, limit, config.as_ref()),
        Command::Info { code, config } => run_info(&code, config.as_ref()),
        Command::Serve { config } => run_serve(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = CardError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Resolve the catalogue from `[catalogue] path` / `format`, falling back
/// to the bundled sample list when no config (or no path) is given.
pub fn load_catalogue(config_path: Option<&PathBuf>) -> Result<CatalogueAdapter, CardError> {
    let Some(path) = config_path else {
        return CatalogueAdapter::bundled();
    };
    let adapter = FileConfigAdapter::from_file(path).map_err(|e| CardError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    catalogue_from_config(&adapter)
}

pub fn catalogue_from_config(config: &dyn ConfigPort) -> Result<CatalogueAdapter, CardError> {
    let Some(path) = config.get_string("catalogue", "path") else {
        return CatalogueAdapter::bundled();
    };
    let format = config
        .get_string("catalogue", "format")
        .unwrap_or_else(|| "csv".to_string());
    match format.to_lowercase().as_str() {
        "csv" => CatalogueAdapter::from_csv_file(&path),
        "json" => CatalogueAdapter::from_json_file(&path),
        other => Err(CardError::ConfigInvalid {
            section: "catalogue".to_string(),
            key: "format".to_string(),
            reason: format!("expected csv or json, got '{}'", other),
        }),
    }
}

/// Build the patch a `card` invocation describes. Negative numeric flags
/// are clamped to zero, like any other field input.
pub fn build_cli_patch(
    side: Option<Side>,
    price: Option<f64>,
    lot: Option<f64>,
    buy_price: Option<f64>,
    date: Option<NaiveDate>,
) -> TransactionPatch {
    let clamp = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    TransactionPatch {
        side,
        date,
        price: price.map(clamp),
        lot_done: lot.map(clamp),
        buy_price: buy_price.map(clamp),
        ..TransactionPatch::default()
    }
}

#[allow(clippy::too_many_arguments)]
fn run_card(
    side: Option<Side>,
    ticker: Option<&str>,
    price: Option<f64>,
    lot: Option<f64>,
    buy_price: Option<f64>,
    date: Option<NaiveDate>,
    output: Option<&PathBuf>,
    config: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: catalogue
    let catalogue = match load_catalogue(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Loaded catalogue ({} listings)", catalogue.len());

    // Stage 2: start from the canonical example record, as the form does
    let mut record = TransactionRecord::default();

    // Stage 3: ticker selection
    if let Some(code) = ticker {
        let stock = match catalogue.lookup(code) {
            Ok(Some(stock)) => stock,
            Ok(None) => {
                let err = CardError::UnknownTicker {
                    code: code.to_uppercase(),
                };
                eprintln!("error: {err}");
                return (&err).into();
            }
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
        eprintln!("Selected {} ({})", stock.code, stock.name);
        record = recalculate(&record, &TransactionPatch::from_selection(Some(&stock)));
    }

    // Stage 4: apply the numeric/side patch
    let patch = build_cli_patch(side, price, lot, buy_price, date);
    record = recalculate(&record, &patch);

    print_summary(&record);

    // Stage 5: write the SVG
    let default_output = PathBuf::from("card.svg");
    let output = output.unwrap_or(&default_output);
    let svg = render_card(&record);
    if let Err(e) = fs::write(output, svg) {
        let err: CardError = e.into();
        eprintln!("error: {err}");
        return (&err).into();
    }
    eprintln!("Card written to {}", output.display());

    ExitCode::SUCCESS
}

fn print_summary(record: &TransactionRecord) {
    println!("{} {}", record.side.as_str(), record.ticker);
    if !record.company_name.is_empty() {
        println!("{} [{}]", record.company_name, record.board.as_str());
    }
    println!("Date          {}", format_date(record.date));
    println!("Price         {}", format_number(record.price));
    println!("Lot Done      {}", format_number(record.lot_done));
    println!("Amount        {}", format_number(record.amount));
    println!("Total Fee     {}", format_number(record.total_fee));
    println!("Net Amount    {}", format_number(record.net_amount));
    if record.side == Side::Sell {
        println!(
            "Realized Gain {}",
            format_realized_gain(record.realized_gain, record.realized_gain_percent)
        );
    }
}

fn run_search(query: &str, limit: usize, config: Option<&PathBuf>) -> ExitCode {
    let catalogue = match load_catalogue(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match catalogue.search(query, limit) {
        Ok(hits) => {
            for stock in &hits {
                println!("{:<6} {} [{}]", stock.code, stock.name, stock.board.as_str());
            }
            eprintln!("{} match(es)", hits.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(code: &str, config: Option<&PathBuf>) -> ExitCode {
    let catalogue = match load_catalogue(config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match catalogue.lookup(code) {
        Ok(Some(stock)) => {
            println!("Code:  {}", stock.code);
            println!("Name:  {}", stock.name);
            println!("Board: {}", stock.board.as_str());
            ExitCode::SUCCESS
        }
        Ok(None) => {
            let err = CardError::UnknownTicker {
                code: code.to_uppercase(),
            };
            eprintln!("error: {err}");
            (&err).into()
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

#[cfg(feature = "web")]
fn run_serve(config_path: &PathBuf) -> ExitCode {
    use crate::adapters::web::{build_router, new_session_record, AppState};
    use std::sync::Arc;

    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let catalogue = match catalogue_from_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!("Loaded catalogue ({} listings)", catalogue.len());

    let bind = adapter
        .get_string("server", "bind")
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = adapter.get_int("server", "port", 3000) as u16;

    let state = AppState {
        stocks: Arc::new(catalogue),
        config: Arc::new(adapter),
        session: new_session_record(),
        http: reqwest::Client::new(),
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            let err: CardError = e.into();
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    let result: std::io::Result<()> = runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind((bind.as_str(), port)).await?;
        eprintln!("Listening on http://{}", listener.local_addr()?);
        axum::serve(listener, build_router(state)).await
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let err: CardError = e.into();
            eprintln!("error: {err}");
            (&err).into()
        }
    }
}

#[cfg(not(feature = "web"))]
fn run_serve(_config_path: &PathBuf) -> ExitCode {
    eprintln!("error: this binary was built without the web feature");
    ExitCode::from(2)
}
