use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::dashboard::{window, RECENT_WINDOW};
use crate::db::Database;
use crate::models::{Dated, Series, User};
use crate::ui::screens::series::ListRow;

pub(crate) fn as_cli(args: &[String], db: Database, config: &Config) -> Result<()> {
    let Some(command) = args.get(1) else {
        print_usage();
        return Ok(());
    };
    let rest = args.get(2..).unwrap_or_default();
    match command.as_str() {
        "serve" => cli_serve(db, config),
        "add-user" => cli_add_user(rest, &db),
        "summary" | "s" => cli_summary(&db),
        "list" | "ls" => cli_list(rest, &db),
        "export" => cli_export(rest, &db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("migas {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Migas: LPG subsidy monitoring dashboard");
    println!();
    println!("Usage: migas [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  serve                         Start the HTTP record service");
    println!("  add-user <name> <password>    Create a user or reset its password");
    println!("  summary                       Print the latest record of every series");
    println!("  list <series>                 Print the 12 most recent records");
    println!("  export <series> [path]        Export a series to CSV");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Series: {}", series_names());
}

fn series_names() -> String {
    Series::all()
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_series(arg: Option<&String>, usage: &str) -> Result<Series> {
    let raw = arg.ok_or_else(|| anyhow::anyhow!("Usage: {usage}"))?;
    Series::parse(raw)
        .ok_or_else(|| anyhow::anyhow!("Unknown series '{raw}'. Expected one of: {}", series_names()))
}

fn cli_serve(db: Database, config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(crate::server::start(config, db))
}

fn cli_add_user(args: &[String], db: &Database) -> Result<()> {
    let (Some(username), Some(password)) = (args.first(), args.get(1)) else {
        anyhow::bail!("Usage: migas add-user <username> <password>");
    };
    if username.trim().is_empty() {
        anyhow::bail!("Username must not be empty");
    }
    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }

    let hash = crate::auth::hash_password(password)?;
    let id = db.upsert_user(&User::new(username, hash))?;
    info!(user = %username.trim(), id, "User saved");
    println!("Saved user '{}' (id {id})", username.trim());
    Ok(())
}

fn cli_summary(db: &Database) -> Result<()> {
    println!("Migas: latest records");
    println!("{}", "─".repeat(60));
    print_latest(Series::PriceReference, &db.get_price_references()?, db)?;
    print_latest(Series::ExchangeRate, &db.get_exchange_rates()?, db)?;
    print_latest(Series::NationalVolume, &db.get_national_volumes()?, db)?;
    print_latest(Series::ProvincialVolume, &db.get_provincial_volumes()?, db)?;
    print_latest(Series::Simulation, &db.get_simulation_rows()?, db)?;
    Ok(())
}

fn print_latest<T: ListRow + Dated + Clone>(series: Series, rows: &[T], db: &Database) -> Result<()> {
    let count = db.count_records(series)?;
    println!();
    println!("{} ({count} records)", series.label());
    let latest = window(rows, 1).recent;
    match latest.first() {
        None => println!("  no data"),
        Some(row) => {
            for (header, cell) in T::HEADERS.iter().zip(row.cells()) {
                println!("  {header:<20} {cell}");
            }
        }
    }
    Ok(())
}

fn cli_list(args: &[String], db: &Database) -> Result<()> {
    let series = parse_series(args.first(), "migas list <series>")?;
    match series {
        Series::PriceReference => print_table(&db.get_price_references()?),
        Series::ExchangeRate => print_table(&db.get_exchange_rates()?),
        Series::NationalVolume => print_table(&db.get_national_volumes()?),
        Series::ProvincialVolume => print_table(&db.get_provincial_volumes()?),
        Series::Simulation => print_table(&db.get_simulation_rows()?),
    }
    Ok(())
}

fn print_table<T: ListRow + Dated + Clone>(rows: &[T]) {
    let recent = window(rows, RECENT_WINDOW).recent;
    if recent.is_empty() {
        println!("No data");
        return;
    }

    let cells: Vec<Vec<String>> = recent.iter().map(T::cells).collect();
    let widths = column_widths(T::HEADERS, &cells);

    let header: Vec<String> = T::HEADERS
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{h:<w$}"))
        .collect();
    println!("{}", header.join("  ").trim_end());
    println!("{}", "─".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect();
        println!("{}", line.join("  ").trim_end());
    }
}

/// Widest of header and cells per column, in chars.
pub(crate) fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

fn cli_export(args: &[String], db: &Database) -> Result<()> {
    let series = parse_series(args.first(), "migas export <series> [path]")?;
    let output_path = args
        .get(1)
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| default_export_path(series));

    let count = db.export_to_csv(series, Path::new(&output_path))?;
    if count == 0 {
        println!("No {} records; wrote header only to {output_path}", series.label());
    } else {
        println!("Exported {count} {} records to {output_path}", series.label());
    }
    Ok(())
}

pub(crate) fn default_export_path(series: Series) -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    format!("{home}/migas-{}.csv", series.as_str())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
