//! dyntable CLI
//!
//! Loads a table configuration and a JSON array of records, applies
//! interactions and prints the resulting table.

mod error;
mod render;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use dyntable_lib::model::Row;
use dyntable_lib::options::TableConfig;
use dyntable_lib::state::SortSpec;
use dyntable_lib::table::DynamicTable;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

use crate::error::CliError;

/// Render a data table from a JSON config and JSON records
#[derive(Parser, Debug)]
#[command(name = "dyntable")]
#[command(version)]
#[command(about = "Render a data table from JSON", long_about = None)]
struct Args {
    /// Table configuration file (JSON)
    #[arg(short, long)]
    config: PathBuf,

    /// Records file (JSON array of objects)
    #[arg(short, long)]
    data: PathBuf,

    /// Page to show, 1-based as on the page buttons
    #[arg(short, long)]
    page: Option<usize>,

    /// Column to sort by
    #[arg(short, long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Rows per page
    #[arg(long)]
    rows: Option<usize>,

    /// Expand a row by id (e.g. 0 or 2.1)
    #[arg(short, long)]
    expand: Vec<String>,

    /// Move a column onto another, as FROM:TO
    #[arg(long, value_parser = parse_drag)]
    drag: Vec<(String, String)>,

    /// Write logs to a file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_drag(s: &str) -> Result<(String, String), String> {
    match s.split_once(':') {
        Some((from, to)) if !from.is_empty() && !to.is_empty() => Ok((from.to_string(), to.to_string())),
        _ => Err(format!("expected FROM:TO, got '{}'", s)),
    }
}

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(args: &Args) -> Result<(), CliError> {
    let level = level(args.verbose);
    match &args.log_file {
        Some(path) => {
            let file = File::create(path).map_err(|e| CliError::log_file(path.display().to_string(), e))?;
            WriteLogger::init(level, Config::default(), file)?;
        }
        None => {
            TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;
        }
    }
    Ok(())
}

fn load_rows(path: &Path) -> Result<Vec<Row>, CliError> {
    let name = path.display().to_string();
    let json = std::fs::read_to_string(path).map_err(|e| CliError::read_data(&name, e))?;
    serde_json::from_str(&json).map_err(|e| CliError::parse_data(&name, e))
}

fn run(args: Args) -> Result<String, CliError> {
    init_logging(&args)?;

    let mut options = TableConfig::from_path(&args.config)?.into_options();
    if let Some(rows) = args.rows {
        options = options.with_rows_per_page(rows);
    }
    let data = load_rows(&args.data)?;
    log::info!("loaded {} rows from {}", data.len(), args.data.display());

    let mut table = DynamicTable::new(options, data);

    if let Some(column) = &args.sort {
        let target = if args.desc {
            SortSpec::desc(column)
        } else {
            SortSpec::asc(column)
        };
        // At most one full cycle: unsorted, ascending, descending.
        for _ in 0..3 {
            if table.sort() == Some(&target) {
                break;
            }
            if !table.toggle_sort(column) {
                log::warn!("column '{}' is not sortable", column);
                break;
            }
        }
    }

    for (from, to) in &args.drag {
        table.start_drag(from);
        if table.drop_column(to).is_none() {
            log::warn!("could not move column '{}' onto '{}'", from, to);
        }
    }

    if let Some(page) = args.page
        && !table.goto_page_label(page)
    {
        log::warn!("page {} is out of range ({} pages)", page, table.page_count());
    }

    for id in &args.expand {
        if !table.toggle_row_expanded(id) {
            log::warn!("row '{}' has no sub-rows", id);
        }
    }

    Ok(render::render(&table.view()))
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(out) => {
            print!("{}", out);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a:b", Some(("a", "b")))]
    #[case("client.name:balance", Some(("client.name", "balance")))]
    #[case("a", None)]
    #[case(":b", None)]
    #[case("a:", None)]
    fn test_parse_drag(#[case] input: &str, #[case] expected: Option<(&str, &str)>) {
        let parsed = parse_drag(input).ok();
        assert_eq!(
            parsed.as_ref().map(|(a, b)| (a.as_str(), b.as_str())),
            expected
        );
    }

    #[rstest]
    #[case(0, LevelFilter::Warn)]
    #[case(1, LevelFilter::Info)]
    #[case(2, LevelFilter::Debug)]
    #[case(5, LevelFilter::Trace)]
    fn test_verbosity_levels(#[case] verbose: u8, #[case] expected: LevelFilter) {
        assert_eq!(level(verbose), expected);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "dyntable", "--config", "t.json", "--data", "d.json", "--sort", "name", "--desc",
            "--drag", "a:b", "-e", "0", "-e", "1.0", "-vv",
        ])
        .unwrap();
        assert_eq!(args.sort.as_deref(), Some("name"));
        assert!(args.desc);
        assert_eq!(args.drag, vec![("a".to_string(), "b".to_string())]);
        assert_eq!(args.expand, vec!["0", "1.0"]);
        assert_eq!(args.verbose, 2);
    }
}
