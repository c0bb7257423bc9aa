//! CLI tool for vgrid - loads a TSV file through the grid's paste path,
//! optionally sorts it, and writes TSV or JSON
//!
//! Usage:
//!   vgrid_cli <input.tsv>                    # Normalized TSV to stdout
//!   vgrid_cli <input.tsv> --sort 2 --desc    # Sort by the third column
//!   vgrid_cli <input.tsv> --sort price       # Sort by header title
//!   vgrid_cli <input.tsv> --json             # JSON rows to stdout
//!
//! The first line is the header row; column types are inferred from the data.
//! Set `RUST_LOG=vgrid=debug` to trace grid activity on stderr.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use tracing_subscriber::EnvFilter;
use vgrid::convert::infer_column_type;
use vgrid::{tsv, ColumnSchema, DataModel, DataSource, Grid, GridConfig, Intent};

struct Args {
    input: String,
    sort: Option<String>,
    descending: bool,
    json: bool,
}

fn usage() -> ! {
    eprintln!("Usage: vgrid_cli <input.tsv> [--sort COL] [--desc] [--json]");
    std::process::exit(1);
}

fn parse_args() -> Args {
    let mut input = None;
    let mut sort = None;
    let mut descending = false;
    let mut json = false;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--sort" => sort = Some(args.next().unwrap_or_else(|| usage())),
            "--desc" => descending = true,
            "--json" => json = true,
            "-h" | "--help" => usage(),
            _ if input.is_none() => input = Some(arg),
            _ => usage(),
        }
    }
    Args {
        input: input.unwrap_or_else(|| usage()),
        sort,
        descending,
        json,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = parse_args();

    let text = match fs::read_to_string(&args.input) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {}: {}", args.input, e);
            std::process::exit(1);
        }
    };

    let rows = match tsv::parse(&text) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Error parsing {}: {}", args.input, e);
            std::process::exit(1);
        }
    };
    let (header, body) = rows.split_first().unwrap_or_else(|| usage());

    let schemas: Vec<ColumnSchema> = header
        .iter()
        .enumerate()
        .map(|(col, title)| {
            let samples = body.iter().map(|row| row[col].as_str());
            ColumnSchema::new(title.clone(), infer_column_type(samples))
        })
        .collect();

    let mut grid = Grid::new(DataModel::new(schemas, Vec::new()), GridConfig::default());
    if !body.is_empty() {
        let matrix: Vec<Vec<Option<String>>> = body
            .iter()
            .map(|row| row.iter().cloned().map(Some).collect())
            .collect();
        grid.handle(Intent::Paste(matrix));
    }

    if let Some(key) = &args.sort {
        let col = key
            .parse::<usize>()
            .ok()
            .or_else(|| header.iter().position(|title| title == key));
        let Some(col) = col.filter(|&c| c < header.len()) else {
            eprintln!("Unknown column: {key}");
            std::process::exit(1);
        };
        grid.handle(Intent::Sort(col));
        if args.descending {
            grid.handle(Intent::Sort(col));
        }
    }

    let out = if args.json {
        let titles: Vec<&str> = header.iter().map(String::as_str).collect();
        let doc = serde_json::json!({
            "columns": titles,
            "rows": grid.model().to_json_rows(),
        });
        serde_json::to_string_pretty(&doc).unwrap()
    } else {
        grid.handle(Intent::SelectAll);
        let titles: Vec<String> = header
            .iter()
            .map(|title| tsv::escape_field(title, tsv::TAB))
            .collect();
        let mut out = titles.join("\t");
        if grid.model().row_count() > 0 {
            out.push_str(tsv::CRLF);
            out.push_str(&grid.copy_text());
        }
        out
    };

    let mut stdout = io::stdout();
    stdout.write_all(out.as_bytes()).unwrap();
    println!();
}
