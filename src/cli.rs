use anyhow::Result;
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::build_graph;
use crate::config::load_config;
use crate::row::{Row, Value};

#[derive(Parser, Debug)]
#[command(
    name = "edgeviz",
    version,
    about = "Builds a renderable graph with layout coordinates from a tabular edge list"
)]
pub struct Args {
    /// Input rows as a JSON array of objects, or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Config file (JSON or JSON5) with `graph` and optional `layout` sections
    #[arg(short = 'c', long = "config")]
    pub config: PathBuf,

    /// Output file. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args.config)?;
    let input = read_input(args.input.as_deref())?;
    let rows = parse_rows(&input)?;
    let output = build_graph(&rows, &config.graph, &config.layout)?;
    let json = serde_json::to_string_pretty(&output)?;
    match args.output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn parse_rows(input: &str) -> Result<Vec<Row>> {
    let parsed: serde_json::Value = serde_json::from_str(input)?;
    let Some(items) = parsed.as_array() else {
        return Err(anyhow::anyhow!("input must be a JSON array of row objects"));
    };
    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let Some(map) = item.as_object() else {
            return Err(anyhow::anyhow!("every input row must be a JSON object"));
        };
        let mut row = Row::new();
        for (key, value) in map {
            // Nulls read as a missing field rather than a value.
            let Some(value) = convert_value(value) else {
                continue;
            };
            row.set(key, value);
        }
        rows.push(row);
    }
    Ok(rows)
}

fn convert_value(value: &serde_json::Value) -> Option<Value> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(Value::Text(b.to_string())),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Some(Value::Int(i)),
            None => n.as_f64().map(Value::Float),
        },
        serde_json::Value::String(s) => Some(Value::Text(s.clone())),
        other => Some(Value::Text(other.to_string())),
    }
}
