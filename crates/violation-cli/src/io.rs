//! JSON adapters between files and pipeline tables

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;
use violation_features::RawTable;

/// Read a JSON array of row objects into a raw table.
///
/// The header is the union of all keys in first-seen order; absent keys
/// and `null` become missing cells, numbers and booleans are kept as text.
pub fn read_table(path: &Path) -> Result<RawTable> {
    let file = fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let value: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    let table = table_from_json(value)?;
    debug!(
        "Loaded {} rows with {} columns from {}",
        table.len(),
        table.columns().len(),
        path.display()
    );
    Ok(table)
}

/// Convert a parsed JSON array of objects into a raw table
pub fn table_from_json(value: Value) -> Result<RawTable> {
    let Value::Array(items) = value else {
        bail!("expected a JSON array of row objects");
    };

    let mut objects = Vec::with_capacity(items.len());
    for (row, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(object) => objects.push(object),
            other => bail!("row {} is not an object: {}", row, other),
        }
    }

    let mut header: Vec<String> = Vec::new();
    for object in &objects {
        for key in object.keys() {
            if !header.contains(key) {
                header.push(key.clone());
            }
        }
    }

    let mut table = RawTable::new(header.clone());
    for object in &objects {
        let row = header
            .iter()
            .map(|column| object.get(column).and_then(cell))
            .collect();
        table.push_row(row)?;
    }
    Ok(table)
}

fn cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Write a value as JSON to a file, or to stdout when no path is given
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>, pretty: bool) -> Result<()> {
    let writer: Box<dyn Write> = match path {
        Some(path) => Box::new(
            fs::File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = BufWriter::new(writer);

    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
