//! Console rendering of table contents.

use serde_json::Value;
use uniqdb_store::{KeyRole, StoreResult, TableStore};

/// Renders the full contents of a table as an aligned text table.
///
/// Key attributes come first, in schema order, annotated `(PK)` / `(SK)`;
/// remaining attributes follow in the order they first appear.
pub fn render_table(store: &dyn TableStore, table: &str) -> StoreResult<String> {
    let schema = store.key_schema(table)?;
    let items = store.scan(table)?;

    let mut columns: Vec<String> = schema.attributes().map(str::to_string).collect();
    for item in &items {
        for name in item.keys() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.clone());
            }
        }
    }

    let headers: Vec<String> = columns
        .iter()
        .map(|name| match schema.role_of(name) {
            Some(KeyRole::Hash) => format!("{name} (PK)"),
            Some(KeyRole::Range) => format!("{name} (SK)"),
            None => name.clone(),
        })
        .collect();

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            columns
                .iter()
                .map(|name| display_value(item.get(name)))
                .collect()
        })
        .collect();

    // Column widths from header and data
    let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    out.push_str(table);
    out.push('\n');

    let header_line: Vec<String> = headers
        .iter()
        .zip(widths.iter().copied())
        .map(|(header, width)| format!("{header:width$}"))
        .collect();
    out.push_str(&header_line.join(" | "));
    out.push('\n');

    let total_width = widths.iter().sum::<usize>() + (widths.len().saturating_sub(1)) * 3;
    out.push_str(&"-".repeat(total_width));
    out.push('\n');

    if rows.is_empty() {
        out.push_str("(empty)\n");
        return Ok(out);
    }

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, width)| format!("{cell:width$}"))
            .collect();
        out.push_str(&line.join(" | "));
        out.push('\n');
    }

    Ok(out)
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
