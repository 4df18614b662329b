pub mod matches;
pub mod schema;
pub mod sports;
pub mod teams;
pub mod templates;

use scoreboard_core::errors::{ExError, ExErrorKind};
use scoreboard_core::views::TableRow;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::Table;

/// Render rows through their `TableRow` headers and cells
pub fn render_rows<'a, T>(rows: impl IntoIterator<Item = &'a T>) -> String
where
    T: TableRow + 'a,
{
    let mut builder = Builder::default();
    builder.push_record(T::headers().iter().map(|h| h.to_string()));
    for row in rows {
        builder.push_record(row.cells());
    }
    builder.build().to_string()
}

/// Print a rendered table indented by two spaces
pub fn print_table(table: impl Into<String>) {
    for line in table.into().lines() {
        println!("  {}", line);
    }
}

pub fn print_tabled<I, T>(rows: I)
where
    I: IntoIterator<Item = T>,
    T: tabled::Tabled,
{
    print_table(Table::new(rows).to_string());
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), ExError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Command-line validation failure that never reached a repository
pub fn invalid_input(op: &str, message: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op(op.to_string())
        .with_message(message)
}
