use std::cmp::Ordering;
use std::str::FromStr;

use super::table::TableRow;
use crate::errors::{ExError, ExErrorKind};

/// Key a row sorts by in its primary column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey<'a> {
    Id(i64),
    Text(&'a str),
}

/// Which column drives the ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    /// Name, or id for matches
    Primary,
    /// Sport name
    Sport,
}

impl FromStr for SortColumn {
    type Err = ExError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" | "id" | "primary" => Ok(SortColumn::Primary),
            "sport" | "sportart" => Ok(SortColumn::Sport),
            other => Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("parse_sort_column")
                .with_message(format!("Unknown sort column: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Compare two rows on one column in the given direction
///
/// Rows equal on the column compare `Equal` in both directions, so a stable
/// sort keeps their relative order.
pub fn compare<T: TableRow>(a: &T, b: &T, column: SortColumn, order: SortOrder) -> Ordering {
    let ordering = match column {
        SortColumn::Primary => a.primary_key().cmp(&b.primary_key()),
        SortColumn::Sport => a.sport().cmp(b.sport()),
    };
    match order {
        SortOrder::Ascending => ordering,
        SortOrder::Descending => ordering.reverse(),
    }
}

/// Stable in-place sort of a row slice
pub fn sort_rows<T: TableRow>(rows: &mut [T], column: SortColumn, order: SortOrder) {
    rows.sort_by(|a, b| compare(a, b, column, order));
}
