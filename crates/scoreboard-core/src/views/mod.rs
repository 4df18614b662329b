//! List and table adapters for a presentation layer
//!
//! The repository result is the authoritative full set; adapters only own
//! a filtered, sorted projection of it and are reloaded wholesale.

pub mod filter;
pub mod sort;
pub mod table;

pub use filter::{FilteredList, SportFilter, ALL_SPORTS};
pub use sort::{SortColumn, SortKey, SortOrder};
pub use table::TableRow;
