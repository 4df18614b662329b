use super::sort::{compare, SortColumn, SortOrder};
use super::table::TableRow;

/// Sentinel filter value meaning "every sport"
pub const ALL_SPORTS: &str = "Alle";

/// Client-side sport filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SportFilter {
    #[default]
    All,
    Sport(String),
}

impl SportFilter {
    /// Interpret a pick-list value; empty or `"Alle"` selects everything
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL_SPORTS {
            SportFilter::All
        } else {
            SportFilter::Sport(value.to_string())
        }
    }

    pub fn matches(&self, sport: &str) -> bool {
        match self {
            SportFilter::All => true,
            SportFilter::Sport(name) => name == sport,
        }
    }
}

impl From<Option<&str>> for SportFilter {
    fn from(value: Option<&str>) -> Self {
        value.map(SportFilter::parse).unwrap_or_default()
    }
}

/// Filtered, sortable projection over an authoritative full set
///
/// The projection is a list of indices into `full`; the full set itself is
/// never reordered or patched, only replaced by `reload`.
#[derive(Debug, Clone)]
pub struct FilteredList<T> {
    full: Vec<T>,
    filter: SportFilter,
    visible: Vec<usize>,
}

impl<T> Default for FilteredList<T> {
    fn default() -> Self {
        Self {
            full: Vec::new(),
            filter: SportFilter::All,
            visible: Vec::new(),
        }
    }
}

impl<T: TableRow> FilteredList<T> {
    pub fn new(items: Vec<T>) -> Self {
        let mut list = Self {
            full: items,
            ..Self::default()
        };
        list.refresh();
        list
    }

    /// Replace the full set wholesale and reapply the active filter
    pub fn reload(&mut self, items: Vec<T>) {
        self.full = items;
        self.refresh();
    }

    /// Select a new filter; the projection returns to full-set order
    pub fn apply_filter(&mut self, filter: SportFilter) {
        self.filter = filter;
        self.refresh();
    }

    /// Stable sort of the projection only
    pub fn sort(&mut self, column: SortColumn, order: SortOrder) {
        let full = &self.full;
        self.visible
            .sort_by(|&a, &b| compare(&full[a], &full[b], column, order));
    }

    pub fn filter(&self) -> &SportFilter {
        &self.filter
    }

    /// Number of visible rows
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Visible row at `index`, `None` when out of range
    pub fn get(&self, index: usize) -> Option<&T> {
        self.visible.get(index).map(|&i| &self.full[i])
    }

    /// Visible rows in projection order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.visible.iter().map(move |&i| &self.full[i])
    }

    /// The authoritative full set, in load order
    pub fn all(&self) -> &[T] {
        &self.full
    }

    fn refresh(&mut self) {
        self.visible = self
            .full
            .iter()
            .enumerate()
            .filter(|(_, row)| self.filter.matches(row.sport()))
            .map(|(i, _)| i)
            .collect();
    }
}
