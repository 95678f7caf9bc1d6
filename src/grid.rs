//! The grid state engine: filters, pagination and selection over an
//! immutable dataset, with the three derived counters recomputed after
//! every mutation.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::columns::{ColumnSpec, FilterKind, find};
use crate::dataset::Dataset;
use crate::domain::{CountScope, GridError, PAGE_SIZES, SelectScope};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// An active column predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Case-insensitive substring match.
    Text(String),
    /// Numeric comparison; rows with unparsable values never match.
    Number(NumberOp, f64),
    /// Exact membership in a value set.
    Set(Vec<String>),
}

impl Predicate {
    pub fn kind(&self) -> FilterKind {
        match self {
            Predicate::Text(_) => FilterKind::Text,
            Predicate::Number(_, _) => FilterKind::Number,
            Predicate::Set(_) => FilterKind::Set,
        }
    }

    fn matches(&self, value: &str) -> bool {
        match self {
            Predicate::Text(needle) => value.to_lowercase().contains(&needle.to_lowercase()),
            Predicate::Number(op, rhs) => match value.trim().parse::<f64>() {
                Ok(lhs) => match op {
                    NumberOp::Eq => lhs == *rhs,
                    NumberOp::Ne => lhs != *rhs,
                    NumberOp::Lt => lhs < *rhs,
                    NumberOp::Le => lhs <= *rhs,
                    NumberOp::Gt => lhs > *rhs,
                    NumberOp::Ge => lhs >= *rhs,
                },
                Err(_) => false,
            },
            Predicate::Set(values) => values.iter().any(|v| v == value),
        }
    }
}

/// The three derived counters shown in the stats bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counters {
    /// Dataset size, constant for the session.
    pub total: usize,
    /// Rows on the current page passing filters and search.
    pub displayed: usize,
    /// Selected rows that are currently visible (scope per configuration).
    pub selected: usize,
}

/// Filter, pagination and selection state over a shared read-only dataset.
///
/// Every mutating operation validates its input first, mutates, and then
/// runs one [`GridState::refresh`] pass; the triad can never be observed in
/// a half-updated state.
pub struct GridState {
    dataset: Arc<Dataset>,
    columns: Vec<ColumnSpec>,
    filters: HashMap<String, Predicate>,
    search: Option<String>,
    page: usize,
    page_size: usize,
    selection: HashSet<usize>,
    clamp_pages: bool,
    select_scope: SelectScope,
    count_scope: CountScope,
    // Derived on every refresh, never carried across mutations.
    filtered: Vec<usize>,
    counters: Counters,
}

impl GridState {
    pub fn new(
        dataset: Arc<Dataset>,
        columns: Vec<ColumnSpec>,
        page_size: usize,
        clamp_pages: bool,
        select_scope: SelectScope,
        count_scope: CountScope,
    ) -> Result<Self, GridError> {
        if !PAGE_SIZES.contains(&page_size) {
            return Err(GridError::InvalidPageSize(page_size));
        }
        let mut grid = GridState {
            dataset,
            columns,
            filters: HashMap::new(),
            search: None,
            page: 0,
            page_size,
            selection: HashSet::new(),
            clamp_pages,
            select_scope,
            count_scope,
            filtered: Vec::new(),
            counters: Counters::default(),
        };
        grid.refresh();
        Ok(grid)
    }

    // ------------------------- operations -------------------------- //

    /// Set or clear the predicate of one column. Idempotent.
    pub fn set_filter(&mut self, field: &str, predicate: Option<Predicate>) -> Result<(), GridError> {
        let column = find(&self.columns, field)
            .ok_or_else(|| GridError::InvalidFilter(format!("unknown field \"{field}\"")))?;
        if let Some(pred) = &predicate {
            if column.filter != pred.kind() {
                return Err(GridError::InvalidFilter(format!(
                    "field \"{field}\" takes {:?} predicates, got {:?}",
                    column.filter,
                    pred.kind()
                )));
            }
            if self.dataset.schema().index_of(field).is_none() {
                return Err(GridError::InvalidFilter(format!(
                    "field \"{field}\" not present in the loaded dataset"
                )));
            }
        }
        match predicate {
            Some(pred) => {
                trace!("Filter {field} := {pred:?}");
                self.filters.insert(field.to_string(), pred);
            }
            None => {
                trace!("Filter {field} cleared");
                self.filters.remove(field);
            }
        }
        self.refresh();
        Ok(())
    }

    /// Apply a settled quick-search term; empty terms clear the search.
    /// Debouncing happens upstream, the grid only sees final terms.
    pub fn set_search(&mut self, term: Option<String>) {
        self.search = term.filter(|t| !t.is_empty()).map(|t| t.to_lowercase());
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.search = None;
        self.refresh();
    }

    /// Jump to a page. Out-of-range pages are rejected, or clamped when the
    /// grid was configured to clamp.
    pub fn set_page(&mut self, page: usize) -> Result<(), GridError> {
        let pages = self.page_count();
        if page >= pages {
            if !self.clamp_pages {
                return Err(GridError::InvalidPage { page, pages });
            }
            self.page = pages - 1;
        } else {
            self.page = page;
        }
        self.refresh();
        Ok(())
    }

    /// Switch to one of the enumerated page sizes; the current page is
    /// clamped against the new page count.
    pub fn set_page_size(&mut self, size: usize) -> Result<(), GridError> {
        if !PAGE_SIZES.contains(&size) {
            return Err(GridError::InvalidPageSize(size));
        }
        self.page_size = size;
        self.refresh();
        Ok(())
    }

    /// Select or deselect one row by id. Selection is independent of
    /// filters and pages; hidden rows stay selected.
    pub fn toggle_selection(&mut self, row_id: usize, selected: bool) -> Result<(), GridError> {
        if row_id >= self.dataset.len() {
            return Err(GridError::InvalidRow(row_id));
        }
        if selected {
            self.selection.insert(row_id);
        } else {
            self.selection.remove(&row_id);
        }
        self.refresh();
        Ok(())
    }

    /// Bulk (de)select the visible rows; scope (whole filtered set vs.
    /// current page) is the configured select scope.
    pub fn select_all_visible(&mut self, selected: bool) {
        let ids: Vec<usize> = match self.select_scope {
            SelectScope::Filtered => self.filtered.clone(),
            SelectScope::Page => self.visible_window().to_vec(),
        };
        debug!("Select-all({selected}) over {} rows", ids.len());
        for id in ids {
            if selected {
                self.selection.insert(id);
            } else {
                self.selection.remove(&id);
            }
        }
        self.refresh();
    }

    // --------------------------- queries ---------------------------- //

    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Row ids of the current page, filtered, in dataset order.
    pub fn visible_window(&self) -> &[usize] {
        let begin = usize::min(self.page * self.page_size, self.filtered.len());
        let end = usize::min(begin + self.page_size, self.filtered.len());
        &self.filtered[begin..end]
    }

    /// All row ids passing filters and search, in dataset order.
    pub fn filtered_ids(&self) -> &[usize] {
        &self.filtered
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        usize::max(1, self.filtered.len().div_ceil(self.page_size))
    }

    pub fn is_selected(&self, row_id: usize) -> bool {
        self.selection.contains(&row_id)
    }

    pub fn selection_len(&self) -> usize {
        self.selection.len()
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    // ------------------------- recomputation ------------------------ //

    /// One pure pass over (dataset, filters, search, page, selection):
    /// rebuilds the filtered id list, clamps the page and derives the
    /// counters. Runs after every mutation so the counters cannot drift
    /// from the state they are derived from.
    fn refresh(&mut self) {
        let schema = self.dataset.schema();
        let active: Vec<(usize, &Predicate)> = self
            .filters
            .iter()
            .filter_map(|(field, pred)| schema.index_of(field).map(|idx| (idx, pred)))
            .collect();
        let search = self.search.as_deref();

        self.filtered = self
            .dataset
            .rows()
            .par_iter()
            .filter(|row| {
                active.iter().all(|(idx, pred)| pred.matches(row.value(*idx)))
                    && search.is_none_or(|needle| {
                        row.values().iter().any(|v| v.to_lowercase().contains(needle))
                    })
            })
            .map(|row| row.id())
            .collect();

        self.page = usize::min(self.page, self.page_count() - 1);

        let window = self.visible_window();
        let selected = match self.count_scope {
            CountScope::Filtered => self
                .filtered
                .iter()
                .filter(|id| self.selection.contains(id))
                .count(),
            CountScope::Page => window.iter().filter(|id| self.selection.contains(id)).count(),
        };
        self.counters = Counters {
            total: self.dataset.len(),
            displayed: window.len(),
            selected,
        };
        trace!(
            "Refresh: {} filtered, page {}/{}, counters {:?}",
            self.filtered.len(),
            self.page,
            self.page_count(),
            self.counters
        );
    }
}
