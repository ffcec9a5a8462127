//! Client-side table state: sorting, filtering and pagination.
//!
//! [`TableView`] owns the rows handed to it and derives the visible page.
//! It never fetches data and never mutates the rows it was given.

use std::cmp::Ordering;

use super::column::{CellValue, ColumnSet, TableRow};
use crate::shared::list_utils::is_filter_active;

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    /// Same key flips the direction, another key starts ascending
    pub fn toggle(&mut self, key: &str) {
        if self.key.as_deref() == Some(key) {
            self.direction = self.direction.toggled();
        } else {
            self.key = Some(key.to_string());
            self.direction = SortDirection::Asc;
        }
    }

    pub fn is_sorted_by(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: usize,
    pub page_size: usize,
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn total_pages(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.page_size)
    }

    /// Keeps `current_page` inside `[1, max(1, total_pages)]`
    pub fn clamp(&mut self, row_count: usize) {
        let last = self.total_pages(row_count).max(1);
        self.current_page = self.current_page.clamp(1, last);
    }

    fn range(&self, row_count: usize) -> std::ops::Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(row_count);
        let end = (self.current_page * self.page_size).min(row_count);
        start..end
    }
}

/// Null cells go last whatever the direction
fn compare_cells(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.compare(b);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
    }
}

pub struct TableView<R> {
    rows: Vec<R>,
    columns: ColumnSet<R>,
    sort: SortState,
    pagination: PaginationState,
    filter: String,
}

impl<R: TableRow> TableView<R> {
    pub fn new(rows: Vec<R>, columns: ColumnSet<R>, page_size: usize) -> Self {
        let mut view = Self {
            rows,
            columns,
            sort: SortState::default(),
            pagination: PaginationState::new(page_size),
            filter: String::new(),
        };
        view.clamp_page();
        view
    }

    pub fn columns(&self) -> &ColumnSet<R> {
        &self.columns
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Rows passing the current filter
    pub fn row_count(&self) -> usize {
        if !is_filter_active(&self.filter) {
            return self.rows.len();
        }
        self.rows.iter().filter(|r| self.matches_filter(r)).count()
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.row_count())
    }

    /// Header click. Unknown and non-sortable keys are ignored; the page is kept.
    pub fn set_sort(&mut self, key: &str) {
        let sortable = self.columns.get(key).is_some_and(|c| c.sortable);
        if sortable {
            self.sort.toggle(key);
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.current_page = page;
        self.clamp_page();
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.pagination.page_size = page_size.max(1);
        self.clamp_page();
    }

    /// Any new filter returns to the first page
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.pagination.current_page = 1;
    }

    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.clamp_page();
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Filtered, sorted rows of the current page
    pub fn visible_rows(&self) -> Vec<&R> {
        let mut selected: Vec<&R> = if is_filter_active(&self.filter) {
            self.rows.iter().filter(|r| self.matches_filter(r)).collect()
        } else {
            self.rows.iter().collect()
        };

        if let Some(key) = self.sort.key.as_deref() {
            let direction = self.sort.direction;
            // slice::sort_by is stable, ties keep their input order
            selected.sort_by(|a, b| compare_cells(&a.cell(key), &b.cell(key), direction));
        }

        let range = self.pagination.range(selected.len());
        selected.drain(range).collect()
    }

    fn matches_filter(&self, row: &R) -> bool {
        let needle = self.filter.trim().to_lowercase();
        self.columns
            .iter()
            .any(|c| c.display(row).to_lowercase().contains(&needle))
    }

    fn clamp_page(&mut self) {
        let count = self.row_count();
        self.pagination.clamp(count);
    }
}
