//! List view-state: filter, sort, paginate.
//!
//! The visible page is a pure projection of (rows, filter text, sort,
//! page window), recomputed on every read rather than patched
//! incrementally — collections here are small and simplicity wins.
//!
//! Network-backed refreshes go through fetch tickets so that two rapid
//! edits cannot render out of order: only the response matching the most
//! recently issued ticket is ever applied (last request wins by request
//! identity, not arrival order).

/// A record a list page can display.
pub trait ListRow {
    /// Values the free-text filter matches against (case-insensitive
    /// substring over each).
    fn search_fields(&self) -> Vec<String>;

    /// Comparable value for a sort key; empty for unknown keys, which
    /// makes sorting by them inert.
    fn sort_field(&self, key: &str) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Page sizes offered by the paginator.
pub const PAGE_SIZE_OPTIONS: &[usize] = &[5, 10, 25, 100];

const DEFAULT_PAGE_SIZE: usize = 10;

/// Ticket identifying one network-backed refresh.
#[derive(Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Filter/sort/page state for one list page.
#[derive(Debug)]
pub struct ListingViewState<T: ListRow> {
    rows: Vec<T>,
    filter_text: String,
    sort: Option<(String, SortDirection)>,
    page_index: usize,
    page_size: usize,
    fetch_generation: u64,
}

impl<T: ListRow> ListingViewState<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows,
            filter_text: String::new(),
            sort: None,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            fetch_generation: 0,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    // ── Inputs ───────────────────────────────────────────

    /// Replace the source collection, keeping filter/sort/page inputs.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
    }

    /// Change the free-text filter. Resets the page index to 0 so a
    /// shrunk result set can never present as a stale blank page.
    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
        self.page_index = 0;
    }

    pub fn set_sort(&mut self, key: impl Into<String>, direction: SortDirection) {
        self.sort = Some((key.into(), direction));
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    pub fn set_page(&mut self, index: usize) {
        self.page_index = index;
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.page_index = 0;
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    // ── Network-backed refresh ───────────────────────────

    /// Register a new in-flight request; any ticket issued earlier is now
    /// stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_generation += 1;
        FetchTicket(self.fetch_generation)
    }

    /// Apply a response if and only if its ticket is the most recently
    /// issued one. Returns whether the rows were applied.
    pub fn apply_fetch(&mut self, ticket: &FetchTicket, rows: Vec<T>) -> bool {
        if ticket.0 == self.fetch_generation {
            self.rows = rows;
            true
        } else {
            tracing::debug!(
                ticket = ticket.0,
                current = self.fetch_generation,
                "Discarding stale fetch response"
            );
            false
        }
    }

    // ── Projection ───────────────────────────────────────

    fn filtered(&self) -> Vec<&T> {
        let needle = self.filter_text.trim().to_lowercase();
        let mut rows: Vec<&T> = self
            .rows
            .iter()
            .filter(|row| {
                needle.is_empty()
                    || row
                        .search_fields()
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect();

        if let Some((key, direction)) = &self.sort {
            // Stable sort: equal keys keep their source order.
            rows.sort_by(|a, b| {
                let ordering = a.sort_field(key).cmp(&b.sort_field(key));
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        rows
    }

    /// Number of rows matching the current filter, across all pages. The
    /// caller uses this to detect an out-of-range page.
    pub fn total_count(&self) -> usize {
        self.filtered().len()
    }

    /// Number of pages under the current filter.
    pub fn page_count(&self) -> usize {
        self.total_count().div_ceil(self.page_size)
    }

    /// The visible slice: filter, then stable sort, then page window.
    /// An out-of-range page yields an empty sequence, never an error.
    pub fn visible_rows(&self) -> Vec<&T> {
        let filtered = self.filtered();
        filtered
            .into_iter()
            .skip(self.page_index * self.page_size)
            .take(self.page_size)
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
