//! Column layout for the agent grid.
//!
//! Given an item list and the available terminal width, decides how many
//! columns to use, how wide each column is, and which column every item lands
//! in. Everything here is a pure function of its inputs: the grid is
//! recomputed from scratch on every resize or item-count change.

/// Narrowest a column may become before the grid drops a column.
pub const MIN_COLUMN_WIDTH: u16 = 28;

/// Width at which an item can show its full header.
pub const PREFERRED_COLUMN_WIDTH: u16 = 40;

/// Upper bound on columns regardless of terminal width.
pub const MAX_COLUMNS: usize = 4;

/// Something the grid can lay out. The key must be stable and unique.
pub trait GridItem {
    fn key(&self) -> &str;
}

/// Tunables for [`compute_layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayoutConfig {
    /// Floor below which a column never shrinks
    pub min_column_width: u16,
    /// Column width at which items render their full header
    pub preferred_column_width: u16,
    /// Hard cap on the number of columns
    pub max_columns: usize,
}

impl Default for GridLayoutConfig {
    fn default() -> Self {
        Self {
            min_column_width: MIN_COLUMN_WIDTH,
            preferred_column_width: PREFERRED_COLUMN_WIDTH,
            max_columns: MAX_COLUMNS,
        }
    }
}

impl GridLayoutConfig {
    pub fn new(min_column_width: u16, preferred_column_width: u16, max_columns: usize) -> Self {
        Self {
            min_column_width,
            preferred_column_width,
            max_columns,
        }
    }

    /// Zero is not a usable floor; treat it as one cell.
    fn column_floor(&self) -> u16 {
        self.min_column_width.max(1)
    }

    fn column_cap(&self) -> usize {
        self.max_columns.max(1)
    }
}

/// Column count and width, independent of the items themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridMetrics {
    pub columns: usize,
    pub column_width: u16,
}

/// Compute how many columns fit and how wide each one is.
///
/// A zero width (a transient frame during resize) is treated as the column
/// floor. When fewer than two floors fit, the grid is one column at
/// `max(width, floor)`; the result may overflow `available_width`, which is
/// left to the renderer to clip.
pub fn compute_metrics(
    item_count: usize,
    available_width: u16,
    config: &GridLayoutConfig,
) -> GridMetrics {
    let floor = config.column_floor();
    let width = if available_width == 0 {
        floor
    } else {
        available_width
    };

    let width_limited = usize::from(width / floor);
    let columns = item_count
        .min(width_limited)
        .min(config.column_cap())
        .max(1);

    // columns <= width / floor <= u16::MAX, so the cast is lossless
    let column_width = (width / columns as u16).max(floor);

    GridMetrics {
        columns,
        column_width,
    }
}

/// Result of laying out a slice of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout<'a, T> {
    pub columns: usize,
    pub column_width: u16,
    /// One group per column, in column order. Items are assigned round-robin,
    /// so `items[i]` lives in `column_groups[i % columns]`.
    pub column_groups: Vec<Vec<&'a T>>,
    preferred_column_width: u16,
}

impl<'a, T> GridLayout<'a, T> {
    /// Index into the original item slice for the item at `(column, row)`.
    pub fn original_index(&self, column: usize, row: usize) -> usize {
        row * self.columns + column
    }

    /// Total number of items across all groups.
    pub fn item_count(&self) -> usize {
        self.column_groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Columns are narrower than the preferred width; items should shorten
    /// their headers.
    pub fn is_compact(&self) -> bool {
        self.column_width < self.preferred_column_width
    }
}

/// Lay out `items` into columns for the given width.
///
/// Empty input yields a single empty group so callers can render (or skip) a
/// wrapper without special-casing a missing layout.
pub fn compute_layout<'a, T>(
    items: &'a [T],
    available_width: u16,
    config: &GridLayoutConfig,
) -> GridLayout<'a, T> {
    let metrics = compute_metrics(items.len(), available_width, config);

    let mut column_groups: Vec<Vec<&'a T>> = (0..metrics.columns)
        .map(|_| Vec::with_capacity(items.len().div_ceil(metrics.columns)))
        .collect();
    for (i, item) in items.iter().enumerate() {
        column_groups[i % metrics.columns].push(item);
    }

    GridLayout {
        columns: metrics.columns,
        column_width: metrics.column_width,
        column_groups,
        preferred_column_width: config.preferred_column_width,
    }
}

/// Tracks grid metrics across frames so column transitions can be logged.
///
/// Holds only the previous metrics; every call recomputes from its inputs, so
/// nothing about item assignment can go stale.
#[derive(Debug, Default)]
pub struct GridLayoutTracker {
    last: Option<GridMetrics>,
}

impl GridLayoutTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute metrics for this frame. Returns the new metrics and whether
    /// they differ from the previous frame's.
    pub fn update(
        &mut self,
        item_count: usize,
        available_width: u16,
        config: &GridLayoutConfig,
    ) -> (GridMetrics, bool) {
        let metrics = compute_metrics(item_count, available_width, config);
        let changed = self.last != Some(metrics);

        if changed {
            if let Some(previous) = self.last {
                if previous.columns != metrics.columns {
                    tracing::debug!(
                        from = previous.columns,
                        to = metrics.columns,
                        column_width = metrics.column_width,
                        available_width,
                        item_count,
                        "Grid column count changed"
                    );
                }
            }
            self.last = Some(metrics);
        }

        (metrics, changed)
    }

    pub fn last(&self) -> Option<GridMetrics> {
        self.last
    }
}
