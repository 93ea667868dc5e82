//! Agent block grid - branch items arranged in responsive columns.
//!
//! The grid asks [`compute_layout`] for a fresh layout on every render and
//! every hit-test, then stacks one [`BranchItem`] per item down each column.
//! Items are produced by a caller-supplied closure so the grid stays generic
//! over what it is showing.

use std::collections::HashMap;

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::StatefulWidget,
};

use super::branch_item::{BranchItem, BranchItemHit, BranchItemUiState};
use crate::ui::grid_layout::{compute_layout, GridItem, GridLayout, GridLayoutConfig};

/// Blank rows between stacked items.
pub const ITEM_GAP: u16 = 1;

/// Blank columns to the right of each column when there is more than one.
pub const COLUMN_GUTTER: u16 = 1;

/// Where an item was drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPlacement {
    /// Index into the grid's item slice
    pub index: usize,
    pub key: String,
    /// Visible area, clipped to the grid
    pub area: Rect,
}

/// An item part under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridHit {
    pub index: usize,
    pub key: String,
    pub hit: BranchItemHit,
}

/// Per-item ephemeral UI state for a grid, keyed by item key.
#[derive(Debug, Default)]
pub struct AgentBlockGridState {
    items: HashMap<String, BranchItemUiState>,
}

impl AgentBlockGridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(&self, key: &str) -> BranchItemUiState {
        self.items.get(key).copied().unwrap_or_default()
    }

    /// Mark `key`'s close control as hovered and clear every other item.
    pub fn hover_close(&mut self, key: Option<&str>) {
        for (item_key, state) in self.items.iter_mut() {
            state.set_close_hovered(Some(item_key.as_str()) == key);
        }
        if let Some(key) = key {
            self.items
                .entry(key.to_string())
                .or_default()
                .set_close_hovered(true);
        }
    }

    /// Drop state for items no longer in the list.
    pub fn retain<'k>(&mut self, keys: impl IntoIterator<Item = &'k str>) {
        let keep: Vec<&str> = keys.into_iter().collect();
        self.items.retain(|key, _| keep.contains(&key.as_str()));
    }
}

/// Renders `items` as columns of branch items.
pub struct AgentBlockGrid<'a, 't, T, F>
where
    F: Fn(&T, usize, u16) -> BranchItem<'t>,
{
    items: &'a [T],
    config: GridLayoutConfig,
    render_item: F,
    _theme: std::marker::PhantomData<&'t ()>,
}

impl<'a, 't, T, F> AgentBlockGrid<'a, 't, T, F>
where
    T: GridItem,
    F: Fn(&T, usize, u16) -> BranchItem<'t>,
{
    /// `render_item` receives the item, its index in `items`, and the width
    /// the item will be drawn at.
    pub fn new(items: &'a [T], config: GridLayoutConfig, render_item: F) -> Self {
        Self {
            items,
            config,
            render_item,
            _theme: std::marker::PhantomData,
        }
    }

    /// Layout for the given width.
    pub fn layout(&self, width: u16) -> GridLayout<'a, T> {
        compute_layout(self.items, width, &self.config)
    }

    /// Where every visible item lands inside `area`.
    pub fn placements(&self, area: Rect) -> Vec<ItemPlacement> {
        self.arrange(area)
            .into_iter()
            .map(|(placement, _)| placement)
            .collect()
    }

    /// Which item part, if any, is at `(column, row)`.
    pub fn hit_test(&self, area: Rect, column: u16, row: u16) -> Option<GridHit> {
        self.arrange(area)
            .into_iter()
            .find(|(placement, _)| placement.area.contains(Position::new(column, row)))
            .and_then(|(placement, item)| {
                item.hit_test(placement.area, column, row)
                    .map(|hit| GridHit {
                        index: placement.index,
                        key: placement.key,
                        hit,
                    })
            })
    }

    fn arrange(&self, area: Rect) -> Vec<(ItemPlacement, BranchItem<'t>)> {
        if self.items.is_empty() || area.width == 0 || area.height == 0 {
            return Vec::new();
        }

        let layout = self.layout(area.width);
        let item_width = if layout.columns > 1 {
            layout.column_width.saturating_sub(COLUMN_GUTTER).max(1)
        } else {
            layout.column_width
        };
        let compact = layout.is_compact();

        let mut arranged = Vec::with_capacity(self.items.len());
        for (column, group) in layout.column_groups.iter().enumerate() {
            let offset = u16::try_from(column)
                .unwrap_or(u16::MAX)
                .saturating_mul(layout.column_width);
            let x = area.x.saturating_add(offset);
            if x >= area.right() {
                break;
            }
            let width = item_width.min(area.right() - x);

            let mut y = area.y;
            for (row, item) in group.iter().enumerate() {
                if y >= area.bottom() {
                    break;
                }
                let index = layout.original_index(column, row);
                let branch = (self.render_item)(item, index, width).compact(compact);
                let height = branch.height(width);
                let visible = height.min(area.bottom() - y);

                arranged.push((
                    ItemPlacement {
                        index,
                        key: item.key().to_string(),
                        area: Rect::new(x, y, width, visible),
                    },
                    branch,
                ));

                y = y.saturating_add(height).saturating_add(ITEM_GAP);
            }
        }

        arranged
    }
}

impl<'a, 't, T, F> StatefulWidget for AgentBlockGrid<'a, 't, T, F>
where
    T: GridItem,
    F: Fn(&T, usize, u16) -> BranchItem<'t>,
{
    type State = AgentBlockGridState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        for (placement, branch) in self.arrange(area) {
            let mut item_state = state.item(&placement.key);
            StatefulWidget::render(branch, placement.area, buf, &mut item_state);
        }
    }
}
