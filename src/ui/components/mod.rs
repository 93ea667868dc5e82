mod agent_block_grid;
mod branch_item;
mod content;
mod text_wrap;
pub mod theme;

pub use agent_block_grid::{
    AgentBlockGrid, AgentBlockGridState, GridHit, ItemPlacement, COLUMN_GUTTER, ITEM_GAP,
};
pub use branch_item::{
    truncate_preview, BranchItem, BranchItemHit, BranchItemUiState, BranchView,
    MAX_COLLAPSED_LINES,
};
pub use content::{ContentNode, ContentShape, Emphasis};
pub use text_wrap::{truncate_to_width, wrap_text};
pub use theme::{parse_hex_color, ThemeTokens};
