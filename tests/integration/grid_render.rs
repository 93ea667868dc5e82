//! Rendering the agent grid through a TestBackend

use conduit_grid::ui::components::AgentBlockGridState;
use conduit_grid::{
    AgentBlockGrid, AgentBranch, BranchItem, CollapseStore, ContentNode, GridLayoutConfig,
    ThemeTokens,
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use super::common::fixtures::{agent, agents};
use super::common::terminal::{
    buffer_contains, buffer_region_to_string, buffer_rows, char_at, create_test_terminal_sized,
    row_text,
};

fn render_grid(
    items: &[AgentBranch],
    store: &CollapseStore,
    state: &mut AgentBlockGridState,
    config: GridLayoutConfig,
    width: u16,
    height: u16,
) -> Buffer {
    let theme = ThemeTokens::default_dark();
    let mut terminal = create_test_terminal_sized(width, height);
    terminal
        .draw(|f| {
            let grid = AgentBlockGrid::new(items, config, |item: &AgentBranch, _, _| {
                item.to_branch_item(&theme, store.is_collapsed(&item.id))
            });
            f.render_stateful_widget(grid, f.area(), state);
        })
        .expect("draw");
    terminal.backend().buffer().clone()
}

#[test]
fn test_two_columns_round_robin() {
    let items = agents(4);
    let store = CollapseStore::new(true);
    let buffer = render_grid(
        &items,
        &store,
        &mut AgentBlockGridState::new(),
        GridLayoutConfig::default(),
        80,
        12,
    );

    // 80 / 28 = 2 columns of 40; the close glyph sits at the end of each item
    assert!(row_text(&buffer, 0).starts_with("▸ agent-0 ● running"));
    assert_eq!(char_at(&buffer, 38, 0), Some("✕"));
    assert_eq!(char_at(&buffer, 40, 0), Some("▸"));
    assert_eq!(char_at(&buffer, 78, 0), Some("✕"));

    let rows = buffer_rows(&buffer);
    assert!(rows[1].starts_with("│ step one"));
    assert!(rows[2].starts_with("│ step two of 0"));
    assert!(rows[3].is_empty());
    assert!(rows[4].starts_with("▸ agent-2"));
    assert!(buffer_region_to_string(&buffer, Rect::new(40, 4, 40, 1)).starts_with("▸ agent-3"));
}

#[test]
fn test_expanded_item_pushes_its_column_down() {
    let items = agents(4);
    let mut store = CollapseStore::new(true);
    store.set_collapsed("agent-1", false);
    let buffer = render_grid(
        &items,
        &store,
        &mut AgentBlockGridState::new(),
        GridLayoutConfig::default(),
        80,
        12,
    );

    let right = |y: u16| {
        buffer_region_to_string(&buffer, Rect::new(40, y, 40, 1))
            .trim_end()
            .to_string()
    };
    assert!(right(0).starts_with("▾ agent-1"));
    assert_eq!(right(1), "│ > prompt for agent-1");
    assert_eq!(right(2), "│ step one");
    assert_eq!(right(3), "│ step two of 1");
    assert_eq!(right(4), "└ ▴ collapse");
    assert!(right(6).starts_with("▸ agent-3"));

    // The left column is untouched
    assert!(row_text(&buffer, 4).starts_with("▸ agent-2"));
}

#[test]
fn test_narrow_terminal_is_one_column_and_clips() {
    let items = agents(3);
    let store = CollapseStore::new(true);
    let buffer = render_grid(
        &items,
        &store,
        &mut AgentBlockGridState::new(),
        GridLayoutConfig::default(),
        30,
        6,
    );

    let rows = buffer_rows(&buffer);
    assert!(rows[0].starts_with("▸ agent-0"));
    assert!(rows[4].starts_with("▸ agent-1"));
    assert!(rows[5].starts_with("│ step one"));
    assert!(!buffer_contains(&buffer, "agent-2"));
}

#[test]
fn test_compact_columns_drop_status_label() {
    let items = agents(2);
    let store = CollapseStore::new(true);
    let buffer = render_grid(
        &items,
        &store,
        &mut AgentBlockGridState::new(),
        GridLayoutConfig::default(),
        60,
        4,
    );

    // Two columns of 30, narrower than the preferred 40
    let header = row_text(&buffer, 0);
    assert!(header.starts_with("▸ agent-0 ●"));
    assert!(!header.contains("running"));
    assert_eq!(char_at(&buffer, 28, 0), Some("✕"));
}

#[test]
fn test_hovered_close_is_highlighted() {
    let theme = ThemeTokens::default_dark();
    let items = agents(2);
    let store = CollapseStore::new(true);
    let mut state = AgentBlockGridState::new();
    state.hover_close(Some("agent-0"));

    let buffer = render_grid(&items, &store, &mut state, GridLayoutConfig::default(), 80, 4);
    assert_eq!(buffer[(38, 0)].fg, theme.accent_error);
    assert_eq!(buffer[(78, 0)].fg, theme.text_muted);
}

#[test]
fn test_empty_grid_draws_nothing() {
    let items: Vec<AgentBranch> = Vec::new();
    let store = CollapseStore::new(true);
    let buffer = render_grid(
        &items,
        &store,
        &mut AgentBlockGridState::new(),
        GridLayoutConfig::default(),
        40,
        4,
    );
    assert!(buffer_rows(&buffer).iter().all(String::is_empty));
}

#[test]
fn test_long_preview_is_cut_to_three_lines() {
    let items = vec![agent("long", "l1\nl2\nl3\nl4\nl5")];
    let store = CollapseStore::new(true);
    let buffer = render_grid(
        &items,
        &store,
        &mut AgentBlockGridState::new(),
        GridLayoutConfig::default(),
        40,
        6,
    );

    let rows = buffer_rows(&buffer);
    assert_eq!(rows[1], "│ l1");
    assert_eq!(rows[2], "│ l2");
    assert_eq!(rows[3], "│ l3...");
    assert!(rows[4].is_empty());
}

#[test]
fn test_rendering_is_a_function_of_props() {
    let items = agents(3);
    let mut store = CollapseStore::new(true);
    store.set_collapsed("agent-2", false);

    let first = render_grid(
        &items,
        &store,
        &mut AgentBlockGridState::new(),
        GridLayoutConfig::default(),
        80,
        16,
    );
    let second = render_grid(
        &items,
        &store,
        &mut AgentBlockGridState::new(),
        GridLayoutConfig::default(),
        80,
        16,
    );

    assert_eq!(first, second);
    assert!(store.is_collapsed("agent-0"));
    assert!(!store.is_collapsed("agent-2"));
}

#[test]
fn test_block_content_stacks_children() {
    let theme = ThemeTokens::default_dark();
    let item = BranchItem::new("b", "blocks", &theme)
        .collapsed(false)
        .expanded_content(ContentNode::block([
            ContentNode::text("first paragraph"),
            ContentNode::inline([ContentNode::text("second "), ContentNode::bold("bold")]),
        ]));

    let area = Rect::new(0, 0, 30, 4);
    let mut buffer = Buffer::empty(area);
    item.render(area, &mut buffer);

    let rows = buffer_rows(&buffer);
    assert_eq!(rows[0], "▾ blocks");
    assert_eq!(rows[1], "│ first paragraph");
    assert_eq!(rows[2], "│ second bold");
    assert!(rows[3].is_empty());
}
