pub mod app;
pub mod collapse_store;
pub mod components;
pub mod grid_layout;
pub mod terminal_guard;

pub use app::App;
pub use collapse_store::{CollapseStore, ToggleCollapsed};
pub use grid_layout::{
    compute_layout, compute_metrics, GridItem, GridLayout, GridLayoutConfig, GridLayoutTracker,
    GridMetrics,
};
pub use terminal_guard::{install_panic_hook, TerminalGuard};
