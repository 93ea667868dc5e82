pub mod agent;
pub mod config;
pub mod ui;
pub mod util;

pub use agent::{AgentBranch, AgentStatus};
pub use config::{Config, ConfigError};
pub use ui::components::{
    AgentBlockGrid, AgentBlockGridState, BranchItem, ContentNode, ThemeTokens,
};
pub use ui::{
    compute_layout, compute_metrics, App, CollapseStore, GridItem, GridLayout, GridLayoutConfig,
    ToggleCollapsed,
};
