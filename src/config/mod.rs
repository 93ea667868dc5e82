mod settings;

pub use settings::{BranchConfig, Config, ConfigError, EXAMPLE_CONFIG};
