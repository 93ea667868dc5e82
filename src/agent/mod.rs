mod branch;
pub mod script;

pub use branch::{AgentBranch, AgentStatus};
pub use script::{demo_agent, ScriptedRun};
