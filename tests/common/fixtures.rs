//! Deterministic items for grid tests

use conduit_grid::{AgentBranch, GridItem};

/// Minimal grid item: a key and nothing else
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl GridItem for Key {
    fn key(&self) -> &str {
        &self.0
    }
}

/// `n` keys named `item-0` .. `item-{n-1}`
pub fn keys(n: usize) -> Vec<Key> {
    (0..n).map(|i| Key(format!("item-{}", i))).collect()
}

/// Agent with a fixed id and some streamed output
pub fn agent(id: &str, output: &str) -> AgentBranch {
    let mut branch = AgentBranch::new(id, id, format!("prompt for {}", id));
    if !output.is_empty() {
        branch.push_output(output);
    }
    branch
}

/// `n` agents named `agent-0` .. with a two-line preview each
pub fn agents(n: usize) -> Vec<AgentBranch> {
    (0..n)
        .map(|i| agent(&format!("agent-{}", i), &format!("step one\nstep two of {}", i)))
        .collect()
}
