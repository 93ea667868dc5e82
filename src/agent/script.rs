//! Scripted agent runs that drive the demo grid.

use super::AgentBranch;

/// Canned name, prompt and output chunks for demo agents.
const SCRIPTS: &[(&str, &str, &[&str])] = &[
    (
        "file-explorer",
        "Map the modules involved in config loading",
        &[
            "Scanning src/ for config readers.",
            "\nFound settings.rs and paths.rs.",
            "\n\n$ rg \"Config::load\" src",
            "\nsrc/main.rs: 1 match",
            "\n\nConfig is loaded once at startup and merged over defaults.",
        ],
    ),
    (
        "test-runner",
        "Run the unit tests and summarize failures",
        &[
            "$ cargo test --lib",
            "\nrunning 48 tests",
            "\ntest result: ok. 48 passed; 0 failed",
            "\n\nAll tests pass.",
        ],
    ),
    (
        "reviewer",
        "Review the layout change for regressions",
        &[
            "Reading grid_layout.rs.",
            "\nColumn width never drops below the floor.",
            "\n\nOne nit: the tracker could log the width too.",
        ],
    ),
    (
        "docs-writer",
        "Draft a changelog entry for the grid",
        &[
            "Added: responsive agent grid.",
            "\nItems collapse to a three line preview.",
        ],
    ),
];

/// Feeds one branch its scripted output, one chunk per step.
#[derive(Debug, Clone)]
pub struct ScriptedRun {
    chunks: Vec<String>,
    next: usize,
    failure: Option<String>,
}

impl ScriptedRun {
    pub fn new(chunks: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            chunks: chunks.into_iter().map(Into::into).collect(),
            next: 0,
            failure: None,
        }
    }

    /// End the run with an error instead of completing it
    pub fn failing_with(mut self, error: impl Into<String>) -> Self {
        self.failure = Some(error.into());
        self
    }

    pub fn is_done(&self) -> bool {
        self.next > self.chunks.len()
    }

    /// Push the next chunk into `branch`. After the last chunk the branch is
    /// completed (or failed). Returns `false` once there is nothing left to do.
    pub fn advance(&mut self, branch: &mut AgentBranch) -> bool {
        if self.is_done() {
            return false;
        }

        match self.chunks.get(self.next) {
            Some(chunk) => branch.push_output(chunk),
            None => match &self.failure {
                Some(error) => branch.fail(error.clone()),
                None => branch.complete(),
            },
        }
        self.next += 1;
        true
    }
}

/// The `n`th demo agent (scripts repeat with a numeric suffix).
pub fn demo_agent(n: usize) -> (AgentBranch, ScriptedRun) {
    let (name, prompt, chunks) = SCRIPTS[n % SCRIPTS.len()];
    let round = n / SCRIPTS.len();
    let name = if round == 0 {
        name.to_string()
    } else {
        format!("{}-{}", name, round + 1)
    };

    let mut run = ScriptedRun::new(chunks.iter().copied());
    if n % 5 == 4 {
        run = run.failing_with("agent exited with status 1");
    }

    (AgentBranch::spawn(name, prompt), run)
}
