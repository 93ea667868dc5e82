//! A spawned agent as shown in the grid.

use ratatui::style::Color;
use uuid::Uuid;

use crate::ui::components::{BranchItem, ContentNode, ThemeTokens};
use crate::ui::GridItem;

/// Lifecycle of a spawned agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl AgentStatus {
    pub fn label(self) -> &'static str {
        match self {
            AgentStatus::Pending => "pending",
            AgentStatus::Running => "running",
            AgentStatus::Completed => "done",
            AgentStatus::Failed => "failed",
        }
    }

    pub fn color(self, theme: &ThemeTokens) -> Color {
        match self {
            AgentStatus::Pending => theme.text_muted,
            AgentStatus::Running => theme.accent_warning,
            AgentStatus::Completed => theme.accent_success,
            AgentStatus::Failed => theme.accent_error,
        }
    }

    pub fn is_finished(self) -> bool {
        matches!(self, AgentStatus::Completed | AgentStatus::Failed)
    }
}

/// One agent branch: its prompt and everything it has written so far
#[derive(Debug, Clone)]
pub struct AgentBranch {
    pub id: String,
    pub name: String,
    pub prompt: String,
    pub status: AgentStatus,
    pub output: String,
    pub is_streaming: bool,
    pub error: Option<String>,
}

impl AgentBranch {
    pub fn new(id: impl Into<String>, name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            prompt: prompt.into(),
            status: AgentStatus::Pending,
            output: String::new(),
            is_streaming: false,
            error: None,
        }
    }

    /// Create a branch with a fresh random id
    pub fn spawn(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().to_string(), name, prompt)
    }

    /// Append streamed output; marks the branch running
    pub fn push_output(&mut self, chunk: &str) {
        if self.status.is_finished() {
            tracing::debug!(id = %self.id, "Ignoring output for finished agent");
            return;
        }
        self.status = AgentStatus::Running;
        self.is_streaming = true;
        self.output.push_str(chunk);
    }

    pub fn complete(&mut self) {
        self.status = AgentStatus::Completed;
        self.is_streaming = false;
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = AgentStatus::Failed;
        self.is_streaming = false;
        self.error = Some(error.into());
    }

    /// Text shown while collapsed
    pub fn preview(&self) -> String {
        match &self.error {
            Some(error) => format!("Error: {}", error),
            None => self.output.trim_start().to_string(),
        }
    }

    /// Output split into paragraphs. Lines starting with `$ ` are shown as
    /// commands; a single paragraph stays inline.
    pub fn expanded_content(&self) -> ContentNode {
        let mut blocks: Vec<ContentNode> = self
            .output
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(paragraph_node)
            .collect();

        if let Some(error) = &self.error {
            blocks.push(ContentNode::bold(format!("Error: {}", error)));
        }

        match blocks.len() {
            0 => ContentNode::Empty,
            1 => blocks.remove(0),
            _ => ContentNode::Block(blocks),
        }
    }

    /// Build the grid item for this branch
    pub fn to_branch_item<'t>(&self, theme: &'t ThemeTokens, collapsed: bool) -> BranchItem<'t> {
        BranchItem::new(self.id.clone(), self.name.clone(), theme)
            .prompt(self.prompt.clone())
            .preview(self.preview())
            .expanded_content(self.expanded_content())
            .status(self.status.label(), self.status.color(theme))
            .streaming(self.is_streaming)
            .collapsed(collapsed)
            .toggleable(true)
            .closable(true)
    }
}

fn paragraph_node(paragraph: &str) -> ContentNode {
    let mut parts = Vec::new();
    for (i, line) in paragraph.lines().enumerate() {
        if i > 0 {
            parts.push(ContentNode::text("\n"));
        }
        match line.strip_prefix("$ ") {
            Some(command) => parts.push(ContentNode::code(format!("$ {}", command))),
            None => parts.push(ContentNode::text(line)),
        }
    }

    if parts.len() == 1 {
        parts.remove(0)
    } else {
        ContentNode::Inline(parts)
    }
}

impl GridItem for AgentBranch {
    fn key(&self) -> &str {
        &self.id
    }
}
