use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use crate::agent::{demo_agent, AgentBranch, ScriptedRun};
use crate::config::Config;
use crate::ui::collapse_store::{CollapseStore, ToggleCollapsed};
use crate::ui::components::{
    AgentBlockGrid, AgentBlockGridState, BranchItem, BranchItemHit, GridHit,
};
use crate::ui::grid_layout::GridLayoutTracker;
use crate::ui::terminal_guard::TerminalGuard;

/// Frames between simulated output chunks (6 x 16ms, about 100ms)
const FRAMES_PER_STEP: u32 = 6;

/// Interactive grid of simulated agent branches
pub struct App {
    /// Application configuration
    config: Config,
    /// Agents in display order
    agents: Vec<AgentBranch>,
    /// Scripted output still to stream, by agent id
    runs: HashMap<String, ScriptedRun>,
    /// Collapse state, the only place it changes
    collapse: CollapseStore,
    /// Hover flags for the grid's items
    grid_state: AgentBlockGridState,
    tracker: GridLayoutTracker,
    /// Where the grid was last drawn, for mouse hit-testing
    grid_area: Rect,
    /// How many demo agents have been spawned so far
    spawned: usize,
    should_quit: bool,
    /// Frame counter driving the simulated streams
    tick_count: u32,
}

impl App {
    pub fn new(config: Config, initial_agents: usize) -> Self {
        let collapse = CollapseStore::new(config.branch.default_collapsed);
        let mut app = Self {
            config,
            agents: Vec::new(),
            runs: HashMap::new(),
            collapse,
            grid_state: AgentBlockGridState::new(),
            tracker: GridLayoutTracker::new(),
            grid_area: Rect::default(),
            spawned: 0,
            should_quit: false,
            tick_count: 0,
        };

        for _ in 0..initial_agents {
            app.spawn_agent();
        }

        app
    }

    pub fn agents(&self) -> &[AgentBranch] {
        &self.agents
    }

    pub fn collapse_store(&self) -> &CollapseStore {
        &self.collapse
    }

    pub fn grid_state(&self) -> &AgentBlockGridState {
        &self.grid_state
    }

    pub fn grid_area(&self) -> Rect {
        self.grid_area
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut guard = TerminalGuard::enter()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal).await;

        guard.restore()?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            tokio::time::sleep(Duration::from_millis(16)).await;
            if event::poll(Duration::from_millis(0))? {
                match event::read()? {
                    Event::Key(key) => self.handle_key_event(key),
                    Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                    _ => {}
                }
            }

            self.tick_count = self.tick_count.wrapping_add(1);
            if self.tick_count % FRAMES_PER_STEP == 0 {
                self.step_agents();
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Advance every streaming agent by one scripted chunk
    pub fn step_agents(&mut self) {
        for agent in &mut self.agents {
            if let Some(run) = self.runs.get_mut(&agent.id) {
                run.advance(agent);
            }
        }
        self.runs.retain(|_, run| !run.is_done());
    }

    /// Add the next demo agent at the end of the grid
    pub fn spawn_agent(&mut self) {
        let (agent, run) = demo_agent(self.spawned);
        self.spawned += 1;
        tracing::debug!(id = %agent.id, name = %agent.name, "Spawned agent");
        self.runs.insert(agent.id.clone(), run);
        self.agents.push(agent);
    }

    /// Remove an agent and forget its per-item state
    pub fn close_agent(&mut self, id: &str) {
        let before = self.agents.len();
        self.agents.retain(|agent| agent.id != id);
        if self.agents.len() == before {
            return;
        }
        self.runs.remove(id);

        let keys: Vec<&str> = self.agents.iter().map(|agent| agent.id.as_str()).collect();
        self.collapse.retain(keys.iter().copied());
        self.grid_state.retain(keys.iter().copied());
        tracing::debug!(id, remaining = self.agents.len(), "Closed agent");
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('c') {
                self.should_quit = true;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') => self
                .collapse
                .collapse_all(self.agents.iter().map(|agent| agent.id.as_str())),
            KeyCode::Char('e') => self
                .collapse
                .expand_all(self.agents.iter().map(|agent| agent.id.as_str())),
            KeyCode::Char('n') => self.spawn_agent(),
            KeyCode::Char('x') => {
                if let Some(id) = self.agents.last().map(|agent| agent.id.clone()) {
                    self.close_agent(&id);
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(agent) = self.agents.get(index) {
                    toggle_item(&mut self.collapse, &agent.id);
                }
            }
            _ => {}
        }
    }

    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let hit = agent_grid(&self.agents, &self.collapse, &self.config).hit_test(
            self.grid_area,
            mouse.column,
            mouse.row,
        );

        match mouse.kind {
            MouseEventKind::Moved => {
                let hovered = hit
                    .as_ref()
                    .filter(|hit| hit.hit == BranchItemHit::Close)
                    .map(|hit| hit.key.as_str());
                self.grid_state.hover_close(hovered);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(hit) = hit {
                    self.activate(hit);
                }
            }
            _ => {}
        }
    }

    fn activate(&mut self, hit: GridHit) {
        if hit.hit == BranchItemHit::Close {
            self.close_agent(&hit.key);
        } else if hit.hit.toggles() {
            toggle_item(&mut self.collapse, &hit.key);
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());
        let theme = &self.config.theme;

        let title = Line::from(vec![
            Span::styled(
                "conduit-grid",
                Style::default()
                    .fg(theme.text_bright)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  n spawn  x close  c/e collapse/expand  1-9 toggle  q quit",
                Style::default().fg(theme.text_faint),
            ),
        ]);
        f.render_widget(Paragraph::new(title), chunks[0]);

        self.grid_area = chunks[1];
        let (metrics, _) =
            self.tracker
                .update(self.agents.len(), self.grid_area.width, &self.config.grid);

        let running = self
            .agents
            .iter()
            .filter(|agent| !agent.status.is_finished())
            .count();
        let status = Line::from(Span::styled(
            format!(
                "{} agents · {} running · {} columns × {}",
                self.agents.len(),
                running,
                metrics.columns,
                metrics.column_width
            ),
            Style::default().fg(theme.text_muted),
        ));
        f.render_widget(Paragraph::new(status), chunks[2]);

        let grid = agent_grid(&self.agents, &self.collapse, &self.config);
        f.render_stateful_widget(grid, self.grid_area, &mut self.grid_state);
    }
}

/// Flip one item through the collapse capability
fn toggle_item(toggler: &mut dyn ToggleCollapsed, key: &str) {
    toggler.toggle_collapsed(key);
}

fn agent_grid<'s>(
    agents: &'s [AgentBranch],
    collapse: &'s CollapseStore,
    config: &'s Config,
) -> AgentBlockGrid<'s, 's, AgentBranch, impl Fn(&AgentBranch, usize, u16) -> BranchItem<'s> + 's>
{
    AgentBlockGrid::new(agents, config.grid, move |agent: &AgentBranch, _, _| {
        agent
            .to_branch_item(&config.theme, collapse.is_collapsed(&agent.id))
            .max_collapsed_lines(config.branch.max_collapsed_lines)
    })
}
