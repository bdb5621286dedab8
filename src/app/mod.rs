mod canvas;
mod renderer;

use std::{
    io::{Stdout, Write},
    time::Duration,
};

use crossterm::{
    cursor,
    event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    terminal::{self, ClearType},
};

pub use canvas::{Canvas, Glyph};
pub use renderer::Renderer;

use crate::{config, error::Result, generators::Generator, maze::Maze, solvers::Solver};

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// Switch to a generation algorithm
    SelectGenerator(Generator),
    /// Start a solver on the carved maze
    Solve(Solver),
    /// Pause or resume the animation
    TogglePause,
    /// Restart generation from scratch
    Restart,
    /// Shorten the delay between frames
    SpeedUp,
    /// Lengthen the delay between frames
    SlowDown,
    /// Grow the cells and rebuild the maze
    GrowCells,
    /// Shrink the cells and rebuild the maze
    ShrinkCells,
    /// Leave the app
    Quit,
}

/// Map a key press to an action. Returns `None` for keys without a binding.
pub fn action_for(key: KeyEvent) -> Option<UserAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(UserAction::Quit);
    }
    let action = match key.code {
        KeyCode::Char('1') => UserAction::SelectGenerator(Generator::Prim),
        KeyCode::Char('2') => UserAction::SelectGenerator(Generator::Kruskal),
        KeyCode::Char('3') => UserAction::SelectGenerator(Generator::Boruvka),
        KeyCode::Char('4') => UserAction::SelectGenerator(Generator::PrimMaze),
        KeyCode::Char('b') => UserAction::Solve(Solver::Bfs),
        KeyCode::Char('d') => UserAction::Solve(Solver::Dfs),
        KeyCode::Char('a') => UserAction::Solve(Solver::AStar),
        KeyCode::Char(' ') | KeyCode::Enter => UserAction::TogglePause,
        KeyCode::Char('r') => UserAction::Restart,
        KeyCode::Up => UserAction::SpeedUp,
        KeyCode::Down => UserAction::SlowDown,
        KeyCode::Char('+') | KeyCode::Char('=') => UserAction::GrowCells,
        KeyCode::Char('-') => UserAction::ShrinkCells,
        KeyCode::Esc | KeyCode::Char('q') => UserAction::Quit,
        _ => return None,
    };
    Some(action)
}

/// Mutable state of the interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub paused: bool,
    /// Delay between two animation frames
    pub delay: Duration,
    pub quit: bool,
    /// Last message for the user, such as why a solver could not start
    pub message: Option<String>,
}

impl AppState {
    pub fn new(delay: Duration) -> Self {
        Self {
            paused: false,
            delay: delay.min(App::MAX_DELAY),
            quit: false,
            message: None,
        }
    }
}

/// Phase shown in the status line.
fn phase(maze: &Maze) -> &'static str {
    match maze.solver() {
        Some(_) if maze.is_solve_finished() => "solved",
        Some(_) => "solving",
        None if maze.is_generation_finished() => "created",
        None => "creating",
    }
}

pub struct App {
    state: AppState,
}

impl App {
    /// Longest delay between frames
    pub const MAX_DELAY: Duration = Duration::from_millis(100);
    /// Change of the delay per key press
    const DELAY_STEP: Duration = Duration::from_millis(10);
    /// Smallest cell size, in layout units
    pub const MIN_CELL_SIZE: u16 = config::MIN_CELL_SIZE;
    /// Largest cell size, in layout units
    pub const MAX_CELL_SIZE: u16 = config::MAX_CELL_SIZE;

    pub fn new(delay: Duration) -> Self {
        Self {
            state: AppState::new(delay),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns the largest layout, in units, that fits a terminal of the given size.
    pub fn fit_layout((term_width, term_height): (u16, u16)) -> (u16, u16) {
        let width = (term_width / canvas::Glyph::WIDTH).saturating_sub(1);
        let height = term_height.saturating_sub(Renderer::<Stdout>::NUM_STATUS_ROWS + 1);
        (width, height)
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Advance whichever engine is active by one step, unless paused or done.
    pub fn tick(&self, maze: &mut Maze) {
        if self.state.paused {
            return;
        }
        if maze.solver().is_some() {
            if !maze.is_solve_finished() {
                maze.step_solve();
            }
        } else if !maze.is_generation_finished() {
            maze.step_generation();
        }
    }

    /// Apply a user action to the session and the maze.
    /// Returns whether the maze was rebuilt with a different layout.
    pub fn apply(&mut self, action: UserAction, maze: &mut Maze) -> bool {
        tracing::debug!("[app loop] applying {:?}", action);
        self.state.message = None;
        match action {
            UserAction::SelectGenerator(generator) => {
                maze.select_generator(generator);
                self.state.paused = false;
            }
            UserAction::Solve(kind) => {
                let (start, target) = maze.default_endpoints();
                match maze.bind_solver(kind, start, target) {
                    Ok(()) => self.state.paused = false,
                    Err(e) => {
                        tracing::warn!("[app loop] cannot start {}: {}", kind, e);
                        self.state.message = Some(e.to_string());
                    }
                }
            }
            UserAction::TogglePause => self.state.paused = !self.state.paused,
            UserAction::Restart => {
                maze.restart_generation();
                self.state.paused = false;
            }
            UserAction::SpeedUp => {
                self.state.delay = self.state.delay.saturating_sub(App::DELAY_STEP);
            }
            UserAction::SlowDown => {
                self.state.delay = (self.state.delay + App::DELAY_STEP).min(App::MAX_DELAY);
            }
            UserAction::GrowCells | UserAction::ShrinkCells => {
                let current = maze.config().cell_size;
                // Out-of-range sizes only move toward the range in the key's direction
                let cell_size = if action == UserAction::GrowCells {
                    current.saturating_add(1).max(App::MIN_CELL_SIZE)
                } else {
                    current.saturating_sub(1).min(App::MAX_CELL_SIZE)
                };
                if !(App::MIN_CELL_SIZE..=App::MAX_CELL_SIZE).contains(&cell_size) {
                    return false;
                }
                return match maze.rebuild(maze.config().with_cell_size(cell_size)) {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::warn!("[app loop] cannot use cell size {}: {}", cell_size, e);
                        self.state.message = Some(e.to_string());
                        false
                    }
                };
            }
            UserAction::Quit => self.state.quit = true,
        }
        false
    }

    /// Status lines shown under the maze.
    pub fn status_lines(&self, maze: &Maze) -> Vec<String> {
        let mut first = format!(
            "{} | {} | step {}",
            maze.generator(),
            phase(maze),
            maze.generation_steps()
        );
        if let Some(solver) = maze.solver() {
            first.push_str(&format!(" | {} step {}", solver, maze.solve_steps()));
        }
        first.push_str(&format!(
            " | delay {}ms | cell {}",
            self.state.delay.as_millis(),
            maze.config().cell_size
        ));
        if self.state.paused {
            first.push_str(" | PAUSED");
        }

        let second = match &self.state.message {
            Some(message) => message.clone(),
            None => "1-4: generator  b/d/a: BFS/DFS/A*  Space: pause  r: restart  ↑/↓: speed  +/-: cell size  Esc: exit".to_string(),
        };
        vec![first, second]
    }

    /// Main application loop: step, draw, then wait up to the frame delay for input.
    pub fn run(&mut self, stdout: &mut Stdout, maze: &mut Maze) -> Result<()> {
        tracing::info!("Started main app loop");
        let mut renderer = Renderer::new(stdout);
        let mut term_size = terminal::size()?;

        while !self.state.quit {
            self.tick(maze);
            renderer.draw(Canvas::from_maze(maze), &self.status_lines(maze), term_size)?;

            if !event::poll(self.state.delay)? {
                continue;
            }
            match event::read()? {
                event::Event::Key(key_event) => {
                    if let Some(action) = action_for(key_event) {
                        if self.apply(action, maze) {
                            renderer.invalidate();
                        }
                    }
                }
                event::Event::Resize(width, height) => {
                    tracing::debug!("[app loop] terminal resized to {}x{}", width, height);
                    term_size = (width, height);
                    renderer.invalidate();
                }
                _ => {}
            }
        }
        tracing::info!("Exiting main app loop");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MazeConfig;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn maze() -> Maze {
        let config = MazeConfig {
            width: 12,
            height: 8,
            cell_size: 2,
            max_cost: 20,
        };
        Maze::configure(config, Some(42)).expect("valid config")
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            action_for(press(KeyCode::Char('4'))),
            Some(UserAction::SelectGenerator(Generator::PrimMaze))
        );
        assert_eq!(
            action_for(press(KeyCode::Char('a'))),
            Some(UserAction::Solve(Solver::AStar))
        );
        assert_eq!(action_for(press(KeyCode::Enter)), Some(UserAction::TogglePause));
        assert_eq!(action_for(press(KeyCode::Char(' '))), Some(UserAction::TogglePause));
        assert_eq!(action_for(press(KeyCode::Up)), Some(UserAction::SpeedUp));
        assert_eq!(action_for(press(KeyCode::Char('-'))), Some(UserAction::ShrinkCells));
        assert_eq!(action_for(press(KeyCode::Esc)), Some(UserAction::Quit));
        assert_eq!(
            action_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(UserAction::Quit)
        );
        assert_eq!(action_for(press(KeyCode::Char('z'))), None);

        let mut release = press(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert_eq!(action_for(release), None);
    }

    #[test]
    fn test_delay_bounds() {
        let mut app = App::new(Duration::from_millis(95));
        let mut maze = maze();
        app.apply(UserAction::SlowDown, &mut maze);
        assert_eq!(app.state().delay, App::MAX_DELAY);
        for _ in 0..20 {
            app.apply(UserAction::SpeedUp, &mut maze);
        }
        assert_eq!(app.state().delay, Duration::ZERO);
        assert_eq!(AppState::new(Duration::from_secs(1)).delay, App::MAX_DELAY);
    }

    #[test]
    fn test_pause_stops_ticks() {
        let mut app = App::new(Duration::ZERO);
        let mut maze = maze();
        app.tick(&mut maze);
        assert_eq!(maze.generation_steps(), 1);
        app.apply(UserAction::TogglePause, &mut maze);
        app.tick(&mut maze);
        assert_eq!(maze.generation_steps(), 1);
        assert!(app.status_lines(&maze)[0].ends_with("PAUSED"));
        app.apply(UserAction::TogglePause, &mut maze);
        app.tick(&mut maze);
        assert_eq!(maze.generation_steps(), 2);
    }

    #[test]
    fn test_solve_before_maze_is_carved() {
        let mut app = App::new(Duration::ZERO);
        let mut maze = maze();
        app.apply(UserAction::Solve(Solver::Bfs), &mut maze);
        assert!(maze.solver().is_none());
        let message = app.state().message.clone().expect("error is shown");
        assert!(message.contains("Prim's Algorithm"));
        assert_eq!(app.status_lines(&maze)[1], message);
    }

    #[test]
    fn test_generate_then_solve() {
        let mut app = App::new(Duration::ZERO);
        let mut maze = maze();
        app.apply(UserAction::SelectGenerator(Generator::PrimMaze), &mut maze);
        while !maze.is_generation_finished() {
            app.tick(&mut maze);
        }
        assert!(app.status_lines(&maze)[0].contains("created"));

        app.apply(UserAction::Solve(Solver::Dfs), &mut maze);
        assert_eq!(maze.solver(), Some(Solver::Dfs));
        while !maze.is_solve_finished() {
            app.tick(&mut maze);
        }
        assert!(app.status_lines(&maze)[0].contains("solved"));

        app.apply(UserAction::Restart, &mut maze);
        assert!(maze.solver().is_none());
        assert!(app.status_lines(&maze)[0].contains("creating"));
    }

    #[test]
    fn test_cell_size_changes_rebuild() {
        let mut app = App::new(Duration::ZERO);
        let mut maze = maze();
        assert!(!app.apply(UserAction::ShrinkCells, &mut maze));
        assert!(app.apply(UserAction::GrowCells, &mut maze));
        assert_eq!(maze.config().cell_size, 3);
        assert_eq!(maze.graph().x_count(), 5);
    }

    #[test]
    fn test_cell_size_follows_key_direction() {
        let mut app = App::new(Duration::ZERO);
        let config = MazeConfig {
            width: 12,
            height: 8,
            cell_size: 1,
            max_cost: 20,
        };
        let mut maze = Maze::configure(config, Some(42)).expect("valid config");
        assert!(!app.apply(UserAction::ShrinkCells, &mut maze));
        assert_eq!(maze.config().cell_size, 1);
        assert!(app.apply(UserAction::GrowCells, &mut maze));
        assert_eq!(maze.config().cell_size, App::MIN_CELL_SIZE);

        let mut maze = Maze::configure(config.with_cell_size(App::MAX_CELL_SIZE), Some(42))
            .expect("valid config");
        assert!(!app.apply(UserAction::GrowCells, &mut maze));
        assert_eq!(maze.config().cell_size, App::MAX_CELL_SIZE);
    }

    #[test]
    fn test_fit_layout() {
        assert_eq!(App::fit_layout((80, 24)), (39, 21));
        assert_eq!(App::fit_layout((1, 1)), (0, 0));
    }

    #[test]
    fn test_quit() {
        let mut app = App::new(Duration::ZERO);
        app.apply(UserAction::Quit, &mut maze());
        assert!(app.state().quit);
    }
}
