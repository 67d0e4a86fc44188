/// Terminal front end for the rotating wireframe
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self},
};
use std::io::{self, stdout, Stdout, Write};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use wiretorus_core::{FrameDriver, Mesh, RenderConfig, RenderResult, Scheduler, StopHandle};

pub mod renderer;

pub use renderer::CellCanvas;

/// Paces frames with `event::poll`, stopping the loop on q, Esc or Ctrl-C
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalScheduler;

impl Scheduler for TerminalScheduler {
    fn wait(&mut self, delay: Duration, stop: &StopHandle) -> RenderResult<()> {
        let deadline = Instant::now() + delay;

        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            if event::poll(deadline - now)? && is_quit(&event::read()?) {
                stop.stop();
                return Ok(());
            }
        }
    }
}

fn is_quit(event: &Event) -> bool {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Char('q') | KeyCode::Esc => true,
            KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        },
        _ => false,
    }
}

/// Main application struct for terminal wireframe rendering
pub struct TerminalApp {
    driver: FrameDriver<CellCanvas<Stdout>>,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, config: RenderConfig) -> RenderResult<Self> {
        let (width, height) = terminal::size()?;
        let canvas = CellCanvas::new(width as usize, height as usize, stdout());

        Ok(Self {
            driver: FrameDriver::new(mesh, config, canvas)?,
        })
    }

    /// Handle that ends the animation from outside the loop
    pub fn stop_handle(&self) -> StopHandle {
        self.driver.stop_handle()
    }

    /// Run until quit, returning the number of frames drawn
    ///
    /// The terminal is restored on every exit path, including setup failures.
    pub fn run(&mut self) -> RenderResult<u64> {
        let mut guard = TerminalGuard::new(stdout());
        guard.enable_raw_mode()?;
        guard.enter_screen()?;

        let result = self.driver.run(&mut TerminalScheduler);
        drop(guard);

        info!(frames = self.driver.frame_count(), "Terminal session ended");
        result
    }
}

/// Undoes whatever terminal setup succeeded when dropped
struct TerminalGuard<W: Write> {
    writer: W,
    raw_mode: bool,
    alternate_screen: bool,
}

impl<W: Write> TerminalGuard<W> {
    fn new(writer: W) -> Self {
        Self {
            writer,
            raw_mode: false,
            alternate_screen: false,
        }
    }

    fn enable_raw_mode(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.raw_mode = true;
        Ok(())
    }

    fn enter_screen(&mut self) -> io::Result<()> {
        // Mark first: a partial write may already have switched screens.
        self.alternate_screen = true;
        execute!(self.writer, terminal::EnterAlternateScreen, cursor::Hide)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.alternate_screen {
            if let Err(err) = execute!(self.writer, terminal::LeaveAlternateScreen, cursor::Show) {
                warn!(error = %err, "Failed to leave alternate screen");
            }
        }
        if self.raw_mode {
            if let Err(err) = terminal::disable_raw_mode() {
                warn!(error = %err, "Failed to disable raw mode");
            }
        }
    }
}
