mod render;

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use crate::db::Database;

use super::flow::{Control, FlowController, Input};
use super::picker::Picker;

use self::render::draw_tui;

/// Raw-mode alternate screen that is torn down on drop, including on error paths.
struct Screen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Screen {
    fn open() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err).context("failed to enter alternate screen");
        }
        let mut screen = Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout))
                .context("failed to initialize terminal backend")?,
        };
        screen.terminal.clear()?;
        Ok(screen)
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        if let Err(err) = disable_raw_mode() {
            warn!(error = %err, "failed to disable raw mode");
        }
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

pub(crate) fn run_tui(db: &Database, picker: Picker) -> Result<()> {
    let mut controller = FlowController::new(db, picker, rand::rng())
        .context("failed to load shows from database")?;

    let mut screen = Screen::open()?;
    info!("entered interactive mode");

    loop {
        screen.terminal.draw(|frame| draw_tui(frame, &controller))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(input) = input_for_key(key) else {
            continue;
        };
        if controller.handle(input) == Control::Quit {
            break;
        }
    }

    drop(screen);
    info!("left interactive mode");
    Ok(())
}

pub(super) fn input_for_key(key: KeyEvent) -> Option<Input> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Input::Interrupt);
    }
    match key.code {
        KeyCode::Up => Some(Input::Up),
        KeyCode::Down => Some(Input::Down),
        KeyCode::Enter => Some(Input::Enter),
        KeyCode::Backspace => Some(Input::Backspace),
        KeyCode::Char(c) => Some(Input::Char(c)),
        _ => None,
    }
}
