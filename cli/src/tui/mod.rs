pub mod app;
pub mod ui;

use std::io;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use gradebook_core::{GradeBookRepository, GradeBookService};

use crate::tui::app::{App, EditTarget, InputMode};

pub fn run<R: GradeBookRepository>(service: GradeBookService<R>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(service);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend, R: GradeBookRepository>(terminal: &mut Terminal<B>, app: &mut App<R>) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(std::time::Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Right | KeyCode::Char('l') => app.next_column(),
                KeyCode::Left | KeyCode::Char('h') => app.previous_column(),
                KeyCode::Tab | KeyCode::Char(']') => app.next_class(),
                KeyCode::BackTab | KeyCode::Char('[') => app.previous_class(),
                KeyCode::Enter | KeyCode::Char('e') => app.edit_cell(),
                KeyCode::Char('a') => app.add_row(),
                KeyCode::Char('d') | KeyCode::Delete => app.delete_row(),
                KeyCode::Char('g') => app.start_edit(EditTarget::FinalGoal),
                KeyCode::Char('r') => app.start_edit(EditTarget::ClassName),
                KeyCode::Char('n') => app.add_class(),
                KeyCode::Char('x') => app.remove_class(),
                KeyCode::Char('c') => app.clear_class(),
                KeyCode::Char('X') => app.request_clear_all(),
                KeyCode::Char(' ') => app.calculate(),
                _ => {}
            },
            InputMode::Editing(_) => match key.code {
                KeyCode::Enter => app.submit_input(),
                KeyCode::Esc => app.exit_input_mode(),
                KeyCode::Char(c) => app.input_char(c),
                KeyCode::Backspace => app.delete_char(),
                KeyCode::Left => app.move_cursor_left(),
                KeyCode::Right => app.move_cursor_right(),
                _ => {}
            },
            InputMode::ConfirmClearAll => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => app.resolve_clear_all(true),
                _ => app.resolve_clear_all(false),
            },
        }
    }
}
