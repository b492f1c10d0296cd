pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if app.input_mode == app::InputMode::Help {
        // Any key exits help
        app.dismiss_help();
        return;
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('l') => {
            app.toggle_language();
            return;
        }
        KeyCode::Char('?') => {
            app.show_help();
            return;
        }
        _ => {}
    }

    match app.screen {
        app::Screen::Picker => match key.code {
            KeyCode::Char('j') | KeyCode::Down => app.next_item(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_item(),
            KeyCode::Enter => app.start_selected(),
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                let idx = c as usize - '1' as usize;
                if idx < app.quizzes.len() {
                    app.picker_state.select(Some(idx));
                    app.start_selected();
                }
            }
            _ => {}
        },
        app::Screen::Question => match key.code {
            KeyCode::Char('j') | KeyCode::Down => app.next_item(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_item(),
            KeyCode::Enter => app.confirm_selected_option(),
            // Number keys answer directly (1-based)
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                app.choose_option(c as usize - '1' as usize);
            }
            KeyCode::Char('b') | KeyCode::Backspace | KeyCode::Left => app.go_back(),
            KeyCode::Char('r') => app.restart(),
            KeyCode::Esc => app.back_to_picker(),
            _ => {}
        },
        app::Screen::Result => match key.code {
            KeyCode::Char('o') | KeyCode::Enter => app.open_follow_up(),
            KeyCode::Char('r') => app.restart(),
            KeyCode::Esc => app.back_to_picker(),
            _ => {}
        },
    }
}
