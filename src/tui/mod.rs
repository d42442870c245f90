// TUI module - terminal lifecycle, event loop, and input dispatch
//
// The event loop is the only place app state mutates: it interleaves
// keyboard input, a periodic redraw tick, and completed network calls
// arriving on the AppEvent channel.

pub mod app;
pub mod components;
pub mod forms;
pub mod ui;

use crate::capture::CaptureState;
use crate::events::AppEvent;
use anyhow::{Context, Result};
use app::{App, AuthTab, Prompt, PromptKind, Screen, Tab};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;

/// Set up the terminal, run the event loop, restore the terminal
pub async fn run_tui(mut app: App, mut event_rx: mpsc::Receiver<AppEvent>) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.clear_expired_toast();
            }

            Some(app_event) = event_rx.recv() => {
                app.handle_app_event(app_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Layered dispatch: prompt overlay, then global keys, then the active
/// screen's bindings.
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    if handle_prompt_input(app, &key_event) {
        return;
    }
    if handle_global_keys(app, &key_event) {
        return;
    }

    match app.screen {
        Screen::Login => handle_login_keys(app, &key_event),
        Screen::Main => handle_main_keys(app, &key_event),
    }
}

/// The path prompt absorbs all input while open
fn handle_prompt_input(app: &mut App, key_event: &KeyEvent) -> bool {
    let Some(prompt) = app.prompt.as_mut() else {
        return false;
    };

    match key_event.code {
        KeyCode::Esc => {
            app.prompt = None;
        }
        KeyCode::Enter => {
            let kind = prompt.kind;
            let path = prompt.field.trimmed().to_string();
            app.prompt = None;
            if path.is_empty() {
                return true;
            }
            match kind {
                PromptKind::UploadImage => app.upload_image(Path::new(&path)),
                PromptKind::ProfilePhoto => app.upload_profile_photo(Path::new(&path)),
            }
        }
        code => {
            prompt.field.handle_key(code);
        }
    }
    true
}

fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match key_event.code {
        KeyCode::Char('c') if ctrl => {
            app.should_quit = true;
            true
        }
        KeyCode::F(10) => {
            app.should_quit = true;
            true
        }
        _ => false,
    }
}

fn handle_login_keys(app: &mut App, key_event: &KeyEvent) {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match key_event.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('r') if ctrl => {
            app.auth_tab = match app.auth_tab {
                AuthTab::Login => AuthTab::Register,
                AuthTab::Register => AuthTab::Login,
            };
        }
        KeyCode::Enter => match app.auth_tab {
            AuthTab::Login => app.submit_login(),
            AuthTab::Register => app.submit_register(),
        },
        code => {
            match app.auth_tab {
                AuthTab::Login => app.login_form.handle_key(code),
                AuthTab::Register => app.register_form.handle_key(code),
            };
        }
    }
}

fn handle_main_keys(app: &mut App, key_event: &KeyEvent) {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    // Profile modal captures input while open
    if app.show_profile {
        match key_event.code {
            KeyCode::Esc | KeyCode::F(4) => app.show_profile = false,
            KeyCode::Char('p') if ctrl => {
                app.show_profile = false;
                app.prompt = Some(Prompt::new(PromptKind::ProfilePhoto));
            }
            _ => {}
        }
        return;
    }

    match key_event.code {
        KeyCode::F(1) => app.set_tab(Tab::Dashboard),
        KeyCode::F(2) => app.set_tab(Tab::Diary),
        KeyCode::F(3) => app.set_tab(Tab::Activities),
        KeyCode::F(4) => app.show_profile = true,
        KeyCode::F(5) => app.reload_tab(),
        // F6 toggles through the capture cycle: start, then grab
        KeyCode::F(6) => match app.capture.state() {
            CaptureState::Streaming => app.capture_frame(),
            _ => app.start_capture(),
        },
        KeyCode::F(8) => app.logout(),
        KeyCode::Char('u') if ctrl => {
            app.prompt = Some(Prompt::new(PromptKind::UploadImage));
        }
        KeyCode::Left if ctrl => app.change_date(false),
        KeyCode::Right if ctrl => app.change_date(true),
        KeyCode::Esc => match app.capture.state() {
            CaptureState::Streaming => app.cancel_capture(),
            CaptureState::Staged => app.discard_staged(),
            _ => {}
        },
        KeyCode::Enter => handle_enter(app),
        code => handle_text_input(app, code),
    }
}

/// Enter submits whatever the current tab has pending; a staged analysis
/// takes precedence over the manual form.
fn handle_enter(app: &mut App) {
    if app.has_staged_analysis() {
        app.commit_staged();
        return;
    }
    match app.tab {
        Tab::Dashboard => {}
        Tab::Diary => app.submit_food(),
        Tab::Activities => app.submit_activity(),
    }
}

/// Route typing to the staged quantity field or the tab's form
fn handle_text_input(app: &mut App, code: KeyCode) {
    if app.has_staged_analysis() {
        app.quantity_field.handle_key(code);
        return;
    }
    match app.tab {
        Tab::Dashboard => {}
        Tab::Diary => {
            app.food_form.handle_key(code);
        }
        Tab::Activities => {
            app.activity_form.handle_key(code);
        }
    }
}
