use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::info;

use choreo_core::AppConfig;
use choreo_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    load_theme,
    widgets::{InspectorWidget, PageViewWidget, PopupWidget, StatusBarWidget},
};

pub async fn run(config: AppConfig) -> Result<()> {
    let keymap = Keymap::from_config(&config.keymap);
    let theme = load_theme(&config.ui.theme);
    let event_handler =
        EventHandler::with_scroll_config(config.ui.tick_rate_ms, &config.ui.scroll);

    // Mount before touching the terminal so setup errors print normally
    let mut app = App::new(config, theme)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("Choreo"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &keymap, &event_handler);

    app.teardown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Preview closed");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    keymap: &Keymap,
    event_handler: &EventHandler,
) -> Result<()> {
    // checked at the end of each iteration to pick the next poll timeout
    let mut needs_fast_update = true;

    loop {
        app.drain_tasks();
        app.frame(Instant::now());

        terminal.draw(|frame| {
            let size = frame.area();
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            if app.show_inspector {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Ratio(3, 5), Constraint::Ratio(2, 5)])
                    .split(main_layout[0]);
                PageViewWidget::render(frame, columns[0], app);
                InspectorWidget::render(frame, columns[1], app);
            } else {
                PageViewWidget::render(frame, main_layout[0], app);
            }
            StatusBarWidget::render(frame, main_layout[1], app);

            if app.mode == Mode::Help {
                PopupWidget::render_help(frame, &app.config.keymap, &app.theme);
            }
        })?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(AppEvent::Key(key)) = event {
            let action = handle_key_event(key, app, keymap);
            app.handle_action(action, Instant::now());
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            return Ok(());
        }
    }
}
