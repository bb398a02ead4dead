//! tsfood - Terminal Food Ordering
//!
//! A terminal storefront for a food delivery API. Browse restaurants with
//! filters, collect menu items from several restaurants in one cart, check out
//! per restaurant, and review past orders.

use std::io;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info};

use tsfood::application::{App, AppMode};
use tsfood::infrastructure::{init_logging, Config, HttpApi, StorefrontApi};
use tsfood::presentation::{render_ui, InputHandler};

/// Entry point for the tsfood terminal storefront.
///
/// Reads the configuration from the environment, installs file logging,
/// sets up the terminal and runs the event loop until the user quits.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the log file cannot be
/// opened, or terminal setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_logging(&config.log_file)?;
    config.log_summary();
    let api = HttpApi::new(&config)?;

    let mut app = App::new(config.page_limit, config.review_limit);
    InputHandler::load_restaurants(&mut app, &api);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &api);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(%err, "Terminal loop failed");
        println!("{err:?}");
    }

    info!("Exiting");
    Ok(())
}

/// Main application event loop.
///
/// Continues running until the user presses 'q' in normal mode.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, api: &dyn StorefrontApi) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => return Ok(()),
                    _ => InputHandler::handle_key_event(app, api, key.code, key.modifiers),
                }
            }
        }
    }
}
