use color_eyre::Result as EyreResult;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event},
        execute,
        terminal::{
            Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
            enable_raw_mode,
        },
    },
};
use recipebox::app::App;
use recipebox::config::Config;
use recipebox::handlers;
use recipebox::logging::{LogTarget, init_logging};
use recipebox::models::open_storage;
use std::error::Error;
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{info, warn};

/// Application entry point and initialization
/// With arguments this runs a CLI command; without, it takes over the
/// terminal, runs the event loop and restores the terminal on the way out,
/// including when the loop fails.
fn main() -> Result<(), Box<dyn Error>> {
    color_eyre::install()?;

    let config = Config::load()?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    if !args.is_empty() {
        init_logging(&config, LogTarget::Stderr)?;
        return recipebox::cli::execute_cli(&args, &config);
    }

    init_logging(&config, LogTarget::File(config.log_file()))?;
    info!(data_dir = %config.data_dir.display(), "starting recipebox");

    let (storage, storage_error) = open_storage(&config.data_dir);
    let mut app = App::new(storage);
    if let Some(error) = storage_error {
        warn!(%error, "data directory unavailable, recipes will not be saved");
        app.warning_message = Some(format!("Recipes will not be saved: {error}"));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let outcome = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    outcome?;
    info!("recipebox closed");
    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> EyreResult<()> {
    let mut should_quit = false;

    while !should_quit {
        if app.needs_redraw {
            execute!(io::stdout(), Clear(ClearType::All))?;
            terminal.clear()?;
            app.needs_redraw = false;
        }
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                should_quit = handlers::keys::handle_key_events(key, app);
            }
        }
    }

    Ok(())
}
