use std::env;
use std::path::Path;
use std::sync::mpsc;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::covers::FetchCompletion;
use crate::library::scan;
use crate::player::{NextTrackSignal, slider_config};
use crate::ui::VolumeSlider;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_problem) = settings::load_settings();
    if let Some(problem) = &config_problem {
        eprintln!("cadenza: {problem}, using defaults");
    }

    let _log_guard = match logging::init(&settings.log) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("cadenza: logging disabled: {e}");
            None
        }
    };
    if let Some(problem) = config_problem {
        tracing::warn!("{problem}, using defaults");
    }

    let dir = env::args().nth(1).unwrap_or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|p| p.to_str().map(|s| s.to_string()))
            .unwrap_or_else(|| "Music".to_string())
    });

    let songs = scan(
        Path::new(&dir),
        &settings.library,
        &settings.thumbnails.cover_names,
    );
    let mut app = App::new(songs);
    app.set_current_dir(dir.clone());

    let (next_tx, next_rx) = mpsc::channel::<NextTrackSignal>();
    let (fetch_tx, fetch_rx) = mpsc::channel::<FetchCompletion>();
    let mut controller = startup::build_controller(&settings, next_tx, fetch_tx)?;

    let mut slider = VolumeSlider::new(
        controller
            .slider_config()
            .unwrap_or_else(|| slider_config(settings.playback.initial_volume)),
    );

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut controller,
        &mut slider,
        &next_rx,
        &fetch_rx,
    );

    controller.dispose();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    run_result
}
