use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::covers::FetchCompletion;
use crate::player::NextTrackSignal;
use crate::ui::{self, Regions, VolumeSlider};

use super::startup::Controller;

const MAX_POLL: Duration = Duration::from_millis(50);

/// Slider step for the `+`/`-` keys.
const VOLUME_STEP: f64 = 5.0;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Interactive areas from the most recent draw.
    pub regions: Regions,
    /// Whether a left-button drag started on the volume column.
    dragging_volume: bool,
    last_clock_tick: Option<Instant>,
}

/// Main terminal event loop: media clock, thumbnail completions, next-track
/// requests, drawing and input. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut Controller,
    slider: &mut VolumeSlider,
    next_rx: &mpsc::Receiver<NextTrackSignal>,
    fetch_rx: &mpsc::Receiver<FetchCompletion>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(settings.playback.tick_ms);
    let mut state = EventLoopState::default();

    loop {
        let now = Instant::now();
        if state
            .last_clock_tick
            .is_none_or(|last| now.duration_since(last) >= tick)
        {
            controller.poll_media();
            state.last_clock_tick = Some(now);
        }

        while let Ok(done) = fetch_rx.try_recv() {
            controller.on_thumbnail_fetched(done.ticket, done.result, Instant::now());
        }
        controller.tick(Instant::now());

        // The playlist owner answers next-track requests here.
        while let Ok(signal) = next_rx.try_recv() {
            tracing::debug!(direction = signal.direction, "next track requested");
            if let Some(song) = app.advance(signal) {
                controller.play(song);
            }
        }

        let now_playing = controller.now_playing();
        terminal.draw(|f| state.regions = ui::draw(f, app, &now_playing, slider))?;

        if event::poll(poll_timeout(controller, Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, app, controller, slider) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, &mut state, controller, slider),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Wake up in time for the next trail eviction.
fn poll_timeout(controller: &Controller, now: Instant) -> Duration {
    controller
        .thumbnails()
        .next_deadline()
        .map(|due| due.saturating_duration_since(now))
        .map_or(MAX_POLL, |wait| wait.min(MAX_POLL))
}

/// Returns `true` when the user asked to quit.
fn handle_key_event(
    key: KeyEvent,
    app: &mut App,
    controller: &mut Controller,
    slider: &mut VolumeSlider,
) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char(' ') => controller.toggle_play_state(),
        KeyCode::Char('n') => controller.request_next_default(),
        KeyCode::Char('p') => controller.request_next(-1),
        KeyCode::Enter => {
            if let Some(song) = app.play_selected() {
                controller.play(song);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('r') => controller.set_looping(!controller.looping()),
        // Top of the slider is full volume, so louder means a smaller value.
        KeyCode::Char('+') | KeyCode::Char('=') => {
            controller.on_volume_drag(slider.nudge(-VOLUME_STEP));
        }
        KeyCode::Char('-') => controller.on_volume_drag(slider.nudge(VOLUME_STEP)),
        _ => {}
    }
    false
}

fn handle_mouse_event(
    mouse: MouseEvent,
    state: &mut EventLoopState,
    controller: &mut Controller,
    slider: &mut VolumeSlider,
) {
    match mouse.kind {
        MouseEventKind::Down(button) => {
            if let Some(pointer) =
                ui::pointer_event(state.regions.progress, mouse.column, mouse.row, button)
            {
                controller.seek(pointer);
            } else if button == MouseButton::Left
                && ui::hits_volume(&state.regions, mouse.column, mouse.row)
            {
                state.dragging_volume = true;
                drag_volume(mouse.row, state, controller, slider);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) if state.dragging_volume => {
            drag_volume(mouse.row, state, controller, slider);
        }
        MouseEventKind::Up(_) => state.dragging_volume = false,
        _ => {}
    }
}

fn drag_volume(
    row: u16,
    state: &EventLoopState,
    controller: &mut Controller,
    slider: &mut VolumeSlider,
) {
    let area = state.regions.volume;
    if area.height == 0 {
        return;
    }
    // Keep tracking while the pointer leaves the column mid-drag.
    let row = row.clamp(area.y, area.y + area.height - 1);
    if let Some(value) = slider.value_at_row(area, row) {
        controller.on_volume_drag(slider.set(value));
    }
}
