//! UI rendering helpers for the terminal user interface.
//!
//! This module renders the now-playing widget using `ratatui` and maps mouse
//! positions on the progress bar and volume column back to widget values.

use std::path::Path;

use crossterm::event::MouseButton;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::player::{NowPlaying, PointerEvent, SLIDER_MAX, SliderConfig, Status};

const CONTROLS: [(&str, &str); 8] = [
    ("space", "play/pause"),
    ("n/p", "next/prev song"),
    ("enter", "play selected"),
    ("j/k", "up/down"),
    ("r", "loop"),
    ("+/-", "volume"),
    ("click", "seek"),
    ("q", "quit"),
];

/// Screen areas that accept mouse input, as of the last draw.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Regions {
    /// Inner area of the progress bar.
    pub progress: Rect,
    /// Inner area of the volume column.
    pub volume: Rect,
}

/// State of the vertical volume slider: `0` at the top, `100` at the bottom.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VolumeSlider {
    min: f64,
    max: f64,
    value: f64,
}

impl VolumeSlider {
    pub fn new(config: SliderConfig) -> Self {
        Self {
            min: config.min,
            max: config.max,
            value: config.value.clamp(config.min, config.max),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Move the handle and return the new value.
    pub fn set(&mut self, value: f64) -> f64 {
        self.value = value.clamp(self.min, self.max);
        self.value
    }

    pub fn nudge(&mut self, delta: f64) -> f64 {
        self.set(self.value + delta)
    }

    /// Value under `row` of the slider's inner `area`.
    pub fn value_at_row(&self, area: Rect, row: u16) -> Option<f64> {
        if !contains_row(area, row) {
            return None;
        }
        if area.height <= 1 {
            return Some(self.min);
        }
        let t = f64::from(row - area.y) / f64::from(area.height - 1);
        Some(self.min + t * (self.max - self.min))
    }
}

fn contains_row(area: Rect, row: u16) -> bool {
    row >= area.y && row < area.y + area.height
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    contains_row(area, row) && column >= area.x && column < area.x + area.width
}

fn button_code(button: MouseButton) -> i16 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
    }
}

/// Translate a mouse press inside the progress bar into a `PointerEvent`.
pub fn pointer_event(
    area: Rect,
    column: u16,
    row: u16,
    button: MouseButton,
) -> Option<PointerEvent> {
    if !contains(area, column, row) {
        return None;
    }
    Some(PointerEvent {
        button: button_code(button),
        offset_x: f64::from(column - area.x),
        element_width: f64::from(area.width),
    })
}

/// Whether a press at (`column`, `row`) lands on the volume column.
pub fn hits_volume(regions: &Regions, column: u16, row: u16) -> bool {
    contains(regions.volume, column, row)
}

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{}] {}", k, v))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Last path component of a cover location, for the trail panel.
fn cover_label(url: &str) -> String {
    Path::new(url)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(url)
        .to_string()
}

/// Track list title, naming the scanned folder when known.
fn tracks_title(app: &App) -> String {
    match &app.current_dir {
        Some(dir) => format!(" tracks • {} ", dir),
        None => " tracks ".to_string(),
    }
}

fn status_text(now: &NowPlaying) -> String {
    let state = match now.status {
        Status::NoTrack => "No track",
        Status::Playing => "Playing",
        Status::Paused => "Paused",
    };
    let looping = if now.looping { "Loop: ON" } else { "Loop: OFF" };
    format!(" {} • {} ", state, looping)
}

/// `Gauge::ratio` panics outside `0.0..=1.0`.
fn gauge_ratio(percent: f64) -> f64 {
    if percent.is_finite() {
        (percent / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn volume_lines(slider: &VolumeSlider, height: u16) -> Vec<Line<'static>> {
    if height == 0 {
        return Vec::new();
    }
    let handle = if height > 1 {
        (slider.value() / SLIDER_MAX * f64::from(height - 1)).round() as u16
    } else {
        0
    };
    (0..height)
        .map(|row| {
            if row >= handle {
                Line::from(" ███")
            } else {
                Line::from("  │ ")
            }
        })
        .collect()
}

/// Render the widget into `frame` and return the interactive regions.
pub fn draw(frame: &mut Frame, app: &App, now: &NowPlaying, slider: &VolumeSlider) -> Regions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Now playing
    let title = if now.name.is_empty() {
        "Nothing playing".to_string()
    } else {
        now.name.clone()
    };
    let header = Paragraph::new(vec![Line::from(title).bold(), Line::from(now.artist.clone())])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" cadenza ")
                .title_alignment(Alignment::Center)
                .title_bottom(status_text(now)),
        );
    frame.render_widget(header, chunks[0]);

    // Progress
    let progress_block = Block::default().borders(Borders::ALL).title(" progress ");
    let progress_inner = progress_block.inner(chunks[1]);
    let gauge = Gauge::default()
        .block(progress_block)
        .ratio(gauge_ratio(now.progress_ratio))
        .label(format!("{} / -{}", now.elapsed_label, now.remaining_label));
    frame.render_widget(gauge, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(26),
            Constraint::Length(6),
        ])
        .split(chunks[2]);

    // Track list
    {
        let items: Vec<ListItem> = app
            .songs
            .iter()
            .enumerate()
            .map(|(i, song)| {
                let text = if song.artist.is_empty() {
                    song.name.clone()
                } else {
                    format!("{} - {}", song.artist, song.name)
                };
                if app.current == Some(i) {
                    ListItem::new(text).italic()
                } else {
                    ListItem::new(text)
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(tracks_title(app)))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if app.has_songs() {
            state.select(Some(app.selected));
        }
        frame.render_stateful_widget(list, body[0], &mut state);
    }

    // Thumbnail trail, newest last
    let trail_len = now.trail.len();
    let trail_items: Vec<ListItem> = now
        .trail
        .iter()
        .enumerate()
        .map(|(i, url)| {
            let label = cover_label(url);
            if i + 1 == trail_len {
                ListItem::new(format!("● {}", label)).bold()
            } else {
                ListItem::new(format!("○ {}", label)).dim()
            }
        })
        .collect();
    let trail = List::new(trail_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" cover ")
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
    );
    frame.render_widget(trail, body[1]);

    // Volume
    let volume_block = Block::default().borders(Borders::ALL).title(" vol ");
    let volume_inner = volume_block.inner(body[2]);
    let volume = Paragraph::new(volume_lines(slider, volume_inner.height)).block(volume_block);
    frame.render_widget(volume, body[2]);

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" controls • volume {:.0}% ", now.volume * 100.0))
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);

    Regions {
        progress: progress_inner,
        volume: volume_inner,
    }
}

#[cfg(test)]
mod tests;
