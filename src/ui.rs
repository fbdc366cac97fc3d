//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::chooser::Picker;
use crate::config::UiSettings;
use crate::controller::PlayerState;
use crate::engine::PlaybackState;

const CONTROLS: [(&str, &str); 6] = [
    ("space/p", "play/pause"),
    ("s", "stop"),
    ("-/+", "volume"),
    ("o", "open file"),
    ("r", "replay"),
    ("q", "quit"),
];

fn controls_text(volume_step: u8) -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| {
            if *k == "-/+" {
                format!("[{k}] {v} -/+{volume_step}")
            } else {
                format!("[{k}] {v}")
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

fn state_text(state: &PlayerState) -> &'static str {
    if !state.has_track_displayed() {
        return "Stopped";
    }
    match state.playback {
        PlaybackState::Idle => "Ready",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the player screen from `state`.
pub fn draw(frame: &mut Frame, state: &PlayerState, ui_settings: &UiSettings, volume_step: u8) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" lonetrack ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Title and elapsed-time labels.
    let labels = &state.labels;
    let now_playing = Paragraph::new(format!(
        "Title: {}\nTime:  {}",
        labels.title, labels.elapsed
    ))
    .block(
        Block::bordered()
            .padding(left_pad())
            .title(format!(" {} ", state_text(state))),
    )
    .wrap(Wrap { trim: false });
    frame.render_widget(now_playing, chunks[1]);

    let slider = state.volume.slider();
    let volume = Gauge::default()
        .block(Block::bordered().title(" volume "))
        .gauge_style(Style::default().add_modifier(Modifier::BOLD))
        .percent(u16::from(slider))
        .label(format!("{slider}%"));
    frame.render_widget(volume, chunks[2]);

    if let Some(ref notice) = state.notice {
        let notice_par = Paragraph::new(notice.as_str())
            .slow_blink()
            .block(Block::bordered().padding(left_pad()).title(" notice "))
            .wrap(Wrap { trim: true });
        frame.render_widget(notice_par, chunks[3]);
    }

    let footer = Paragraph::new(controls_text(volume_step))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}

/// Render the file chooser popup.
pub fn draw_picker(frame: &mut Frame, picker: &Picker) {
    let area = centered_rect_sized(80, 20, frame.area());
    frame.render_widget(Clear, area);

    let title = format!(" {} ({}) ", picker.caption, picker.filter_text);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(" enter: open | esc: cancel ");

    if picker.is_empty() {
        let msg = format!(
            "No matching files in {}\n\nPress any key to go back.",
            picker.dir.display()
        );
        let par = Paragraph::new(msg)
            .block(block.padding(left_pad()))
            .wrap(Wrap { trim: true });
        frame.render_widget(par, area);
        return;
    }

    // Center the selected item when possible; only build the visible window.
    let entries = picker.entries();
    let total = entries.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let sel_pos = picker.selected_index();
    let (start, end, selected_in_visible) = if total <= list_height || list_height == 0 {
        (0, total, sel_pos)
    } else {
        let half = list_height / 2;
        let mut start = sel_pos.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, sel_pos - start)
    };

    let items: Vec<ListItem> = entries[start..end]
        .iter()
        .map(|p| ListItem::new(picker.label(p)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    list_state.select(Some(selected_in_visible));
    frame.render_stateful_widget(list, area, &mut list_state);
}
