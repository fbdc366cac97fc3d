use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::config::ChooserSettings;
use crate::error::Result;
use crate::runtime::Tui;
use crate::ui;

use super::{ExtensionFilter, FileChooser, Picker};

/// File chooser drawn inside the running terminal UI.
pub struct TerminalChooser<'a> {
    terminal: &'a mut Tui,
    settings: &'a ChooserSettings,
}

impl<'a> TerminalChooser<'a> {
    pub fn new(terminal: &'a mut Tui, settings: &'a ChooserSettings) -> Self {
        Self { terminal, settings }
    }
}

impl FileChooser for TerminalChooser<'_> {
    fn prompt_open_file(
        &mut self,
        caption: &str,
        initial_dir: &Path,
        filter: &ExtensionFilter,
    ) -> Result<Option<PathBuf>> {
        let entries = filter.scan(initial_dir, self.settings);
        tracing::debug!(
            dir = %initial_dir.display(),
            extensions = ?filter.extensions(),
            found = entries.len(),
            "listing files for chooser"
        );
        let mut picker = Picker::new(caption, initial_dir, filter.describe(), entries);
        let mut pending_g = false;

        loop {
            self.terminal.draw(|f| ui::draw_picker(f, &picker))?;

            if !event::poll(Duration::from_millis(100))? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match handle_key(&mut picker, key.code, &mut pending_g) {
                PickerAction::Continue => {}
                PickerAction::Choose(path) => return Ok(Some(path)),
                PickerAction::Cancel => return Ok(None),
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(super) enum PickerAction {
    Continue,
    Choose(PathBuf),
    Cancel,
}

pub(super) fn handle_key(picker: &mut Picker, code: KeyCode, pending_g: &mut bool) -> PickerAction {
    // Nothing to pick: any key backs out.
    if picker.is_empty() {
        return PickerAction::Cancel;
    }

    if code != KeyCode::Char('g') {
        *pending_g = false;
    }

    match code {
        KeyCode::Esc | KeyCode::Char('q') => PickerAction::Cancel,
        KeyCode::Enter => picker
            .selected()
            .map(|p| PickerAction::Choose(p.to_path_buf()))
            .unwrap_or(PickerAction::Cancel),
        KeyCode::Char('j') | KeyCode::Down => {
            picker.next();
            PickerAction::Continue
        }
        KeyCode::Char('k') | KeyCode::Up => {
            picker.prev();
            PickerAction::Continue
        }
        KeyCode::Char('g') => {
            if *pending_g {
                *pending_g = false;
                picker.first();
            } else {
                *pending_g = true;
            }
            PickerAction::Continue
        }
        KeyCode::Char('G') | KeyCode::End => {
            picker.last();
            PickerAction::Continue
        }
        KeyCode::Home => {
            picker.first();
            PickerAction::Continue
        }
        _ => PickerAction::Continue,
    }
}
