use std::path::{Path, PathBuf};

/// Selection state for the file chooser popup.
#[derive(Debug, Clone)]
pub struct Picker {
    pub caption: String,
    pub dir: PathBuf,
    pub filter_text: String,
    entries: Vec<PathBuf>,
    selected: usize,
}

impl Picker {
    pub fn new(
        caption: impl Into<String>,
        dir: impl Into<PathBuf>,
        filter_text: impl Into<String>,
        entries: Vec<PathBuf>,
    ) -> Self {
        Self {
            caption: caption.into(),
            dir: dir.into(),
            filter_text: filter_text.into(),
            entries,
            selected: 0,
        }
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&Path> {
        self.entries.get(self.selected).map(PathBuf::as_path)
    }

    pub fn next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.entries.len().saturating_sub(1);
    }

    /// Entry label relative to the listed directory.
    pub fn label(&self, entry: &Path) -> String {
        entry
            .strip_prefix(&self.dir)
            .unwrap_or(entry)
            .display()
            .to_string()
    }
}
