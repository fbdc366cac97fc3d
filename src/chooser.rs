//! File chooser collaborator.
//!
//! `FileChooser` is the seam the controller talks to. `ExtensionFilter`
//! decides which files are offered and lists them; `Picker` is the
//! selection model and `TerminalChooser` draws it inside the TUI.

mod filter;
mod picker;
mod terminal;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use filter::ExtensionFilter;
pub use picker::Picker;
pub use terminal::TerminalChooser;

/// Something that can ask the user for one file to open.
pub trait FileChooser {
    /// Returns `Ok(None)` when the user cancels.
    fn prompt_open_file(
        &mut self,
        caption: &str,
        initial_dir: &Path,
        filter: &ExtensionFilter,
    ) -> Result<Option<PathBuf>>;
}
