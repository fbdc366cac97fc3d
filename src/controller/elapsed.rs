use crate::config::ElapsedFormat;

/// Render an elapsed position for the time label.
///
/// `seconds = ms / 1000` and `minutes = seconds / 60`. `Clock` shows the
/// seconds within the minute (`2:05`); `TotalSeconds` shows all elapsed
/// seconds after the minutes (`2:125`).
pub fn format_elapsed(elapsed_ms: u64, format: ElapsedFormat) -> String {
    let seconds = elapsed_ms / 1000;
    let minutes = seconds / 60;
    match format {
        ElapsedFormat::Clock => format!("{}:{:02}", minutes, seconds % 60),
        ElapsedFormat::TotalSeconds => format!("{minutes}:{seconds}"),
    }
}
