//! Template-based record formatting

use super::record::LogRecord;

/// Default message template, shared by console and file sinks.
pub const DEFAULT_MSG_FORMAT: &str = "%Time [%Level] %Msg --[%Line]%File";

/// Timestamp layout used for the `%Time` token.
pub const TIME_LAYOUT: &str = "%Y%m%d-%H:%M:%S";

/// Render one record against a message template.
///
/// Recognized tokens: `%Time`, `%Level`, `%Msg`, `%Line`, `%File`.
/// Unrecognized tokens pass through untouched. The result is always
/// newline-terminated. Pure function; safe to call from any thread.
pub fn render(template: &str, record: &LogRecord) -> String {
    let mut line = template
        .replace("%Time", &record.time.format(TIME_LAYOUT).to_string())
        .replace("%Level", record.level.code())
        .replace("%Line", &record.line.to_string())
        .replace("%File", record.file_name());
    line = line.replace("%Msg", &record.message());
    line.push('\n');
    line
}
