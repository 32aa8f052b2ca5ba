//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.
//! Notices go to stderr, colored by level.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};
use tokio::sync::broadcast;

use wayfarer_core::{Notice, NoticeLevel};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

fn paint(notice: &Notice, color: bool) -> String {
    if !color {
        return notice.message.clone();
    }
    let msg = &notice.message;
    match notice.level {
        NoticeLevel::Info => msg.cyan().to_string(),
        NoticeLevel::Success => msg.green().to_string(),
        NoticeLevel::Warning => msg.yellow().to_string(),
        NoticeLevel::Error => msg.red().to_string(),
    }
}

/// Print every notice queued on `rx` to stderr.
pub fn drain_notices(rx: &mut broadcast::Receiver<Notice>, color: bool, quiet: bool) {
    let mut stderr = io::stderr().lock();
    while let Ok(notice) = rx.try_recv() {
        if quiet && notice.level != NoticeLevel::Error {
            continue;
        }
        let _ = writeln!(stderr, "{}", paint(&notice, color));
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses `detail_fn`, which returns a pre-formatted string.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(id_fn(data)),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Aligned `label: value` lines under a heading.
pub fn render_fields(title: &str, fields: &[(&str, String)]) -> String {
    use std::fmt::Write as _;

    let width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut out = format!("{title}\n");
    for (label, value) in fields {
        let _ = writeln!(out, "  {label:<width$}  {value}");
    }
    out.truncate(out.trim_end().len());
    out
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.map_err(|e| CliError::Render(e.to_string()))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Render(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn fields_align_on_the_longest_label() {
        let out = render_fields(
            "Germany",
            &[("Capital", "Berlin".into()), ("Region", "Europe".into())],
        );
        assert_eq!(out, "Germany\n  Capital  Berlin\n  Region   Europe");
    }

    #[test]
    fn plain_lists_one_id_per_line() {
        #[derive(serde::Serialize, Tabled)]
        struct Row {
            code: String,
        }
        let rows = vec![Row { code: "DE".into() }, Row { code: "JP".into() }];
        let out = render_list(&OutputFormat::Plain, &rows, |r| Row { code: r.code.clone() }, |r| {
            r.code.clone()
        })
        .unwrap();
        assert_eq!(out, "DE\nJP");
    }

    #[test]
    fn uncolored_notices_are_the_bare_message() {
        let notice = Notice {
            level: NoticeLevel::Success,
            message: "Saved to My Plans!".into(),
        };
        assert_eq!(paint(&notice, false), "Saved to My Plans!");
    }
}
