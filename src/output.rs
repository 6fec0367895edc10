//! CLI output: quick-start guidance, progress spinner and run summary.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::watch;
use tunefetch_core::csv_import::CsvImportResult;
use tunefetch_core::pipeline::{ItemState, PipelineRun};

/// Message when no input was provided at all.
pub const NO_INPUT_GUIDANCE: &str =
    "No input provided. Pipe links or search phrases via stdin, pass them as arguments, or use --csv.";

/// Example for piping input.
pub const INPUT_PIPE_EXAMPLE: &str =
    "Example: echo 'Artist - Song' | tunefetch --output-dir ~/Music";

/// Example for passing inputs as arguments.
pub const INPUT_ARG_EXAMPLE: &str =
    "Example: tunefetch -o ~/Music https://youtu.be/dQw4w9WgXcQ";

/// Returns terminal width from COLUMNS, or 80 if unset/invalid.
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 20)
        .unwrap_or(80)
}

/// Truncates text to at most `width` chars, appending ellipsis if truncated.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let text_len = text.chars().count();
    if text_len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    if width == 1 {
        return "…".to_string();
    }

    let mut output: String = text.chars().take(width - 1).collect();
    output.push('…');
    output
}

/// Prints quick-start guidance to stdout.
pub fn print_quick_start_guidance() {
    let width = terminal_width().min(80);
    for line in [NO_INPUT_GUIDANCE, INPUT_PIPE_EXAMPLE, INPUT_ARG_EXAMPLE] {
        println!("{}", truncate_to_width(line, width));
    }
}

/// Returns true when the spinner should be drawn.
pub(crate) fn should_use_spinner(stderr_is_terminal: bool, quiet: bool, dumb_terminal: bool) -> bool {
    stderr_is_terminal && !quiet && !dumb_terminal
}

pub(crate) fn is_dumb_terminal() -> bool {
    std::env::var("TERM")
        .map(|value| value.eq_ignore_ascii_case("dumb"))
        .unwrap_or(false)
}

/// Formats the spinner line for a run snapshot.
pub(crate) fn spinner_message(run: &PipelineRun) -> String {
    let status = run.status.lines().next().unwrap_or_default();
    format!(
        "[{}/{}] {:>3}% {}",
        run.current_index, run.total_count, run.progress, status
    )
}

/// Spawns the progress UI (spinner) when requested.
/// Returns (handle, stop) so the caller can signal stop and await the handle.
/// When `use_spinner` is false, returns (None, stop) with stop already true.
pub(crate) fn spawn_progress_ui(
    use_spinner: bool,
    updates: watch::Receiver<PipelineRun>,
) -> (Option<tokio::task::JoinHandle<()>>, Arc<AtomicBool>) {
    if !use_spinner {
        return (None, Arc::new(AtomicBool::new(true)));
    }
    let stop = Arc::new(AtomicBool::new(false));
    let handle = spawn_spinner_inner(updates, Arc::clone(&stop));
    (Some(handle), stop)
}

fn spawn_spinner_inner(
    updates: watch::Receiver<PipelineRun>,
    stop: Arc<AtomicBool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));

        let width = terminal_width();
        while !stop.load(Ordering::SeqCst) {
            let message = spinner_message(&updates.borrow());
            spinner.set_message(truncate_to_width(&message, width.saturating_sub(2)));
            tokio::time::sleep(Duration::from_millis(120)).await;
        }

        spinner.finish_and_clear();
    })
}

/// Prints a one-line note about an imported CSV.
pub(crate) fn print_csv_import_summary(import: &CsvImportResult) {
    println!(
        "Imported {} of {} CSV row(s) ({} mode)",
        import.success_count, import.total_count, import.mode
    );
    for error in &import.errors {
        println!("  {error}");
    }
}

/// Builds the per-item and summary lines for a finished run.
pub(crate) fn completion_lines(run: &PipelineRun) -> Vec<String> {
    let mut lines: Vec<String> = run
        .items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.state == ItemState::Done)
        .filter_map(|(index, item)| {
            item.path
                .as_ref()
                .map(|path| format!("  {}. {}", index + 1, path.display()))
        })
        .collect();
    lines.extend(run.status.lines().map(str::to_string));
    lines
}

/// Prints the run summary to stdout.
pub(crate) fn print_completion_summary(run: &PipelineRun) {
    for line in completion_lines(run) {
        println!("{line}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_truncate_to_width_short_text_unchanged() {
        assert_eq!(truncate_to_width("abc", 10), "abc");
    }

    #[test]
    fn test_truncate_to_width_adds_ellipsis() {
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        assert_eq!(truncate_to_width("abcdef", 1), "…");
        assert_eq!(truncate_to_width("abcdef", 0), "");
    }

    #[test]
    fn test_should_use_spinner_only_on_interactive_terminal() {
        assert!(should_use_spinner(true, false, false));
        assert!(!should_use_spinner(false, false, false));
        assert!(!should_use_spinner(true, true, false));
        assert!(!should_use_spinner(true, false, true));
    }

    #[test]
    fn test_spinner_message_uses_first_status_line() {
        let mut run = PipelineRun::start(4);
        run.current_index = 2;
        run.progress = 25;
        run.status = "Downloading 2/4: Song\nextra".to_string();
        assert_eq!(spinner_message(&run), "[2/4]  25% Downloading 2/4: Song");
    }

    #[test]
    fn test_completion_lines_list_files_then_status() {
        let mut run = PipelineRun::start(2);
        run.items[0].state = ItemState::Done;
        run.items[0].path = Some(PathBuf::from("/music/Song [abc].mp3"));
        run.items[1].state = ItemState::Failed;
        run.status = "Completed with errors: failed 1 / total 2\nItem 2 (x): boom".to_string();

        let lines = completion_lines(&run);

        assert_eq!(lines[0], "  1. /music/Song [abc].mp3");
        assert_eq!(lines[1], "Completed with errors: failed 1 / total 2");
        assert_eq!(lines[2], "Item 2 (x): boom");
    }

    #[tokio::test]
    async fn spawn_progress_ui_when_disabled_returns_none_handle_and_stop_already_true() {
        let (_tx, rx) = watch::channel(PipelineRun::default());
        let (handle, stop) = spawn_progress_ui(false, rx);
        assert!(handle.is_none());
        assert!(stop.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn spawn_progress_ui_when_enabled_stops_on_signal() {
        let (_tx, rx) = watch::channel(PipelineRun::default());
        let (handle, stop) = spawn_progress_ui(true, rx);
        assert!(handle.is_some());
        assert!(!stop.load(Ordering::SeqCst));

        stop.store(true, Ordering::SeqCst);
        let _ = handle.unwrap().await;
    }
}
