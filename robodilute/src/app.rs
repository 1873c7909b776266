//! Run orchestration behind two narrow collaborators.
//!
//! - [`InputPicker`] supplies the plate file path (or nothing, on cancel)
//! - [`Notifier`] shows the single end-of-run notice
//!
//! The CLI uses [`ArgPicker`] and [`ConsoleNotifier`]; tests use fakes.

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use crate::config::RunOptions;
use crate::error::PipelineError;
use crate::logs::{log_error, log_info_indent, log_success};
use crate::transform::pipeline::{process_plate, PlateRun};

/// Logged after a malformed-input failure.
const LAYOUT_HINT: &str =
    "Expected layout: row letters in the first column, column numbers in the first row";

/// Supplies the input path. `None` means the user cancelled.
pub trait InputPicker {
    fn pick_input_path(&mut self) -> Option<PathBuf>;
}

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Presents the end-of-run notice to the user.
pub trait Notifier {
    fn notify(&mut self, kind: NoticeKind, title: &str, message: &str);
}

/// Picker backed by a command-line argument (or environment variable).
#[derive(Debug, Clone, Default)]
pub struct ArgPicker {
    path: Option<PathBuf>,
}

impl ArgPicker {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl InputPicker for ArgPicker {
    fn pick_input_path(&mut self) -> Option<PathBuf> {
        self.path.take().filter(|p| !p.as_os_str().is_empty())
    }
}

/// Notifier that prints to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, kind: NoticeKind, title: &str, message: &str) {
        match kind {
            NoticeKind::Info => eprintln!("\n✨ {}\n{}", title, message),
            NoticeKind::Error => eprintln!("\n❌ {}\n{}", title, message),
        }
    }
}

/// How a run ended
#[derive(Debug)]
pub enum Outcome {
    /// Worksheet built (and written, unless dry run)
    Success(Box<PlateRun>),
    /// No input chosen
    Cancelled,
    /// Any error; the run produced no output
    Failed(PipelineError),
}

impl Outcome {
    /// Process exit status: 0 for success or cancel, 1 for any error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success(_) | Outcome::Cancelled => 0,
            Outcome::Failed(_) => 1,
        }
    }
}

/// Pick an input, run the pipeline, and send exactly one notice.
pub fn run_with(
    picker: &mut dyn InputPicker,
    notifier: &mut dyn Notifier,
    options: &RunOptions,
) -> Outcome {
    let Some(path) = picker.pick_input_path() else {
        notifier.notify(NoticeKind::Info, "Cancelled", "No file selected.");
        return Outcome::Cancelled;
    };

    let result = panic::catch_unwind(AssertUnwindSafe(|| process_plate(&path, options)))
        .unwrap_or_else(|payload| Err(PipelineError::System(panic_message(payload.as_ref()))));

    match result {
        Ok(run) => {
            let message = match &run.export {
                Some(summary) => format!(
                    "Success! Output folder created at:\n{}",
                    summary.output_dir.display()
                ),
                None => format!("Dry run complete: {} wells, nothing written.", run.rows.len()),
            };
            log_success(format!("{} wells processed", run.rows.len()));
            notifier.notify(NoticeKind::Info, "Success", &message);
            Outcome::Success(Box::new(run))
        }
        Err(err) => {
            log_error(err.to_string());
            if err.is_malformed_input() {
                log_info_indent(LAYOUT_HINT, 1);
            }
            notifier.notify(NoticeKind::Error, err.title(), &err.to_string());
            Outcome::Failed(err)
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected internal failure".to_string()
    }
}
