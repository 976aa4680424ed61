//! Progress reporting utilities using indicatif.
//!
//! [`Progress`] implements [`DeleteProgressCallback`] to show a progress bar
//! on stderr while a deletion plan is executed.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::actions::{BatchDeleteResult, DeleteProgressCallback};

/// Progress bar for deletion runs.
pub struct Progress {
    bar: ProgressBar,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, nothing is drawn.
    ///
    /// # Examples
    ///
    /// ```
    /// use bagdupe::progress::Progress;
    ///
    /// let progress = Progress::new(true);
    /// assert!(progress.is_hidden());
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
            bar.set_style(Self::style());
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        };
        Self { bar }
    }

    /// Whether the bar is not drawn.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{spinner:.green} Deleting [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
    }
}

impl DeleteProgressCallback for Progress {
    fn on_before_delete(&self, path: &Path, index: usize, total: usize) {
        if index == 0 {
            self.bar.set_length(total as u64);
        }
        self.bar
            .set_message(truncate_path(&path.to_string_lossy(), 50));
    }

    fn on_delete_success(&self, _path: &Path, _size: u64) {
        self.bar.inc(1);
    }

    fn on_delete_failure(&self, path: &Path, _error: &str) {
        self.bar
            .abandon_with_message(format!("failed at {}", path.display()));
    }

    fn on_complete(&self, result: &BatchDeleteResult) {
        self.bar.finish_and_clear();
        log::debug!("Deletion finished: {}", result.summary());
    }
}

/// Shorten a path for display, keeping its end.
fn truncate_path(path: &str, max_len: usize) -> String {
    let count = path.chars().count();
    if count <= max_len {
        return path.to_string();
    }
    let tail: String = path.chars().skip(count - (max_len - 3)).collect();
    format!("...{}", tail)
}
