//! Progress reporting for the analysis steps

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::models::config::Settings;

/// Spinner per analysis step, silent when disabled
pub struct ProgressReporter {
    enabled: bool,
    verbose: bool,
    spinner: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new(enabled: bool, verbose: bool) -> Self {
        Self {
            enabled,
            verbose,
            spinner: None,
        }
    }

    /// Reporter that never draws anything
    pub fn hidden() -> Self {
        Self::new(false, false)
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.show_progress && !settings.quiet, settings.verbose && !settings.quiet)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Show a spinner for a step, replacing any unfinished one
    pub fn start_step(&mut self, message: &str) {
        if let Some(previous) = self.spinner.take() {
            previous.finish_and_clear();
        }
        if self.verbose {
            println!("Starting: {}", message);
        }
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    /// Stop the current spinner, leaving `message` on screen
    pub fn finish_step(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(message.to_string());
        }
        if self.verbose {
            println!("Finished: {}", message);
        }
    }

    /// Clear a spinner left running by an aborted step
    pub fn abandon(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.abandon();
        }
    }

    pub fn is_running(&self) -> bool {
        self.spinner.is_some()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.abandon();
    }
}
