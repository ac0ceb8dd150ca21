use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use console::{Term, style};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::constants::progress::{FINISHED_FRAME, SPINNER_FRAMES, TICK_INTERVAL};
use crate::utils::string::pluralize;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

/// Animation frames followed by the finished frame, as indicatif expects
fn tick_strings() -> Vec<&'static str> {
    SPINNER_FRAMES
        .iter()
        .copied()
        .chain(std::iter::once(FINISHED_FRAME))
        .collect()
}

/// Interactive progress output on stderr
///
/// Only created when stderr is a terminal, so piped output stays clean.
pub struct ProgressReporter {
    term: Term,
    spinner_position: AtomicUsize,
    multi_progress: MultiProgress,
    current_bar: Option<ProgressBar>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            spinner_position: AtomicUsize::new(0),
            multi_progress: MultiProgress::new(),
            current_bar: None,
        }
    }

    /// A progress reporter when stderr is interactive, otherwise `None`
    pub fn for_terminal() -> Option<Self> {
        if Term::stderr().is_term() {
            Some(Self::new())
        } else {
            None
        }
    }

    pub fn create_spinner(&mut self, message: &str) -> ProgressBar {
        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        pb.set_style(
            ProgressStyle::default_spinner()
                .template(SPINNER_TEMPLATE)
                .expect("Spinner template should be valid")
                .tick_strings(&tick_strings()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    fn next_frame(&self) -> &'static str {
        let pos = self.spinner_position.fetch_add(1, Ordering::Relaxed) % SPINNER_FRAMES.len();
        SPINNER_FRAMES[pos]
    }

    pub fn start_loading(&mut self) {
        let _ = self.term.clear_line();
        eprintln!("{} Loading participant records...", style("🔍").cyan());
        let spinner = self.create_spinner("Scanning for record files...");
        self.current_bar = Some(spinner);
    }

    /// Called from parser threads
    pub fn reading_file(&self, path: &Path) {
        if let Some(ref pb) = self.current_bar {
            pb.set_message(format!("Reading: {}...", path.display()));
        } else {
            let _ = self.term.clear_line();
            eprint!(
                "\r{} Reading: {}... ",
                style(self.next_frame()).cyan(),
                style(path.display()).dim()
            );
        }
    }

    pub fn finish_loading(&mut self, participants: usize, files: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        let _ = self.term.clear_line();
        if participants == 0 {
            eprintln!("\r{} No participants found", style("✗").red());
        } else {
            eprintln!(
                "\r{} Loaded {} {} from {} {}",
                style("✓").green(),
                style(participants).yellow().bold(),
                pluralize("participant", participants),
                files,
                pluralize("file", files)
            );
        }
    }

    pub fn start_matching(&mut self, message: &str) {
        eprintln!("\n{} {}", style("🔄").yellow(), message);
        let spinner = self.create_spinner("Enumerating exchange cycles...");
        self.current_bar = Some(spinner);
    }

    pub fn finish_matching(&mut self, accepted: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        if accepted == 0 {
            eprintln!("{} No cycles accepted", style("✗").red().bold());
        } else {
            eprintln!(
                "{} Accepted {} {} {}",
                style("✓").green().bold(),
                style(accepted).green().bold(),
                pluralize("cycle", accepted),
                style("🎉").dim()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_cycles_the_configured_frames() {
        let ticks = tick_strings();

        assert_eq!(&ticks[..SPINNER_FRAMES.len()], SPINNER_FRAMES);
        assert_eq!(ticks.last(), Some(&FINISHED_FRAME));
        assert_eq!(ticks.len(), SPINNER_FRAMES.len() + 1);
    }
}
