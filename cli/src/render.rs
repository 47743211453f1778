//! Console rendering of the orchestrator event stream

use atelier_application::ports::image_queue::JobHandle;
use atelier_application::GenerationProgressNotifier;
use atelier_domain::SessionEvent;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::io::Write;
use tokio::sync::mpsc;

/// Drain session events and print them as they arrive.
///
/// Fragments are flushed immediately so specialist responses appear to
/// type themselves out.
pub async fn render_events(mut rx: mpsc::Receiver<SessionEvent>) {
    while let Some(event) = rx.recv().await {
        match event {
            SessionEvent::UserMessage { .. } => {
                // The user just typed it; no need to echo.
            }
            SessionEvent::SpecialistTurnStarted { role, display_name } => {
                println!();
                println!(
                    "{} {}",
                    format!("[{display_name}]").bold().cyan(),
                    format!("({role})").dimmed()
                );
            }
            SessionEvent::SpecialistTurnProgress { fragment, .. } => {
                print!("{fragment}");
                let _ = std::io::stdout().flush();
            }
            SessionEvent::SpecialistTurnFinished { .. } => {
                println!();
            }
            SessionEvent::PhaseChanged { phase } => {
                println!();
                println!(
                    "{}",
                    format!("=== Phase: {} ===", phase.display_name())
                        .bold()
                        .yellow()
                );
            }
        }
    }
}

/// Progress bar for an in-flight image generation job
pub struct GenerationProgressBar {
    bar: ProgressBar,
}

impl GenerationProgressBar {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} rendering [{bar:40.cyan/blue}] {pos}% {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        Self { bar }
    }
}

impl Default for GenerationProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationProgressNotifier for GenerationProgressBar {
    fn on_queued(&self, job: &JobHandle) {
        self.bar.set_message(format!("job {}", job.id()));
    }

    fn on_progress(&self, percent: u32) {
        self.bar.set_position(percent as u64);
    }

    fn on_complete(&self, _outputs: &Value) {
        self.bar.finish_with_message("done");
    }
}
