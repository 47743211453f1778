//! Interactive chat REPL for a creative session

use crate::render::{GenerationProgressBar, render_events};
use anyhow::Result;
use atelier_application::{
    GenerationGateway, ImageQueue, Orchestrator, OrchestratorError, RunGenerationUseCase,
};
use atelier_infrastructure::{Txt2ImgParams, build_txt2img_workflow};
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Run one full round for `message`, rendering events to the console.
pub async fn run_round<G: GenerationGateway>(
    orchestrator: &mut Orchestrator<G>,
    message: &str,
) -> Result<()> {
    let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let renderer = tokio::spawn(render_events(rx));

    let result = orchestrator.process_user_message(message, &tx).await;
    drop(tx);
    renderer.await?;

    match result {
        Ok(()) => Ok(()),
        Err(OrchestratorError::Generation { role, source }) => {
            eprintln!(
                "{}",
                format!("{} failed to respond: {source}", role.display_name()).red()
            );
            // The round is aborted but the session stays usable.
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Interactive chat session
pub struct ChatRepl<G: GenerationGateway, Q: ImageQueue> {
    orchestrator: Orchestrator<G>,
    generation: RunGenerationUseCase<Q>,
}

impl<G: GenerationGateway, Q: ImageQueue> ChatRepl<G, Q> {
    pub fn new(orchestrator: Orchestrator<G>, generation: RunGenerationUseCase<Q>) -> Self {
        Self {
            orchestrator,
            generation,
        }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("atelier").join("history.txt"));
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line).await {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    run_round(&mut self.orchestrator, line).await?;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {err:?}");
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "atelier - creative session".bold());
        println!(
            "Phase: {} | type a brief to begin, /help for commands",
            self.orchestrator.phase().display_name().cyan()
        );
        println!();
    }

    /// Handle a slash command; returns true to exit the REPL.
    async fn handle_command(&mut self, line: &str) -> bool {
        let (command, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match command {
            "/quit" | "/exit" => return true,
            "/phase" => {
                println!(
                    "Phase: {} (round {})",
                    self.orchestrator.phase().display_name().cyan(),
                    self.orchestrator.round_count()
                );
            }
            "/advance" => {
                let phase = self.orchestrator.advance_phase();
                println!("Phase: {}", phase.display_name().cyan());
            }
            "/inject" => {
                if rest.is_empty() {
                    println!("Usage: /inject <message>");
                } else {
                    self.orchestrator.inject_user_message(rest);
                    println!("{}", "noted (no round triggered)".dimmed());
                }
            }
            "/generate" => {
                if rest.is_empty() {
                    println!("Usage: /generate <prompt>");
                } else {
                    self.run_generation(rest).await;
                }
            }
            "/history" => {
                for turn in self.orchestrator.history().turns() {
                    println!("{}", turn.render());
                }
            }
            "/help" => {
                println!("/phase     show current phase and round");
                println!("/advance   advance to the next phase");
                println!("/inject    add a note to history without a round");
                println!("/generate  queue an image for the given prompt");
                println!("/history   print the conversation so far");
                println!("/quit      exit");
            }
            other => {
                println!("Unknown command: {other} (try /help)");
            }
        }

        false
    }

    async fn run_generation(&mut self, prompt: &str) {
        let workflow = build_txt2img_workflow(&Txt2ImgParams::new(prompt));
        let progress = GenerationProgressBar::new();

        let outputs = match self
            .generation
            .execute_with_progress(&workflow, &progress)
            .await
        {
            Ok(outputs) => outputs,
            Err(e) => {
                eprintln!("{}", format!("generation failed: {e}").red());
                return;
            }
        };

        match self.generation.download_outputs(&outputs).await {
            Ok(images) => {
                let dir = std::path::Path::new("atelier-output");
                if let Err(e) = std::fs::create_dir_all(dir) {
                    eprintln!("{}", format!("cannot create {}: {e}", dir.display()).red());
                    return;
                }
                for (filename, bytes) in images {
                    let path = dir.join(&filename);
                    match std::fs::write(&path, bytes) {
                        Ok(()) => println!("{} {}", "saved".green(), path.display()),
                        Err(e) => eprintln!("{}", format!("cannot write {filename}: {e}").red()),
                    }
                }
            }
            Err(e) => eprintln!("{}", format!("download failed: {e}").red()),
        }
    }
}
