//! Interactive REPL
//!
//! Free-form lines are utterances run through the command interpreter;
//! `/`-commands address tasks directly by id prefix.

use anyhow::Result;
use colored::Colorize;
use rustyline::{error::ReadlineError, history::DefaultHistory, Editor};
use services::services::capture::{CaptureError, CaptureSession};
use uuid::Uuid;

use crate::{
    api::ApiClient, config::Config, output::OutputHandler, recognizer::TypedRecognizer,
    session::CommandSession,
};

pub struct VoxRepl {
    api: ApiClient,
    config: Config,
    output: OutputHandler,
    editor: Editor<(), DefaultHistory>,
    session: CommandSession,
    voice_enabled: bool,
}

impl VoxRepl {
    pub fn new(api: ApiClient, config: Config) -> Result<Self> {
        let output = OutputHandler::new(config.display.show_stats);
        let editor = Editor::new()?;
        Ok(Self {
            api,
            config,
            output,
            editor,
            session: CommandSession::new(),
            voice_enabled: true,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        if self.config.display.show_banner {
            self.output.print_banner(&self.config.server.url);
        }

        if !self.api.health_check().await? {
            self.output.print_warning(&format!(
                "Server not reachable at {} - commands will fail until it is up",
                self.config.server.url
            ));
        } else {
            // Best-effort connectivity ping; the server keeps the record.
            let _ = self.api.post_status_check("vox-cli").await;
        }

        match self.api.list_tasks().await {
            Ok(tasks) => self.output.print_tasks(&tasks),
            Err(_) => self.output.print_error("Error loading tasks"),
        }

        loop {
            let prompt = format!("{} ", "vox>".bright_cyan());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(input);

                    if input.starts_with('/') {
                        match self.handle_command(input).await {
                            Ok(should_exit) => {
                                if should_exit {
                                    break;
                                }
                            }
                            Err(e) => self.output.print_error(&format!("{e:#}")),
                        }
                    } else {
                        self.session
                            .run_utterance(&self.api, &self.output, input)
                            .await?;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    self.output.print_error(&format!("Input error: {e}"));
                    break;
                }
            }
        }

        self.output.print_info("Goodbye");
        Ok(())
    }

    async fn handle_command(&mut self, input: &str) -> Result<bool> {
        let mut parts = input.splitn(2, ' ');
        let command = parts.next().unwrap_or("");
        let arg = parts.next().map(str::trim).unwrap_or("");

        match command {
            "/quit" | "/exit" | "/q" => return Ok(true),
            "/help" | "/h" => self.output.print_help(),
            "/tasks" | "/t" => match self.api.list_tasks().await {
                Ok(tasks) => self.output.print_tasks(&tasks),
                Err(e) => self.output.print_error(&format!("Error loading tasks: {e}")),
            },
            "/toggle" => {
                if let Some(id) = self.resolve_task_id(arg).await? {
                    self.session.toggle(&self.api, &self.output, id).await?;
                }
            }
            "/delete" => {
                if let Some(id) = self.resolve_task_id(arg).await? {
                    self.session.delete(&self.api, &self.output, id).await?;
                }
            }
            "/clear" => {
                self.session
                    .clear_completed(&self.api, &self.output)
                    .await?;
            }
            "/listen" => self.listen().await?,
            _ => self
                .output
                .print_warning(&format!("Unknown command: {command} (try /help)")),
        }
        Ok(false)
    }

    /// One single-shot capture through the recognition engine, then dispatch.
    async fn listen(&mut self) -> Result<()> {
        if !self.voice_enabled {
            self.output
                .print_info("Voice controls are disabled for this session");
            return Ok(());
        }

        let mut recognizer = TypedRecognizer::from_stdin()?;
        let mut capture = CaptureSession::new();
        match capture.run(&mut recognizer) {
            Ok(Some(utterance)) => {
                self.output.print_info(&format!("You said: \"{utterance}\""));
                self.session
                    .run_utterance(&self.api, &self.output, &utterance)
                    .await?;
            }
            Ok(None) => self.output.print_info("Nothing captured"),
            Err(CaptureError::Unavailable) => {
                // Surfaced once; voice controls stay off from here on.
                self.voice_enabled = false;
                self.output
                    .print_error("Speech recognition is not available");
            }
            Err(e) => self.output.print_error(&e.to_string()),
        }
        Ok(())
    }

    /// Accept a full uuid or a unique id prefix from the current snapshot.
    async fn resolve_task_id(&self, prefix: &str) -> Result<Option<Uuid>> {
        if prefix.is_empty() {
            self.output.print_warning("Usage: /toggle <id> or /delete <id>");
            return Ok(None);
        }
        if let Ok(id) = Uuid::parse_str(prefix) {
            return Ok(Some(id));
        }

        let needle = prefix.to_lowercase();
        let tasks = self.api.list_tasks().await?;
        let matches: Vec<Uuid> = tasks
            .iter()
            .filter(|t| t.id.to_string().starts_with(&needle))
            .map(|t| t.id)
            .collect();

        match matches.len() {
            0 => {
                self.output.print_error("No task with that id");
                Ok(None)
            }
            1 => Ok(Some(matches[0])),
            _ => {
                self.output
                    .print_warning("Ambiguous id prefix, give a few more characters");
                Ok(None)
            }
        }
    }
}
