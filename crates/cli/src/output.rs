//! Output formatting and terminal rendering
//!
//! All user-visible feedback goes through here: transient banners for command
//! outcomes and the rendered task list. Banners are transient by construction,
//! the next prompt cycle scrolls them away.

use colored::Colorize;

use crate::api::Task;

/// Output handler for terminal display
pub struct OutputHandler {
    pub show_stats: bool,
}

impl OutputHandler {
    pub fn new(show_stats: bool) -> Self {
        Self { show_stats }
    }

    /// Print the welcome banner
    pub fn print_banner(&self, server_url: &str) {
        println!();
        println!("{}", "VoxTask: voice notes to tasks".bright_cyan().bold());
        println!("{}", format!("connected to {server_url}").dimmed());
        println!();
        println!("{}", "Say or type things like:".dimmed());
        println!("  {}", "buy groceries".bright_white());
        println!("  {}", "add task call mom".bright_white());
        println!("  {}", "mark groceries as done".bright_white());
        println!();
        println!(
            "{}",
            "Type /help for commands, /quit to exit".dimmed()
        );
        println!();
    }

    /// Print a success message
    pub fn print_success(&self, text: &str) {
        println!("{} {}", "✓".bright_green(), text.bright_white());
    }

    /// Print an error message
    pub fn print_error(&self, text: &str) {
        println!("{} {}", "✗".bright_red(), text.bright_red());
    }

    /// Print a warning message
    pub fn print_warning(&self, text: &str) {
        println!("{} {}", "⚠".bright_yellow(), text.yellow());
    }

    /// Print an info message
    pub fn print_info(&self, text: &str) {
        println!("{} {}", "ℹ".bright_blue(), text.dimmed());
    }

    /// Render the task list: pending first, completed below, stats underneath.
    pub fn print_tasks(&self, tasks: &[Task]) {
        if tasks.is_empty() {
            println!();
            println!("{}", "Ready for your first task!".bright_white());
            println!(
                "{}",
                "Try \"buy groceries\" or \"call mom tomorrow\"".dimmed()
            );
            println!();
            return;
        }

        let pending: Vec<&Task> = tasks.iter().filter(|t| !t.completed).collect();
        let completed: Vec<&Task> = tasks.iter().filter(|t| t.completed).collect();

        if !pending.is_empty() {
            println!();
            println!("{}", "Pending".bright_yellow().bold());
            for task in &pending {
                println!(
                    "  {} {}  {}",
                    "○".bright_yellow(),
                    task.title.bright_white(),
                    short_id(task).dimmed()
                );
            }
        }

        if !completed.is_empty() {
            println!();
            println!("{}", "Completed".bright_green().bold());
            for task in &completed {
                println!(
                    "  {} {}  {}",
                    "●".bright_green(),
                    task.title.dimmed().strikethrough(),
                    short_id(task).dimmed()
                );
            }
        }

        if self.show_stats {
            println!();
            println!(
                "{}",
                format!(
                    "{} total · {} pending · {} completed",
                    tasks.len(),
                    pending.len(),
                    completed.len()
                )
                .dimmed()
            );
        }
        println!();
    }

    /// Print the REPL command reference
    pub fn print_help(&self) {
        println!();
        println!("{}", "Commands".bright_yellow().bold());
        println!("  {}  list all tasks", "/tasks           ".bright_white());
        println!(
            "  {}  toggle a task by id prefix",
            "/toggle <id>     ".bright_white()
        );
        println!(
            "  {}  delete a task by id prefix",
            "/delete <id>     ".bright_white()
        );
        println!(
            "  {}  remove all completed tasks",
            "/clear           ".bright_white()
        );
        println!(
            "  {}  capture one spoken command",
            "/listen          ".bright_white()
        );
        println!("  {}  this message", "/help            ".bright_white());
        println!("  {}  exit", "/quit            ".bright_white());
        println!();
        println!(
            "{}",
            "Anything else is treated as a voice-style command.".dimmed()
        );
        println!();
    }
}

fn short_id(task: &Task) -> String {
    task.id.to_string()[..8].to_string()
}
