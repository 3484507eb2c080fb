//! Command line definitions for the `oasis` binary.

use clap::{Parser, Subcommand, ValueEnum};
use oasis_memory::AutoRun;
use oasis_tasks::{Priority, TaskStatus};
use oasis_tools::ToolKind;
use std::path::PathBuf;

/// Oasis - a simulated agent that turns chat into tasks on a board.
///
/// Without a command, starts the interactive console.
#[derive(Parser, Debug)]
#[command(name = "oasis")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the state document and config.
    #[arg(short = 'd', long = "data-dir", global = true, env = "OASIS_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Config file (defaults to <data-dir>/config.yaml).
    #[arg(short = 'c', long = "config", global = true, env = "OASIS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive console (default)
    Repl,

    /// Send one chat message, as if typed into the console
    Chat {
        /// Message text; slash commands such as `/task` work here too
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Task management commands
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Print the board
    Board,

    /// Print recent log entries
    Logs {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,

        /// Empty the log instead of printing it
        #[arg(long)]
        clear: bool,
    },

    /// Run the agent on the next task
    Run,

    /// Tool flag commands
    Tool {
        #[command(subcommand)]
        command: ToolCommands,
    },

    /// Show or change agent settings
    Settings {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        brief: Option<String>,

        #[arg(long, value_enum)]
        auto_run: Option<AutoRunArg>,
    },

    /// Write a JSON snapshot of the whole state
    Export {
        /// Target directory (defaults to the data directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Delete the stored state and start over
    Reset,

    /// Show counters
    Status,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a task
    Add {
        title: String,

        #[arg(short, long, default_value = "P3")]
        priority: Priority,

        #[arg(short, long, default_value = "")]
        notes: String,
    },

    /// Move a task to another column
    Move {
        /// Task id or unique id prefix
        id: String,
        status: TaskStatus,
    },

    /// Delete a task
    Rm {
        /// Task id or unique id prefix
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ToolCommands {
    /// List tools and their flags
    List,
    Enable { tool: ToolKind },
    Disable { tool: ToolKind },
    /// Trigger the tool's simulated action
    Simulate { tool: ToolKind },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AutoRunArg {
    On,
    Off,
}

impl From<AutoRunArg> for AutoRun {
    fn from(arg: AutoRunArg) -> Self {
        match arg {
            AutoRunArg::On => AutoRun::On,
            AutoRunArg::Off => AutoRun::Off,
        }
    }
}
