use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::model::checklist::Cadence;
use crate::model::slot::{CallCategory, CallMode};

#[derive(Parser)]
#[command(name = "tl", about = concat!("[x] ticklist v", env!("CARGO_PKG_VERSION"), " - checklists that reset themselves"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,

    /// Config file (default: ./ticklist.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List checklists with their progress
    List,
    /// Show the tasks of a checklist
    Show(NameArg),
    /// Create a new checklist
    New(NewArgs),
    /// Rename a checklist
    Rename(RenameArgs),
    /// Delete a checklist
    Delete(NameArg),
    /// Turn daily refresh on or off
    Refresh(RefreshArgs),
    /// Set or clear the informational cadence tag
    Cadence(CadenceArgs),
    /// Add a task to a checklist
    Add(AddArgs),
    /// Toggle a task done / not done
    Toggle(TaskArg),
    /// Change a task's text
    Edit(EditArgs),
    /// Remove a task
    Rm(TaskArg),
    /// Mark every task in a checklist not done
    Reset(NameArg),
    /// Work through a call checklist interactively (reads commands from stdin)
    Call(CallArgs),
    /// View or prune the recovery log
    Recovery(RecoveryArgs),
}

#[derive(Args)]
pub struct NameArg {
    /// Checklist name
    pub name: String,
}

#[derive(Args)]
pub struct NewArgs {
    /// Checklist name
    pub name: String,
    /// Clear completion the first time the checklist is opened each day
    #[arg(long)]
    pub daily: bool,
    /// Cadence tag (one-off, daily, weekly, monthly)
    #[arg(long)]
    pub cadence: Option<Cadence>,
}

#[derive(Args)]
pub struct RenameArgs {
    /// Current name
    pub old: String,
    /// New name
    pub new: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

#[derive(Args)]
pub struct RefreshArgs {
    /// Checklist name
    pub name: String,
    /// on or off
    pub state: Switch,
}

#[derive(Args)]
pub struct CadenceArgs {
    /// Checklist name
    pub name: String,
    /// Cadence tag (one-off, daily, weekly, monthly); omit to clear
    pub cadence: Option<Cadence>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Checklist name
    pub name: String,
    /// Task text
    pub text: String,
}

#[derive(Args)]
pub struct TaskArg {
    /// Checklist name
    pub name: String,
    /// Task number (1-based, as shown by `tl show`)
    pub number: usize,
}

#[derive(Args)]
pub struct EditArgs {
    /// Checklist name
    pub name: String,
    /// Task number (1-based)
    pub number: usize,
    /// New task text
    pub text: String,
}

#[derive(Args)]
pub struct CallArgs {
    /// Call category (sales, reengagement, followup, at-risk, support, introduction)
    pub category: CallCategory,
    /// Call mode (voicemail, start-call)
    pub mode: CallMode,
}

#[derive(Args)]
pub struct RecoveryArgs {
    /// Maximum number of entries to show
    #[arg(long, default_value = "10")]
    pub limit: usize,
    /// Remove entries older than 30 days
    #[arg(long)]
    pub prune: bool,
    /// With --prune, remove every entry
    #[arg(long, requires = "prune")]
    pub all: bool,
}
