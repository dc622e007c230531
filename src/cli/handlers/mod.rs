mod call;
pub use call::{cmd_call, run_session};

use std::error::Error;
use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, CONFIG_FILE};
use crate::io::recovery;
use crate::model::checklist::Checklist;
use crate::model::config::Config;
use crate::model::name::ChecklistName;
use crate::ops::store::ChecklistStore;

/// Settings shared by every command, resolved once per invocation
pub struct Context {
    pub config: Config,
    pub json: bool,
}

impl Context {
    fn open_store(&self) -> ChecklistStore<ChecklistName> {
        ChecklistStore::open(self.config.store.file.clone())
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    let ctx = load_context(&cli)?;

    // No subcommand lists checklists
    match cli.command.unwrap_or(Commands::List) {
        Commands::List => cmd_list(&ctx),
        Commands::Show(args) => cmd_show(&ctx, args),

        // Checklist management
        Commands::New(args) => cmd_new(&ctx, args),
        Commands::Rename(args) => cmd_rename(&ctx, args),
        Commands::Delete(args) => cmd_delete(&ctx, args),
        Commands::Refresh(args) => cmd_refresh(&ctx, args),
        Commands::Cadence(args) => cmd_cadence(&ctx, args),

        // Task commands
        Commands::Add(args) => cmd_add(&ctx, args),
        Commands::Toggle(args) => cmd_toggle(&ctx, args),
        Commands::Edit(args) => cmd_edit(&ctx, args),
        Commands::Rm(args) => cmd_rm(&ctx, args),
        Commands::Reset(args) => cmd_reset(&ctx, args),

        Commands::Call(args) => cmd_call(&ctx, args),
        Commands::Recovery(args) => cmd_recovery(&ctx, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_context(cli: &Cli) -> Result<Context, Box<dyn Error>> {
    let base = match &cli.dir {
        Some(dir) => std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
        None => std::env::current_dir()?,
    };
    let (config_path, required): (PathBuf, bool) = match &cli.config {
        Some(path) => (base.join(path), true),
        None => (base.join(CONFIG_FILE), false),
    };
    let mut config = config_io::read_config(&config_path, required)?;
    config_io::resolve_paths(&mut config, &base);
    Ok(Context {
        config,
        json: cli.json,
    })
}

/// Convert a 1-based task number from the command line to an index
pub(crate) fn task_index(number: usize) -> Result<usize, Box<dyn Error>> {
    number
        .checked_sub(1)
        .ok_or_else(|| "task numbers start at 1".into())
}

/// Print a checklist, as text or JSON
fn render(ctx: &Context, name: &str, list: &Checklist) -> Result<(), Box<dyn Error>> {
    if ctx.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&checklist_to_json(name, list, true))?
        );
    } else {
        for line in format_checklist(name, list, ctx.config.ui.show_timestamps) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn render_by_name(
    ctx: &Context,
    store: &ChecklistStore<ChecklistName>,
    name: &str,
) -> Result<(), Box<dyn Error>> {
    let list = store
        .get(name)
        .ok_or_else(|| format!("checklist not found: {}", name))?;
    render(ctx, name, list)
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(ctx: &Context) -> Result<(), Box<dyn Error>> {
    let store = ctx.open_store();
    let mut lists: Vec<(&ChecklistName, &Checklist)> = store.iter().collect();
    if ctx.config.ui.sort_checklists {
        lists.sort_by(|a, b| a.0.cmp(b.0));
    }

    if ctx.json {
        let out: Vec<ChecklistJson> = lists
            .iter()
            .map(|(name, list)| checklist_to_json(name.as_str(), list, false))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if lists.is_empty() {
        println!("no checklists yet (create one with `tl new <name>`)");
    }
    for (name, list) in lists {
        println!("{}", format_checklist_summary(name.as_str(), list));
    }
    Ok(())
}

fn cmd_show(ctx: &Context, args: NameArg) -> Result<(), Box<dyn Error>> {
    let store = ctx.open_store();
    render_by_name(ctx, &store, &args.name)
}

// ---------------------------------------------------------------------------
// Checklist management
// ---------------------------------------------------------------------------

fn cmd_new(ctx: &Context, args: NewArgs) -> Result<(), Box<dyn Error>> {
    let mut store = ctx.open_store();
    store.create_checklist_with(&args.name, args.daily, args.cadence)?;
    println!("created checklist: {}", args.name.trim());
    Ok(())
}

fn cmd_rename(ctx: &Context, args: RenameArgs) -> Result<(), Box<dyn Error>> {
    let mut store = ctx.open_store();
    store.rename_checklist(&args.old, &args.new)?;
    println!("renamed: {} -> {}", args.old, args.new.trim());
    Ok(())
}

fn cmd_delete(ctx: &Context, args: NameArg) -> Result<(), Box<dyn Error>> {
    let mut store = ctx.open_store();
    let removed = store.delete_checklist(args.name.as_str())?;
    println!(
        "deleted checklist: {} ({} tasks, copy kept in recovery log)",
        args.name,
        removed.tasks.len()
    );
    Ok(())
}

fn cmd_refresh(ctx: &Context, args: RefreshArgs) -> Result<(), Box<dyn Error>> {
    let mut store = ctx.open_store();
    let enabled = matches!(args.state, Switch::On);
    store.set_daily_refresh(args.name.as_str(), enabled)?;
    println!(
        "daily refresh {} for {}",
        if enabled { "on" } else { "off" },
        args.name
    );
    Ok(())
}

fn cmd_cadence(ctx: &Context, args: CadenceArgs) -> Result<(), Box<dyn Error>> {
    let mut store = ctx.open_store();
    store.set_cadence(args.name.as_str(), args.cadence)?;
    match args.cadence {
        Some(c) => println!("{}: {}", args.name, c),
        None => println!("{}: cadence cleared", args.name),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

fn cmd_add(ctx: &Context, args: AddArgs) -> Result<(), Box<dyn Error>> {
    let mut store = ctx.open_store();
    store.add_task(args.name.as_str(), &args.text)?;
    render_by_name(ctx, &store, &args.name)
}

fn cmd_toggle(ctx: &Context, args: TaskArg) -> Result<(), Box<dyn Error>> {
    let mut store = ctx.open_store();
    store.toggle_task(args.name.as_str(), task_index(args.number)?)?;
    render_by_name(ctx, &store, &args.name)
}

fn cmd_edit(ctx: &Context, args: EditArgs) -> Result<(), Box<dyn Error>> {
    let mut store = ctx.open_store();
    store.edit_task_text(args.name.as_str(), task_index(args.number)?, &args.text)?;
    render_by_name(ctx, &store, &args.name)
}

fn cmd_rm(ctx: &Context, args: TaskArg) -> Result<(), Box<dyn Error>> {
    let mut store = ctx.open_store();
    store.delete_task(args.name.as_str(), task_index(args.number)?)?;
    render_by_name(ctx, &store, &args.name)
}

fn cmd_reset(ctx: &Context, args: NameArg) -> Result<(), Box<dyn Error>> {
    let mut store = ctx.open_store();
    store.reset_checklist(args.name.as_str())?;
    render_by_name(ctx, &store, &args.name)
}

// ---------------------------------------------------------------------------
// Recovery
// ---------------------------------------------------------------------------

fn cmd_recovery(ctx: &Context, args: RecoveryArgs) -> Result<(), Box<dyn Error>> {
    let dir = recovery::store_dir(&ctx.config.store.file);

    if args.prune {
        let removed = recovery::prune_recovery(dir, None, args.all)?;
        println!("pruned {} recovery entries", removed);
        return Ok(());
    }

    let entries = recovery::read_recovery_entries(dir, Some(args.limit));
    if ctx.json {
        let out: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("recovery log is empty");
    }
    for entry in entries {
        print!("{}", entry.to_display_markdown());
    }
    Ok(())
}
