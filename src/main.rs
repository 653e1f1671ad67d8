//! Teda - command-line front end for the kanban to-do board.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use teda_board::{
    interaction::Submitted, logging::init_logging, storage::file_storage::FileStorage,
    BoardController, BoardService, BoardStore, BoardView, ColumnId, Confirm, Filters, Outcome,
    Priority, PriorityFilter, RenderTarget, StoreConfig, SystemClock, TaskId,
};

/// Single-user kanban to-do board stored as one JSON file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the board file (env: TEDA_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storage key, used as the board file name (env: TEDA_STORAGE_KEY)
    #[arg(long, global = true)]
    key: Option<String>,

    /// Skip confirmation prompts
    #[arg(short, long, global = true)]
    yes: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the board
    List {
        /// Case-insensitive text to find in titles and notes
        #[arg(long, default_value = "")]
        search: String,
        /// all, low, medium or high
        #[arg(long, default_value = "all")]
        priority: PriorityFilter,
    },
    /// Add a task
    Add {
        title: String,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Column id (todo, inprogress, done)
        #[arg(long)]
        column: Option<String>,
    },
    /// Edit a task's title, notes or priority
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Mark a task done
    Done { id: String },
    /// Mark a task not done
    Undone { id: String },
    /// Move a task to a column
    Move { id: String, column: String },
    /// Move a task one column left
    Left { id: String },
    /// Move a task one column right
    Right { id: String },
    /// Delete a task
    Delete { id: String },
    /// Remove all completed tasks
    ClearCompleted,
}

/// Asks on stdin, unless `--yes` was given
struct PromptConfirm {
    assume_yes: bool,
}

impl Confirm for PromptConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{prompt} [y/N] ");
        io::stderr().flush().ok();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

/// Prints each rendered board as plain text
struct TextRenderer;

impl RenderTarget for TextRenderer {
    fn render(&mut self, view: &BoardView) {
        print!("{}", format_board(view));
    }
}

fn format_board(view: &BoardView) -> String {
    let mut out = String::new();
    for column in &view.columns {
        if column.visible_count == column.count {
            out.push_str(&format!("== {} ({}) ==\n", column.title, column.count));
        } else {
            out.push_str(&format!(
                "== {} ({}, {} shown) ==\n",
                column.title, column.count, column.visible_count
            ));
        }
        for task in &column.tasks {
            let mark = if task.done { "x" } else { " " };
            out.push_str(&format!(
                "  [{}] {}  ({})  {}  {}\n",
                mark, task.title, task.priority, task.id, task.created
            ));
            if !task.notes.is_empty() {
                out.push_str(&format!("      {}\n", task.notes));
            }
        }
        out.push('\n');
    }
    out
}

fn store_config(args: &Args) -> Result<StoreConfig> {
    let mut config = StoreConfig::from_env()?;
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(key) = &args.key {
        config.storage_key = key.clone();
    }
    Ok(StoreConfig::new(config.data_dir, config.storage_key)?)
}

fn report(outcome: Outcome, id: &TaskId) -> Result<()> {
    match outcome {
        Outcome::Applied => Ok(()),
        Outcome::NotFound => bail!("task not found: {id}"),
        Outcome::Declined => {
            eprintln!("cancelled");
            Ok(())
        }
        Outcome::Unchanged => {
            eprintln!("{id} is already at the edge of the board");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = store_config(&args)?;
    let store = BoardStore::new(FileStorage::new(&config.data_dir), config.storage_key);
    let service = BoardService::open(
        store,
        SystemClock,
        PromptConfirm {
            assume_yes: args.yes,
        },
    )
    .await;
    let mut ctl = BoardController::new(service, TextRenderer);

    match args.command.unwrap_or(Command::List {
        search: String::new(),
        priority: PriorityFilter::All,
    }) {
        Command::List { search, priority } => {
            ctl.set_filters(Filters::new(search, priority));
        }
        Command::Add {
            title,
            notes,
            priority,
            column,
        } => {
            let mut form = ctl.open_new(column.map(ColumnId::new));
            form.title = title;
            form.notes = notes;
            form.priority = priority;
            if let Submitted::Created(id) = ctl.submit(form).await {
                eprintln!("created {id}");
            }
        }
        Command::Edit {
            id,
            title,
            notes,
            priority,
        } => {
            let id = TaskId::new(id);
            let Some(mut form) = ctl.open_edit(&id) else {
                bail!("task not found: {id}");
            };
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(notes) = notes {
                form.notes = notes;
            }
            if let Some(priority) = priority {
                form.priority = priority;
            }
            if let Submitted::Updated(outcome) = ctl.submit(form).await {
                report(outcome, &id)?;
            }
        }
        Command::Done { id } => {
            let id = TaskId::new(id);
            report(ctl.set_done(&id, true).await, &id)?;
        }
        Command::Undone { id } => {
            let id = TaskId::new(id);
            report(ctl.set_done(&id, false).await, &id)?;
        }
        Command::Move { id, column } => {
            let id = TaskId::new(id);
            report(ctl.drop_on(ColumnId::new(column), Some(id.clone())).await, &id)?;
        }
        Command::Left { id } => {
            let id = TaskId::new(id);
            report(ctl.move_left(&id).await, &id)?;
        }
        Command::Right { id } => {
            let id = TaskId::new(id);
            report(ctl.move_right(&id).await, &id)?;
        }
        Command::Delete { id } => {
            let id = TaskId::new(id);
            report(ctl.delete(&id).await, &id)?;
        }
        Command::ClearCompleted => match ctl.clear_completed().await {
            Some(removed) => eprintln!("removed {removed} completed task(s)"),
            None => eprintln!("cancelled"),
        },
    }

    if !ctl.service().last_save_ok() {
        bail!("board could not be saved to {}", config.data_dir.display());
    }
    Ok(())
}
