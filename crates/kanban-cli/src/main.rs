mod commands;
mod render;
mod theme;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use commands::Command;
use crossterm::{cursor, execute, terminal};
use kanban_core::{cleanup, layout, Board, TaskStatus};
use kanban_storage::TaskFileStore;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use theme::Theme;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "Terminal kanban board", long_about = None)]
struct Cli {
    /// Tasks file (defaults to .kanban/tasks.json; KANBAN_FILE overrides)
    #[arg(long)]
    file: Option<PathBuf>,
    /// Disable colored output
    #[arg(long)]
    plain: bool,
    /// Pin the board width instead of probing the terminal
    #[arg(long)]
    width: Option<usize>,
}

enum LoopExit {
    Quit,
    Interrupted,
}

enum Step {
    Notice(Option<String>),
    Exit(LoopExit),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let path = resolve_tasks_path(cli.file);
    let store = TaskFileStore::new(&path);
    let tasks = store
        .load()
        .with_context(|| format!("failed to load {}", path.display()))?;
    let mut board = Board::from_tasks(tasks);
    info!(path = %path.display(), tasks = board.len(), "board loaded");

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&interrupted);
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
            .context("failed to install interrupt handler")?;
    }

    let theme = Theme::detect(cli.plain);
    let alt_screen = alt_screen_enabled();
    if alt_screen {
        enter_alt_screen()?;
    }
    let result = run(&mut board, &store, &theme, cli.width, &interrupted);
    if alt_screen {
        leave_alt_screen()?;
    }

    // Final persist: the one step guaranteed on every exit path,
    // interrupts included.
    cleanup::run_cycle(&mut board, Utc::now());
    if let Err(err) = store.save(board.all_tasks()) {
        warn!(error = %err, "final save failed");
        eprintln!("Warning: could not save tasks: {err}");
    }

    match result? {
        LoopExit::Quit => println!("Goodbye."),
        LoopExit::Interrupted => println!("Interrupted. Goodbye."),
    }
    Ok(())
}

/// One command per iteration, to completion: cleanup and renumber, then
/// persist, then render, then read and apply the next command. A bare
/// redraw goes through the same full cycle.
fn run(
    board: &mut Board,
    store: &TaskFileStore,
    theme: &Theme,
    pinned_width: Option<usize>,
    interrupted: &AtomicBool,
) -> Result<LoopExit> {
    let mut notice: Option<String> = None;
    loop {
        if interrupted.load(Ordering::SeqCst) {
            return Ok(LoopExit::Interrupted);
        }

        let removed = cleanup::run_cycle(board, Utc::now());
        if removed > 0 {
            info!(removed, "pruned stale done tasks");
        }
        if let Err(err) = store.save(board.all_tasks()) {
            warn!(error = %err, "save failed; board kept in memory");
            notice = Some(format!("Warning: could not save tasks: {err}"));
        }

        clear_screen()?;
        println!("Kanban Board:");
        let snapshot = layout::layout(board, probe_width(pinned_width));
        for line in render::render_board(&snapshot, theme) {
            println!("{line}");
        }
        if let Some(message) = notice.take() {
            println!("\n{message}");
        }

        let Some(line) = read_line("\n: ", interrupted)? else {
            return Ok(exit_reason(interrupted));
        };
        match commands::parse(&line) {
            Ok(Command::Redraw) => {}
            Ok(Command::Exit) => return Ok(LoopExit::Quit),
            Ok(Command::Help) => {
                if !show_help(interrupted)? {
                    return Ok(exit_reason(interrupted));
                }
            }
            Ok(command) => match apply_command(board, command, interrupted)? {
                Step::Exit(reason) => return Ok(reason),
                Step::Notice(message) => notice = message,
            },
            Err(message) => notice = Some(message),
        }
    }
}

fn apply_command(board: &mut Board, command: Command, interrupted: &AtomicBool) -> Result<Step> {
    let now = Utc::now();
    match command {
        Command::Add(Some(title)) => Ok(Step::Notice(add_task(board, &title, now))),
        Command::Add(None) => {
            let Some(title) = read_line("Enter task title: ", interrupted)? else {
                return Ok(Step::Exit(exit_reason(interrupted)));
            };
            Ok(Step::Notice(add_task(board, &title, now)))
        }
        Command::Move { id, status } => Ok(Step::Notice(move_task(board, id, status, now))),
        Command::MovePrompt => {
            let Some(raw_id) = read_line("Enter task id: ", interrupted)? else {
                return Ok(Step::Exit(exit_reason(interrupted)));
            };
            let Ok(id) = raw_id.trim_end_matches('.').parse::<u64>() else {
                return Ok(Step::Notice(Some("Invalid id.".to_string())));
            };
            let Some(raw_status) =
                read_line("Enter new status (todo/in-progress/done or t/ip/d): ", interrupted)?
            else {
                return Ok(Step::Exit(exit_reason(interrupted)));
            };
            let Some(status) = commands::parse_status(&raw_status) else {
                return Ok(Step::Notice(Some("Invalid status.".to_string())));
            };
            Ok(Step::Notice(move_task(board, id, status, now)))
        }
        Command::Remove(Some(id)) => Ok(Step::Notice(remove_task(board, id))),
        Command::Remove(None) => {
            let Some(raw_id) = read_line("Enter task id to remove: ", interrupted)? else {
                return Ok(Step::Exit(exit_reason(interrupted)));
            };
            let Ok(id) = raw_id.trim_end_matches('.').parse::<u64>() else {
                return Ok(Step::Notice(Some("Invalid id.".to_string())));
            };
            Ok(Step::Notice(remove_task(board, id)))
        }
        // Handled by the caller before dispatch.
        Command::Redraw | Command::Help | Command::Exit => Ok(Step::Notice(None)),
    }
}

fn add_task(board: &mut Board, title: &str, now: DateTime<Utc>) -> Option<String> {
    match board.add(title, now) {
        Ok(task) => {
            info!(id = task.id, "added task");
            None
        }
        Err(err) => {
            warn!(error = %err, "add rejected");
            Some(err.to_string())
        }
    }
}

/// Successful moves redraw silently; only errors surface as notices.
fn move_task(board: &mut Board, id: u64, status: TaskStatus, now: DateTime<Utc>) -> Option<String> {
    match board.move_task(id, status, now) {
        Ok(task) => {
            info!(id = task.id, status = %task.status, "moved task");
            None
        }
        Err(err) => {
            warn!(id, error = %err, "move rejected");
            Some(err.to_string())
        }
    }
}

fn remove_task(board: &mut Board, id: u64) -> Option<String> {
    match board.remove(id) {
        Ok(task) => {
            info!(id, title = %task.title, "removed task");
            Some(format!("Task {id} removed."))
        }
        Err(err) => {
            warn!(id, error = %err, "remove rejected");
            Some(err.to_string())
        }
    }
}

fn show_help(interrupted: &AtomicBool) -> Result<bool> {
    clear_screen()?;
    for line in commands::help_lines() {
        println!("{line}");
    }
    Ok(read_line("\nPress Enter to return to the board...", interrupted)?.is_some())
}

fn read_line(prompt: &str, interrupted: &AtomicBool) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    read_trimmed(&mut io::stdin().lock(), interrupted)
}

/// Blocking stdin reads are restarted by the runtime when a signal
/// lands, so Ctrl-C surfaces only once the pending line completes
/// (Enter or EOF). The flag check turns that line into an exit; the
/// board was already persisted before the prompt, so nothing is lost
/// in the meantime.
fn read_trimmed(reader: &mut impl BufRead, interrupted: &AtomicBool) -> Result<Option<String>> {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => Ok(None),
        Ok(_) if interrupted.load(Ordering::SeqCst) => Ok(None),
        Ok(_) => Ok(Some(line.trim().to_string())),
        Err(err) => Err(err.into()),
    }
}

fn exit_reason(interrupted: &AtomicBool) -> LoopExit {
    if interrupted.load(Ordering::SeqCst) {
        LoopExit::Interrupted
    } else {
        LoopExit::Quit
    }
}

/// Live terminal width, re-probed on every redraw; `--width` pins it and
/// an unprobeable terminal falls back to a fixed default.
fn probe_width(pinned: Option<usize>) -> usize {
    if let Some(width) = pinned {
        return width;
    }
    terminal::size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(layout::FALLBACK_WIDTH)
}

fn clear_screen() -> Result<()> {
    // Purge scrollback before clearing; covers terminals without the
    // alternate screen.
    execute!(
        io::stdout(),
        terminal::Clear(terminal::ClearType::Purge),
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0),
    )?;
    Ok(())
}

fn enter_alt_screen() -> Result<()> {
    execute!(io::stdout(), terminal::EnterAlternateScreen)?;
    Ok(())
}

fn leave_alt_screen() -> Result<()> {
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    Ok(())
}

/// Alternate screen is on by default; KANBAN_ALT_SCREEN=0/false/no/off
/// disables it.
fn alt_screen_enabled() -> bool {
    match std::env::var("KANBAN_ALT_SCREEN").ok() {
        Some(value) => env_truthy(&value),
        None => true,
    }
}

fn env_truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "off" | ""
    )
}

fn resolve_tasks_path(flag: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    if let Ok(value) = std::env::var("KANBAN_FILE") {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    PathBuf::from(".kanban/tasks.json")
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_enabled = matches!(
        std::env::var("KANBAN_LOG_STDOUT").ok().as_deref(),
        Some("1") | Some("true") | Some("TRUE") | Some("yes") | Some("YES")
    );
    if stdout_enabled {
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .try_init();
    }
}
