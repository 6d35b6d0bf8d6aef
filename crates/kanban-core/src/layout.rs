//! Board layout: column widths, title wrapping, and lockstep row
//! assembly. Pure with respect to its inputs so renders are fully
//! deterministic under a fixed width.
//!
//! Output is structured (prefix / body / suffix cells) rather than
//! pre-joined text; the presenter pads on these plain widths and can
//! colorize without ever re-measuring escape codes.

use crate::{Board, Task, TaskStatus, STATUSES};

/// Inter-column separator.
pub const SEP: &str = " | ";
/// Width assumed when the terminal geometry cannot be probed.
pub const FALLBACK_WIDTH: usize = 120;
/// Completion marker glyph for Done tasks.
pub const DONE_MARK: &str = "\u{2713}";

const EMPTY_PLACEHOLDER: &str = "(empty)";

/// One visual line inside a column cell.
///
/// `prefix` carries the id label on a task's first line and an equal-width
/// space indent on continuations, keeping wrapped text aligned under the
/// title start. `suffix` carries the completion marker, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellLine {
    pub prefix: String,
    pub body: String,
    pub suffix: String,
    pub placeholder: bool,
}

impl CellLine {
    fn task(prefix: String, body: String) -> Self {
        Self {
            prefix,
            body,
            suffix: String::new(),
            placeholder: false,
        }
    }

    fn placeholder(body: String) -> Self {
        Self {
            prefix: String::new(),
            body,
            suffix: String::new(),
            placeholder: true,
        }
    }

    /// Visible width in terminal cells.
    pub fn width(&self) -> usize {
        char_width(&self.prefix) + char_width(&self.body) + char_width(&self.suffix)
    }
}

#[derive(Debug, Clone)]
pub struct ColumnLayout {
    pub status: TaskStatus,
    pub width: usize,
    pub lines: Vec<CellLine>,
}

#[derive(Debug, Clone)]
pub struct BoardLayout {
    pub columns: [ColumnLayout; 3],
}

impl BoardLayout {
    /// Number of lockstep data rows (longest column wins).
    pub fn rows(&self) -> usize {
        self.columns
            .iter()
            .map(|column| column.lines.len())
            .max()
            .unwrap_or(0)
    }

    /// Total rendered width including separators.
    pub fn total_width(&self) -> usize {
        let columns: usize = self.columns.iter().map(|column| column.width).sum();
        columns + SEP.len() * (self.columns.len() - 1)
    }
}

/// Compute the board snapshot for the current terminal width. Width is an
/// explicit input; callers re-probe the terminal on every redraw.
pub fn layout(board: &Board, terminal_width: usize) -> BoardLayout {
    let widths = column_widths(terminal_width);
    let columns = [0, 1, 2].map(|idx| {
        let status = STATUSES[idx];
        build_column(&board.tasks_with_status(status), status, widths[idx])
    });
    BoardLayout { columns }
}

/// Split the available width (terminal minus separators) evenly across
/// the three columns; the leftmost columns absorb the remainder, so the
/// consumed width never exceeds the terminal width.
fn column_widths(terminal_width: usize) -> [usize; 3] {
    let sep_total = SEP.len() * (STATUSES.len() - 1);
    let available = terminal_width.saturating_sub(sep_total).max(STATUSES.len());
    let base = available / 3;
    let remainder = available % 3;
    let mut widths = [base; 3];
    for width in widths.iter_mut().take(remainder) {
        *width += 1;
    }
    widths
}

fn build_column(tasks: &[&Task], status: TaskStatus, width: usize) -> ColumnLayout {
    let mut lines = Vec::new();
    if tasks.is_empty() {
        // The placeholder wraps like any other content in columns
        // narrower than it.
        for body in wrap_words(EMPTY_PLACEHOLDER, width.max(1)) {
            lines.push(CellLine::placeholder(body));
        }
    } else {
        for task in tasks {
            lines.extend(wrap_task(task, width));
        }
    }
    ColumnLayout {
        status,
        width,
        lines,
    }
}

/// Wrap one task into cell lines. The id label occupies the first line
/// only; continuations are indented by exactly the label's width. When
/// the column cannot hold the label plus one content cell, the label
/// folds into the wrapped text instead, so no line escapes the column.
fn wrap_task(task: &Task, column_width: usize) -> Vec<CellLine> {
    let column_width = column_width.max(1);
    let label = format!("{}. ", task.id);
    let label_width = char_width(&label);
    let (prefix, limit) = if label_width < column_width {
        (label, column_width - label_width)
    } else {
        (String::new(), column_width)
    };
    let indent = " ".repeat(char_width(&prefix));

    let text = if prefix.is_empty() {
        format!("{}. {}", task.id, task.title)
    } else {
        task.title.clone()
    };
    let bodies = wrap_words(&text, limit);
    let mut lines: Vec<CellLine> = bodies
        .into_iter()
        .enumerate()
        .map(|(idx, body)| {
            let line_prefix = if idx == 0 { prefix.clone() } else { indent.clone() };
            CellLine::task(line_prefix, body)
        })
        .collect();

    if let Some(marker) = done_marker(task) {
        attach_marker(&mut lines, marker, &indent, limit);
    }
    lines
}

/// `(✓ YYYY-MM-DD)` for Done tasks carrying a completion date.
fn done_marker(task: &Task) -> Option<String> {
    if task.status != TaskStatus::Done {
        return None;
    }
    task.completed_on()
        .map(|day| format!("({} {})", DONE_MARK, day.format("%Y-%m-%d")))
}

/// Append the completion marker to the last wrapped line when it fits,
/// otherwise wrap it onto continuation lines like ordinary content.
/// Never dropped, never wider than the column.
fn attach_marker(lines: &mut Vec<CellLine>, marker: String, indent: &str, limit: usize) {
    if let Some(last) = lines.last_mut() {
        if char_width(&last.body) + 1 + char_width(&marker) <= limit {
            last.suffix = format!(" {marker}");
            return;
        }
    }
    for chunk in wrap_words(&marker, limit) {
        let mut line = CellLine::task(indent.to_string(), String::new());
        line.suffix = chunk;
        lines.push(line);
    }
}

/// Greedy whitespace wrap. Words longer than the limit are hard-broken at
/// the limit boundary; characters are never dropped or reordered.
fn wrap_words(text: &str, limit: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = char_width(word);
        if word_width > limit {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            let mut chunk = String::new();
            let mut chunk_width = 0usize;
            for ch in word.chars() {
                chunk.push(ch);
                chunk_width += 1;
                if chunk_width == limit {
                    lines.push(std::mem::take(&mut chunk));
                    chunk_width = 0;
                }
            }
            current = chunk;
            current_width = chunk_width;
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + 1 + word_width <= limit {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn char_width(text: &str) -> usize {
    text.chars().count()
}
