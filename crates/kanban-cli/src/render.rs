//! Turns a layout snapshot into printable lines. Padding is computed on
//! the plain cell widths before any styling is applied, so colored and
//! plain output wrap and align identically.

use crate::theme::{self, Theme};
use kanban_core::layout::{BoardLayout, CellLine, ColumnLayout, SEP};
use kanban_core::TaskStatus;

pub fn render_board(snapshot: &BoardLayout, theme: &Theme) -> Vec<String> {
    let mut out = Vec::with_capacity(snapshot.rows() + 2);
    out.push(header_line(snapshot, theme));
    out.push(separator_line(snapshot, theme));
    for row in 0..snapshot.rows() {
        let cells: Vec<String> = snapshot
            .columns
            .iter()
            .map(|column| render_cell(column.lines.get(row), column, theme))
            .collect();
        out.push(cells.join(SEP));
    }
    out
}

fn header_line(snapshot: &BoardLayout, theme: &Theme) -> String {
    let cells: Vec<String> = snapshot
        .columns
        .iter()
        .map(|column| {
            // Headers clip to the column on very narrow terminals; task
            // titles wrap instead and are never clipped.
            let title: String = column.status.header().chars().take(column.width).collect();
            let pad = column.width.saturating_sub(title.chars().count());
            format!("{}{}", theme.paint_bold(&title, theme::PRIMARY), " ".repeat(pad))
        })
        .collect();
    cells.join(SEP)
}

fn separator_line(snapshot: &BoardLayout, theme: &Theme) -> String {
    let cells: Vec<String> = snapshot
        .columns
        .iter()
        .map(|column| theme.paint(&"-".repeat(column.width), theme::PRIMARY))
        .collect();
    cells.join(SEP)
}

fn render_cell(line: Option<&CellLine>, column: &ColumnLayout, theme: &Theme) -> String {
    let Some(line) = line else {
        return " ".repeat(column.width);
    };

    let pad = column.width.saturating_sub(line.width());
    let mut cell = String::new();

    if line.placeholder {
        cell.push_str(&theme.paint_dim(&line.body, theme::PRIMARY));
    } else {
        // The id label is styled without its trailing space; continuation
        // indents are plain spaces and skip styling entirely.
        let label = line.prefix.trim_end();
        if label.is_empty() {
            cell.push_str(&line.prefix);
        } else {
            cell.push_str(&theme.paint_bold(label, theme::PRIMARY));
            cell.push_str(&line.prefix[label.len()..]);
        }
        cell.push_str(&theme.paint(&line.body, theme::status_color(column.status)));
        if !line.suffix.is_empty() {
            cell.push_str(&theme.paint(&line.suffix, theme::status_color(TaskStatus::Done)));
        }
    }

    cell.push_str(&" ".repeat(pad));
    cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use kanban_core::{cleanup, layout, Board};

    fn ts(hour: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 27, hour, 0, 0).unwrap()
    }

    fn sample_board() -> Board {
        let mut board = Board::new();
        board.add("Buy milk", ts(9)).unwrap();
        board.add("Write the quarterly report", ts(10)).unwrap();
        board.move_task(2, TaskStatus::Done, ts(11)).unwrap();
        cleanup::run_cycle(&mut board, ts(11));
        board
    }

    #[test]
    fn plain_render_fits_the_terminal_width() {
        let board = sample_board();
        let theme = Theme::plain();
        for width in [20, 40, 80, 120] {
            let snapshot = layout::layout(&board, width);
            for line in render_board(&snapshot, &theme) {
                assert!(
                    line.chars().count() <= width,
                    "line {:?} exceeds width {width}",
                    line
                );
            }
        }
    }

    #[test]
    fn every_plain_row_has_identical_width() {
        let board = sample_board();
        let snapshot = layout::layout(&board, 80);
        let lines = render_board(&snapshot, &Theme::plain());
        let expected = snapshot.total_width();
        for line in &lines {
            assert_eq!(line.chars().count(), expected, "{line:?}");
        }
    }

    #[test]
    fn header_row_names_all_three_columns() {
        let board = Board::new();
        let snapshot = layout::layout(&board, 90);
        let lines = render_board(&snapshot, &Theme::plain());
        assert!(lines[0].contains("TO DO"));
        assert!(lines[0].contains("IN-PROGRESS"));
        assert!(lines[0].contains("DONE"));
        assert!(lines[1].contains("---"));
    }

    #[test]
    fn empty_board_renders_placeholders() {
        let board = Board::new();
        let snapshot = layout::layout(&board, 90);
        let lines = render_board(&snapshot, &Theme::plain());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].matches("(empty)").count(), 3);
    }

    #[test]
    fn done_task_shows_its_completion_date() {
        let board = sample_board();
        let snapshot = layout::layout(&board, 120);
        let rendered = render_board(&snapshot, &Theme::plain()).join("\n");
        assert!(rendered.contains("Buy milk"));
        assert!(rendered.contains("(\u{2713} 2026-08-27)"));
    }

    #[test]
    fn colored_and_plain_renders_strip_to_the_same_text() {
        let board = sample_board();
        let snapshot = layout::layout(&board, 80);
        let plain = render_board(&snapshot, &Theme::plain());
        let colored = render_board(&snapshot, &theme_enabled());

        assert_eq!(plain.len(), colored.len());
        for (plain_line, colored_line) in plain.iter().zip(&colored) {
            assert_eq!(&strip_ansi(colored_line), plain_line);
        }
    }

    fn theme_enabled() -> Theme {
        // FORCE_COLOR is process-global; build the enabled theme directly.
        Theme::forced()
    }

    fn strip_ansi(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            if ch == '\x1b' {
                for next in chars.by_ref() {
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                out.push(ch);
            }
        }
        out
    }
}
