use fmdesk_core::enums::TaskStatus;

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Semantic color of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Good,
    Attention,
    Bad,
}

impl Tone {
    const fn ansi(self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::Good => Some("32"),
            Self::Attention => Some("33"),
            Self::Bad => Some("31"),
        }
    }
}

/// Tone for a status cell: overdue and cancelled read red, review yellow.
#[must_use]
pub const fn status_tone(status: TaskStatus, overdue: bool) -> Tone {
    if overdue {
        return Tone::Bad;
    }
    match status {
        TaskStatus::Completed => Tone::Good,
        TaskStatus::Review => Tone::Attention,
        TaskStatus::Cancelled => Tone::Bad,
        TaskStatus::ToDo | TaskStatus::InProgress => Tone::Plain,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::toned(text, Tone::Plain)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::toned(text, Tone::Plain)
    }
}

/// Render an aligned table. Numeric cells are right-aligned.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<Cell>], options: TableOptions) -> String {
    if rows.is_empty() {
        return String::from("(no rows)");
    }

    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_width(&cell.text))
                .max()
                .unwrap_or(0)
                .max(display_width(header))
        })
        .collect();

    shrink_to_fit(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(display_width(&header_line));

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = row.get(index).cloned().unwrap_or_else(|| Cell::from("-"));
                let text = truncate(&cell.text, *width);
                let padded = pad(&text, *width, looks_numeric(&text));
                if options.color {
                    paint(&padded, cell.tone)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Two-column `field / value` table.
#[must_use]
pub fn render_key_values(pairs: Vec<(&str, Cell)>, options: TableOptions) -> String {
    let rows = pairs
        .into_iter()
        .map(|(key, value)| vec![Cell::from(key), value])
        .collect::<Vec<_>>();
    render_table(&["field", "value"], &rows, options)
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

/// Narrow the widest columns one step at a time, never below the header.
fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * 2;

    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > display_width(headers[*idx]).max(6))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);
        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if display_width(value) <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out = value.chars().take(width - 1).collect::<String>();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim().trim_end_matches('%');
    !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit() || ch == '.')
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(value)));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

fn paint(value: &str, tone: Tone) -> String {
    match tone.ansi() {
        Some(code) => format!("\u{1b}[{code}m{value}\u{1b}[0m"),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    fn rows() -> Vec<Vec<Cell>> {
        vec![
            vec![Cell::from("t-1"), Cell::from("Mop hall"), Cell::from("40%")],
            vec![
                Cell::from("t-200"),
                Cell::from("Replace lobby light fixture"),
                Cell::from("5%"),
            ],
        ]
    }

    #[test]
    fn columns_align_and_numbers_right_align() {
        let table = render_table(&["id", "title", "done"], &rows(), PLAIN);
        let lines = table.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "t-1    Mop hall                      40%");
        assert_eq!(lines[3], "t-200  Replace lobby light fixture    5%");
    }

    #[test]
    fn empty_table_says_so() {
        assert_eq!(render_table(&["id"], &[], PLAIN), "(no rows)");
    }

    #[test]
    fn narrow_terminal_truncates_widest_column() {
        let options = TableOptions {
            max_width: Some(30),
            color: false,
        };
        let table = render_table(&["id", "title", "done"], &rows(), options);
        assert!(table.lines().all(|line| line.chars().count() <= 30));
        assert!(table.contains('…'));
    }

    #[test]
    fn color_wraps_toned_cells_only() {
        let rows = vec![vec![
            Cell::from("t-1"),
            Cell::toned("Overdue", status_tone(TaskStatus::InProgress, true)),
        ]];
        let options = TableOptions {
            max_width: None,
            color: true,
        };
        let table = render_table(&["id", "status"], &rows, options);
        assert!(table.contains("\u{1b}[31mOverdue"));
        assert!(!table.contains("\u{1b}[31mt-1"));
    }

    #[test]
    fn status_tones() {
        assert_eq!(status_tone(TaskStatus::Completed, false), Tone::Good);
        assert_eq!(status_tone(TaskStatus::Review, false), Tone::Attention);
        assert_eq!(status_tone(TaskStatus::ToDo, false), Tone::Plain);
        assert_eq!(status_tone(TaskStatus::ToDo, true), Tone::Bad);
    }
}
