#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN: usize = 4;
const SEPARATOR: &str = "  ";

/// Render an aligned table. Widths count characters, not bytes, and
/// multi-line cells (answers, log text) are folded onto one line.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| single_line(cell)).collect())
        .collect();

    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_len(cell))
                .max()
                .unwrap_or(0)
                .max(display_len(header))
                .max(MIN_COLUMN)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    let divider = "-".repeat(display_len(&header_line));

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in &rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let text = truncate_text(value, *width);
                let numeric = looks_numeric(&text);
                let text = if options.color {
                    colorize_status(&text)
                } else {
                    text
                };
                pad(&text, *width, numeric)
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        lines.push(line);
    }
    lines.join("\n")
}

/// Shrink the widest columns until the table fits, never below the header.
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * SEPARATOR.len();

    while widths.iter().sum::<usize>() + separators > max_width {
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > display_len(headers[*idx]).max(MIN_COLUMN))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = candidate else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn single_line(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn display_len(value: &str) -> usize {
    strip_ansi(value).chars().count()
}

fn truncate_text(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit() || ch == '.')
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(display_len(value)));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

fn colorize_status(value: &str) -> String {
    let code = match value.to_ascii_lowercase().as_str() {
        "done" | "true" | "authenticated" => Some("32"),
        "queued" | "in_progress" | "expiring" => Some("33"),
        "failed" | "false" | "expired" => Some("31"),
        _ => None,
    };

    match code {
        Some(code) => format!("\u{1b}[{code}m{value}\u{1b}[0m"),
        None => value.to_string(),
    }
}

fn strip_ansi(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' && chars.peek() == Some(&'[') {
            let _ = chars.next();
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn query_statuses_are_colored() {
        assert_eq!(colorize_status("done"), "\u{1b}[32mdone\u{1b}[0m");
        assert_eq!(colorize_status("in_progress"), "\u{1b}[33min_progress\u{1b}[0m");
        assert_eq!(colorize_status("failed"), "\u{1b}[31mfailed\u{1b}[0m");
        assert_eq!(colorize_status("Billing"), "Billing");
    }

    #[test]
    fn ansi_is_ignored_for_width() {
        assert_eq!(display_len(&colorize_status("queued")), 6);
    }

    #[test]
    fn cyrillic_cells_align_by_characters() {
        let table = render_entity_table(
            &["id", "project_name"],
            &[
                vec!["1".into(), "Биллинг".into()],
                vec!["2".into(), "Billing".into()],
            ],
            TableOptions {
                max_width: None,
                color: false,
            },
        );
        let widths: Vec<usize> = table.lines().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]), "{table}");
    }

    #[test]
    fn multi_line_cells_are_folded() {
        assert_eq!(single_line("step 1\n  step 2\n"), "step 1 step 2");
    }

    #[test]
    fn long_cells_are_truncated() {
        assert_eq!(truncate_text("abcdefgh", 4), "abc…");
        assert_eq!(truncate_text("abc", 4), "abc");
    }

    #[test]
    fn narrow_terminal_shrinks_widest_column() {
        let mut widths = vec![4, 40];
        fit_widths(&mut widths, &["id", "query_text"], Some(30));
        assert_eq!(widths, vec![4, 24]);
    }
}
