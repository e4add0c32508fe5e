#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_WIDTH: usize = 4;

/// Render a simple aligned table for string rows.
///
/// Widths are measured in characters, so accented headers and values line up.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| text_width(cell))
                .max()
                .unwrap_or(0)
                .max(text_width(header))
                .max(MIN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| pad_cell(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(text_width(&header_line));

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("", String::as_str);
                let truncated = truncate_text(value, *width);
                let padded = pad_cell(&truncated, *width, looks_numeric(&truncated));
                if options.color {
                    colorize(&padded, &truncated)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    });

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line.trim_end().to_string());
    lines.push(divider.trim_end().to_string());
    lines.extend(row_lines.map(|line| line.trim_end().to_string()));
    lines.join("\n")
}

fn text_width(value: &str) -> usize {
    value.chars().count()
}

/// Shrink the widest columns one character at a time until the row fits.
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > text_width(headers[*idx]).max(MIN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = candidate else {
            break;
        };

        widths[idx] -= 1;
        total -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if text_width(value) <= width {
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
    !trimmed.is_empty()
        && trimmed.chars().any(|ch| ch.is_ascii_digit())
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | ','))
}

fn pad_cell(value: &str, width: usize, right_align: bool) -> String {
    let pad = " ".repeat(width.saturating_sub(text_width(value)));
    if right_align {
        format!("{pad}{value}")
    } else {
        format!("{value}{pad}")
    }
}

/// Color whole cells whose value reads as a status word.
fn colorize(padded: &str, value: &str) -> String {
    let code = match value.to_ascii_lowercase().as_str() {
        "ok" | "uploaded" | "true" => "32",
        "degraded" | "skipped" | "local only" => "33",
        "failed" | "error" | "false" => "31",
        _ => return padded.to_string(),
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}
