//! Banner, key/value and table layout helpers

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

use super::style::Palette;

fn ansi_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").ok())
        .as_ref()
}

/// Remove ANSI SGR escapes
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    match ansi_pattern() {
        Some(pattern) => pattern.replace_all(text, ""),
        None => Cow::Borrowed(text),
    }
}

/// Columns a string occupies once escapes are removed
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).chars().count()
}

fn pad_to(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(visible_width(text));
    format!("{text}{}", " ".repeat(padding))
}

/// Three-line box with the title centred in `width` columns
pub fn banner(palette: &Palette, title: &str, width: usize) -> String {
    let title_width = title.chars().count();
    let width = width.max(title_width);
    let left = (width - title_width) / 2;
    let right = width - title_width - left;

    let (top, bottom, side, fill) = if palette.unicode() {
        (("╔", "╗"), ("╚", "╝"), "║", "═")
    } else {
        (("+", "+"), ("+", "+"), "|", "=")
    };
    let border = fill.repeat(width);

    [
        palette.lime(&format!("{}{border}{}", top.0, top.1)),
        format!(
            "{}{}{}{}{}",
            palette.lime(side),
            " ".repeat(left),
            palette.white(title),
            " ".repeat(right),
            palette.lime(side)
        ),
        palette.lime(&format!("{}{border}{}", bottom.0, bottom.1)),
    ]
    .join("\n")
}

/// `Key:` padded to `align` columns, then the value
pub fn kv_pair(palette: &Palette, key: &str, value: &str, align: usize) -> String {
    let key = format!("{key}:");
    format!("{} {value}", palette.lime(&pad_to(&key, align)))
}

/// Left-aligned table with a rule under the header.
///
/// Cells may already carry ANSI colour; widths use the visible text.
pub fn table(palette: &Palette, headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(visible_width(cell));
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);

    let header_cells: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| palette.lime_bold(&pad_to(h, *w)))
        .collect();
    lines.push(format!("  {}", header_cells.join("  ")));

    let rule: Vec<String> = widths.iter().map(|w| palette.horizontal().repeat(*w)).collect();
    lines.push(format!("  {}", rule.join("  ")));

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad_to(cell, *w))
            .collect();
        lines.push(format!("  {}", cells.join("  ").trim_end()));
    }

    lines.join("\n")
}
