/// Horizontal placement of a cell inside its column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub header: String,
    pub alignment: Alignment,
}

/// Column definitions plus rows of already formatted cells.
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Widest visible text per column, header included.
    pub fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| visible_width(cell))
                    .fold(visible_width(&column.header), usize::max)
            })
            .collect()
    }

    pub fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                render_cell(text, *width, column.alignment)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }

    /// Header, rule, then one line per row.
    pub fn render(&self, plain: bool) -> String {
        let widths = self.compute_widths();
        let header: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        let mut lines = vec![
            self.render_row(&header, &widths),
            horizontal_rule(&widths, plain),
        ];
        lines.extend(self.rows.iter().map(|row| self.render_row(row, &widths)));
        lines.join("\n")
    }
}

/// Character count ignoring ANSI escape sequences.
pub fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        width += 1;
    }
    width
}

pub fn render_cell(text: &str, width: usize, alignment: Alignment) -> String {
    let fill = " ".repeat(width.saturating_sub(visible_width(text)));
    match alignment {
        Alignment::Left => format!("{text}{fill}"),
        Alignment::Right => format!("{fill}{text}"),
    }
}

pub fn horizontal_rule(widths: &[usize], plain: bool) -> String {
    let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let ch = if plain { '-' } else { '─' };
    ch.to_string().repeat(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table {
            columns: vec![
                Column {
                    header: "Loja".into(),
                    alignment: Alignment::Left,
                },
                Column {
                    header: "Valor".into(),
                    alignment: Alignment::Right,
                },
            ],
            rows: vec![
                vec!["Centro Norte".into(), "R$ 5,00".into()],
                vec!["Sul".into(), "R$ 120,00".into()],
            ],
        }
    }

    #[test]
    fn widths_cover_header_and_cells() {
        assert_eq!(table().compute_widths(), vec![12, 9]);
    }

    #[test]
    fn cells_align_and_pad() {
        assert_eq!(render_cell("ab", 4, Alignment::Left), "ab  ");
        assert_eq!(render_cell("ab", 4, Alignment::Right), "  ab");
    }

    #[test]
    fn ansi_sequences_do_not_count_towards_width() {
        assert_eq!(visible_width("\u{1b}[31mR$ 5,00\u{1b}[0m"), 7);
    }

    #[test]
    fn renders_header_rule_and_rows() {
        let text = table().render(true);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Loja              Valor");
        assert_eq!(lines[1], "-".repeat(23));
        assert_eq!(lines[2], "Centro Norte    R$ 5,00");
        assert_eq!(lines[3], "Sul           R$ 120,00");
    }
}
