//! Sorting and column-aligned rendering of host entries

use crate::RouteRecord;

/// Minimum spaces between aligned columns
const PADDING: usize = 2;

/// Sort records by domain, ignoring case.
///
/// The sort is unstable and has no secondary key, so records sharing a
/// lowercased domain come out in no particular order.
pub fn sort_records(records: &mut [RouteRecord]) {
    records.sort_unstable_by(|a, b| a.domain.to_lowercase().cmp(&b.domain.to_lowercase()));
}

/// Sort the records and render them as aligned `ADDRESS DOMAIN # SERVICE`
/// lines, each terminated by a newline.
pub fn render(mut records: Vec<RouteRecord>) -> String {
    sort_records(&mut records);

    let text: String = records
        .iter()
        .map(|record| format!("{}\n", record))
        .collect();
    align_columns(&text)
}

/// Replace tabs with space padding so that tab-terminated cells line up.
///
/// A column spans consecutive lines that have a tab-terminated cell at that
/// position; its width is the widest cell plus [`PADDING`]. The text after
/// the last tab on a line is not padded.
fn align_columns(text: &str) -> String {
    let rows: Vec<Vec<&str>> = text.lines().map(|line| line.split('\t').collect()).collect();
    let mut widths: Vec<Vec<usize>> = vec![Vec::new(); rows.len()];

    let columns = rows.iter().map(|row| row.len() - 1).max().unwrap_or(0);
    for column in 0..columns {
        let mut start = 0;
        while start < rows.len() {
            if rows[start].len() - 1 <= column {
                start += 1;
                continue;
            }

            let mut end = start;
            while end < rows.len() && rows[end].len() - 1 > column {
                end += 1;
            }

            let width = rows[start..end]
                .iter()
                .map(|row| row[column].chars().count())
                .max()
                .unwrap_or(0)
                + PADDING;
            for row_widths in &mut widths[start..end] {
                row_widths.push(width);
            }
            start = end;
        }
    }

    let mut out = String::with_capacity(text.len());
    for (row, row_widths) in rows.iter().zip(&widths) {
        let last = row.len() - 1;
        for (column, cell) in row.iter().enumerate() {
            out.push_str(cell);
            if column < last {
                let fill = row_widths[column] - cell.chars().count();
                out.extend(std::iter::repeat(' ').take(fill));
            }
        }
        out.push('\n');
    }
    out
}
