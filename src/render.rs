use crate::attendance::record::AttendanceRecord;
use crate::data::HEADERS;

/// Aligned text table with a leading row index column. The indices are the
/// positions `delete` expects for the same view.
pub fn render_table<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut rows: Vec<Vec<String>> = vec![std::iter::once(String::new())
        .chain(HEADERS.iter().map(|header| header.to_string()))
        .collect()];

    for (idx, record) in records.into_iter().enumerate() {
        rows.push(vec![
            idx.to_string(),
            record.date().to_string(),
            record.agent_name().clone(),
            record.position().to_string(),
            record.status().to_string(),
            record.absence_type().to_string(),
            record.time_range().clone(),
            record.overtime().to_string(),
        ]);
    }

    let mut widths = vec![0; rows[0].len()];
    for row in &rows {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in &rows {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}
