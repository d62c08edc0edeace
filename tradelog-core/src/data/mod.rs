//! Export parsing: line splitting, header resolution, cell coercion

pub mod columns;
pub mod csv_line;
pub mod fields;

pub use columns::{Column, ColumnIndex, ColumnMap, TypeKeywords};
pub use csv_line::split_line;
pub use fields::{parse_number, parse_trade_num};

/// One data row of an export, with its 1-based line number in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRow {
    pub line: usize,
    pub fields: Vec<String>,
}

/// A split export: the header fields and the non-blank data rows.
#[derive(Debug, Clone, Default)]
pub struct SplitExport {
    pub headers: Vec<String>,
    pub rows: Vec<DataRow>,
}

/// Split export text into a header and data rows.
///
/// Leading and trailing whitespace of the whole text is ignored, as are blank
/// lines between rows. Returns `None` when there is no header line at all.
pub fn split_export(content: &str) -> Option<SplitExport> {
    let content = content.trim_start_matches('\u{feff}');
    let leading = content.len() - content.trim_start().len();
    let skipped_lines = content[..leading].matches('\n').count();
    let body = content.trim();
    if body.is_empty() {
        return None;
    }

    let mut lines = body.lines().enumerate();
    let (_, header_line) = lines.next()?;
    let headers = split_line(header_line);

    let rows = lines
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| DataRow {
            line: skipped_lines + i + 1,
            fields: split_line(line),
        })
        .collect();

    Some(SplitExport { headers, rows })
}
