//! Transcribes [`SheetSpec`]s into an xlsx workbook held in memory.

use std::collections::HashSet;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::ReportError;
use crate::spec::{Align, Cell, CellValue, SheetSpec};

/// Renders the sheets, in order, into xlsx bytes.
pub fn render(sheets: &[SheetSpec]) -> Result<Vec<u8>, ReportError> {
    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, sheet)?;
    }
    Ok(workbook.save_to_buffer()?)
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &SheetSpec) -> Result<(), ReportError> {
    worksheet.set_name(&sheet.name)?;
    for (col, width) in (0u16..).zip(&sheet.column_widths) {
        worksheet.set_column_width(col, *width)?;
    }

    let covered = covered_cells(sheet);
    for (row, cells) in (0u32..).zip(&sheet.rows) {
        if let Some(height) = cells.height {
            worksheet.set_row_height(row, height)?;
        }
        for (col, cell) in (0u16..).zip(&cells.cells) {
            if cell.is_blank() || covered.contains(&(row, col)) {
                continue;
            }
            write_cell(worksheet, row, col, cell)?;
        }
    }
    Ok(())
}

/// Positions hidden under another cell's merge, anchors excluded.
fn covered_cells(sheet: &SheetSpec) -> HashSet<(u32, u16)> {
    let mut covered = HashSet::new();
    for (row, cells) in (0u32..).zip(&sheet.rows) {
        for (col, cell) in (0u16..).zip(&cells.cells) {
            if !cell.span.is_merge() {
                continue;
            }
            for r in row..row + cell.span.rows {
                for c in col..col + cell.span.cols {
                    if (r, c) != (row, col) {
                        covered.insert((r, c));
                    }
                }
            }
        }
    }
    covered
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
) -> Result<(), ReportError> {
    let format = cell_format(cell);

    if cell.span.is_merge() {
        let last_row = row + cell.span.rows - 1;
        let last_col = col + cell.span.cols - 1;
        let text = cell.value.as_text().unwrap_or_default();
        worksheet.merge_range(row, col, last_row, last_col, text, &format)?;
        // merge_range only takes a string; numbers go into the anchor.
        if let CellValue::Number(n) = cell.value {
            worksheet.write_number_with_format(row, col, n, &format)?;
        }
        return Ok(());
    }

    match &cell.value {
        CellValue::Empty => worksheet.write_blank(row, col, &format)?,
        CellValue::Text(text) => worksheet.write_string_with_format(row, col, text, &format)?,
        CellValue::Number(n) => worksheet.write_number_with_format(row, col, *n, &format)?,
    };
    Ok(())
}

fn cell_format(cell: &Cell) -> Format {
    let mut format = Format::new();

    if cell.bold {
        format = format.set_bold();
    }
    if cell.italic {
        format = format.set_italic();
    }
    if let Some(size) = cell.font_size {
        format = format.set_font_size(size);
    }
    if let Some(rgb) = cell.fill {
        format = format.set_background_color(Color::RGB(rgb));
    }
    if cell.border {
        format = format.set_border(FormatBorder::Thin);
    }
    if cell.wrap {
        format = format.set_text_wrap();
    }

    let horizontal = match cell.align {
        Align::General => None,
        Align::Left => Some(FormatAlign::Left),
        Align::Center => Some(FormatAlign::Center),
        Align::Right => Some(FormatAlign::Right),
    };
    if let Some(align) = horizontal {
        format = format
            .set_align(align)
            .set_align(FormatAlign::VerticalCenter);
    }
    format
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Row;

    #[test]
    fn merges_cover_their_range_but_not_the_anchor() {
        let mut sheet = SheetSpec::new("S", &[]);
        sheet.push(Row::new().with(1, Cell::data("x").span(3, 2)));
        let covered = covered_cells(&sheet);

        assert_eq!(covered.len(), 5);
        assert!(!covered.contains(&(0, 1)));
        assert!(covered.contains(&(0, 3)));
        assert!(covered.contains(&(1, 1)));
        assert!(!covered.contains(&(0, 0)));
    }

    #[test]
    fn renders_an_xlsx_container() {
        let mut sheet = SheetSpec::new("Varaq", &[10.0, 20.0]);
        sheet.push(
            Row::new()
                .with(0, Cell::title("Sarlavha").span(2, 1))
                .height(30.0),
        );
        sheet.push(Row::new().with(0, Cell::data(1.0)).with(1, Cell::empty_data()));
        sheet.push(Row::new().with(0, Cell::data(42.0).span(2, 1)));

        let bytes = render(&[sheet]).unwrap();
        // xlsx is a zip archive.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn anchors_under_a_merge_are_skipped() {
        let mut sheet = SheetSpec::new("S", &[]);
        sheet.push(Row::new().with(0, Cell::data("a").span(1, 2)));
        sheet.push(Row::new().with(0, Cell::data("b").span(2, 1)));
        assert!(covered_cells(&sheet).contains(&(1, 0)));
        assert!(render(&[sheet]).is_ok());
    }
}
