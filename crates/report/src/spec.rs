//! Declarative sheet specifications.
//!
//! A [`SheetSpec`] is plain data: rows of styled [`Cell`]s with merge spans.
//! The layout builders produce it and [`render`] transcribes it into xlsx, so
//! layouts can be tested without touching a spreadsheet writer.
//!
//! Rows are dense: the index of a cell in [`Row::cells`] is its column. Cells
//! covered by another cell's [`Span`] are blank placeholders.
//!
//!  [`render`]: crate::render

/// Fill of header cells.
pub const HEADER_FILL: u32 = 0x4A86E8;
/// Fill of the year title rows of the sales plan.
pub const YEAR_FILL: u32 = 0xE8E8E8;
/// Fill of non-negative net profit.
pub const PROFIT_FILL: u32 = 0x90EE90;
/// Fill of negative net profit.
pub const LOSS_FILL: u32 = 0xFF9999;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Number(value as f64)
    }
}

/// Horizontal alignment. Anything but `General` is also vertically centred.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    General,
    Left,
    Center,
    Right,
}

/// Merge extent of a cell, anchored at its own position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub cols: u16,
    pub rows: u32,
}

impl Span {
    pub const SINGLE: Span = Span { cols: 1, rows: 1 };

    #[must_use]
    pub fn is_merge(self) -> bool {
        self.cols > 1 || self.rows > 1
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::SINGLE
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub align: Align,
    pub bold: bool,
    pub italic: bool,
    pub font_size: Option<f64>,
    pub fill: Option<u32>,
    pub border: bool,
    pub wrap: bool,
    pub span: Span,
}

impl Cell {
    /// Unstyled empty cell.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// Unstyled value, as written straight into a cell.
    pub fn plain(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Bordered, centred and wrapped table cell.
    pub fn data(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            align: Align::Center,
            border: true,
            wrap: true,
            ..Self::default()
        }
    }

    /// Bordered empty table cell.
    #[must_use]
    pub fn empty_data() -> Self {
        Self::data(CellValue::Empty)
    }

    /// Column header: bold, filled, centred, bordered.
    pub fn header(text: impl Into<String>) -> Self {
        Self::data(text.into()).bold().size(11.0).fill(HEADER_FILL)
    }

    /// Sheet title.
    pub fn title(text: impl Into<String>) -> Self {
        Self::plain(text.into())
            .bold()
            .size(14.0)
            .align(Align::Center)
            .wrap()
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    #[must_use]
    pub fn size(mut self, points: f64) -> Self {
        self.font_size = Some(points);
        self
    }

    #[must_use]
    pub fn fill(mut self, rgb: u32) -> Self {
        self.fill = Some(rgb);
        self
    }

    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn bordered(mut self) -> Self {
        self.border = true;
        self
    }

    #[must_use]
    pub fn wrap(mut self) -> Self {
        self.wrap = true;
        self
    }

    /// Merge across `cols` columns and `rows` rows.
    #[must_use]
    pub fn span(mut self, cols: u16, rows: u32) -> Self {
        self.span = Span {
            cols: cols.max(1),
            rows: rows.max(1),
        };
        self
    }

    /// `true` for a cell the renderer can skip entirely.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
    /// Height in points; `None` keeps the default.
    pub height: Option<f64>,
}

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `cell` at `col`, padding with blanks.
    #[must_use]
    pub fn with(mut self, col: u16, cell: Cell) -> Self {
        self.put(col, cell);
        self
    }

    pub fn put(&mut self, col: u16, cell: Cell) {
        let col = usize::from(col);
        if self.cells.len() <= col {
            self.cells.resize_with(col + 1, Cell::blank);
        }
        self.cells[col] = cell;
    }

    #[must_use]
    pub fn height(mut self, points: f64) -> Self {
        self.height = Some(points);
        self
    }

    #[must_use]
    pub fn cell(&self, col: u16) -> Option<&Cell> {
        self.cells.get(usize::from(col))
    }
}

impl FromIterator<Cell> for Row {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
            height: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SheetSpec {
    pub name: String,
    /// Width of each column from A, in characters.
    pub column_widths: Vec<f64>,
    pub rows: Vec<Row>,
}

impl SheetSpec {
    pub fn new(name: impl Into<String>, column_widths: &[f64]) -> Self {
        Self {
            name: name.into(),
            column_widths: column_widths.to_vec(),
            rows: Vec::new(),
        }
    }

    /// Appends a row and returns its index.
    pub fn push(&mut self, row: Row) -> u32 {
        self.rows.push(row);
        (self.rows.len() - 1) as u32
    }

    pub fn skip(&mut self, rows: usize) {
        for _ in 0..rows {
            self.rows.push(Row::new());
        }
    }

    #[must_use]
    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.rows.get(row as usize).and_then(|r| r.cell(col))
    }

    /// Position of the first cell holding exactly `text`.
    #[must_use]
    pub fn find_text(&self, text: &str) -> Option<(u32, u16)> {
        self.rows.iter().enumerate().find_map(|(r, row)| {
            row.cells
                .iter()
                .position(|c| c.value.as_text() == Some(text))
                .map(|c| (r as u32, c as u16))
        })
    }

    /// Number of columns used by the widest row.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }
}
