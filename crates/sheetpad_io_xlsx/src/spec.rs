//! Grid models, options, reports and error types.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::conf::{C_PATH_EXPORT_DEFAULT, N_WIDTH_COLUMN_GAP};

////////////////////////////////////////////////////////////////////////////////
// #region GridSpecification

/// Row-major table of cell text.
///
/// Rows may have unequal length; a missing trailing cell reads as `""`.
/// Row 0 is presented as a header by surfaces but is stored like any other row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Create an empty grid (no rows).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid from owned rows.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Create a grid from optional cells, mapping `None` to `""`.
    pub fn from_optional_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let l_rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.map(Into::into).unwrap_or_default())
                    .collect()
            })
            .collect();
        Self { rows: l_rows }
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Column count, i.e. the length of the longest row.
    pub fn n_cols(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Whether the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Read one cell; out-of-range coordinates read as `""`.
    pub fn cell(&self, row_idx: usize, col_idx: usize) -> &str {
        self.rows
            .get(row_idx)
            .and_then(|row| row.get(col_idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Borrow one row as stored (not padded to [`Self::n_cols`]).
    pub fn row(&self, row_idx: usize) -> Option<&[String]> {
        self.rows.get(row_idx).map(Vec::as_slice)
    }

    /// Borrow all rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// First row, shown as table head by surfaces.
    pub fn header(&self) -> Option<&[String]> {
        self.row(0)
    }

    /// Rows after the header.
    pub fn body_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Overwrite one cell, extending the row with `""` when `col_idx` is past its end.
    ///
    /// Returns `false` (and leaves the grid untouched) when `row_idx` does not exist.
    pub(crate) fn set_cell_extending(
        &mut self,
        row_idx: usize,
        col_idx: usize,
        value: String,
    ) -> bool {
        let Some(row) = self.rows.get_mut(row_idx) else {
            return false;
        };
        if col_idx >= row.len() {
            row.resize(col_idx + 1, String::new());
        }
        row[col_idx] = value;
        true
    }
}

/// Per-column maximum text length (in chars).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnWidths(Vec<usize>);

impl ColumnWidths {
    /// Number of columns covered.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no column is covered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Width of one column, if covered.
    pub fn get(&self, col_idx: usize) -> Option<usize> {
        self.0.get(col_idx).copied()
    }

    /// Borrow widths in column order.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Iterate widths in column order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Character count of every formatted row for the given gap.
    pub fn calculate_line_width(&self, width_gap: usize) -> usize {
        self.0.iter().fold(0usize, |n_total, n_width| {
            n_total.saturating_add(n_width.saturating_add(width_gap))
        })
    }
}

impl From<Vec<usize>> for ColumnWidths {
    fn from(value: Vec<usize>) -> Self {
        Self(value)
    }
}

impl From<ColumnWidths> for Vec<usize> {
    fn from(value: ColumnWidths) -> Self {
        value.0
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetFormat

/// Spreadsheet container accepted by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumSheetFormat {
    /// Office Open XML workbook (`.xlsx`).
    Xlsx,
    /// Legacy BIFF workbook (`.xls`).
    Xls,
}

impl EnumSheetFormat {
    /// Resolve from a bare extension, case-insensitively.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let c_ext = extension.trim_start_matches('.').to_ascii_lowercase();
        match c_ext.as_str() {
            "xlsx" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            _ => None,
        }
    }

    /// Resolve from a file path's extension.
    pub fn from_path(path: &Path) -> Result<Self, SheetLoadError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| SheetLoadError::UnsupportedExtension(path.to_path_buf()))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Fixed-width rendering options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFixedWidthOptions {
    /// Spaces reserved after the widest value of each column.
    pub width_gap: usize,
    /// Append one row separator after the last row.
    pub if_trailing_newline: bool,
}

impl Default for SpecFixedWidthOptions {
    fn default() -> Self {
        Self {
            width_gap: N_WIDTH_COLUMN_GAP,
            if_trailing_newline: false,
        }
    }
}

/// Text export options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecExportOptions {
    /// Destination text file.
    pub path_file_out: PathBuf,
    /// Create missing parent directories of `path_file_out`.
    pub if_create_parent_dirs: bool,
}

impl Default for SpecExportOptions {
    fn default() -> Self {
        Self {
            path_file_out: PathBuf::from(C_PATH_EXPORT_DEFAULT),
            if_create_parent_dirs: true,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region LoadAndReport

/// Identity of one load request; only the newest ticket may replace the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(pub(crate) u64);

impl LoadTicket {
    /// Monotonic sequence number of this request.
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Result of completing a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumLoadOutcome {
    /// Grid replaced.
    Applied {
        /// Rows in the new grid.
        n_rows: usize,
        /// Columns in the new grid.
        n_cols: usize,
    },
    /// A newer request superseded this one; state untouched.
    Stale,
}

/// Summary of one export call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecExportReport {
    /// File written.
    pub path_file_out: PathBuf,
    /// Rows written.
    pub n_rows: usize,
    /// Columns written.
    pub n_cols: usize,
    /// UTF-8 bytes written.
    pub n_bytes: usize,
}

impl SpecExportReport {
    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} file={} rows={} cols={} bytes={}",
            self.path_file_out.display(),
            self.n_rows,
            self.n_cols,
            self.n_bytes
        )
    }
}

impl fmt::Display for SpecExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[EXPORT]"))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Spreadsheet could not be turned into a grid.
#[derive(Debug, Error)]
pub enum SheetLoadError {
    /// Extension is not one of `.xlsx` / `.xls`.
    #[error("unsupported spreadsheet extension: {} (expected .xlsx or .xls)", .0.display())]
    UnsupportedExtension(PathBuf),
    /// Source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Malformed `.xlsx` container.
    #[error("failed to parse `.xlsx`: {0}")]
    Xlsx(#[from] calamine::XlsxError),
    /// Malformed `.xls` container.
    #[error("failed to parse `.xls`: {0}")]
    Xls(#[from] calamine::XlsError),
    /// Container type could not be detected or parsed.
    #[error("failed to parse workbook: {0}")]
    Workbook(#[from] calamine::Error),
    /// Workbook has no worksheet.
    #[error("workbook contains no sheets")]
    NoSheets,
}

/// Cell edit rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditCellError {
    /// No grid loaded yet.
    #[error("no spreadsheet loaded")]
    SessionEmpty,
    /// Row index outside the grid.
    #[error("row {row} out of range (grid has {n_rows} rows)")]
    RowOutOfRange {
        /// Requested row.
        row: usize,
        /// Rows in the grid.
        n_rows: usize,
    },
}

/// Formatter options or widths outside the accepted range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FixedWidthError {
    /// Column gap above the accepted maximum.
    #[error("width_gap={width_gap} exceeds the maximum of {max}")]
    GapTooLarge {
        /// Requested gap.
        width_gap: usize,
        /// Accepted maximum.
        max: usize,
    },
    /// Column width above the accepted maximum.
    #[error("width {width} of column {col} exceeds the maximum of {max}")]
    WidthTooLarge {
        /// Column index.
        col: usize,
        /// Requested width.
        width: usize,
        /// Accepted maximum.
        max: usize,
    },
}

/// Text export failed.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Target could not be created or written.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Path being created or written.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
