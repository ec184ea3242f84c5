//! `sheetpad_io_xlsx` v1:
//! Spreadsheet-to-fixed-width-text kernel.
//!
//! Module layout:
//! - `conf`    : constants and default presets
//! - `spec`    : grid models/options/reports/errors
//! - `util`    : pure helpers (cell text, widths, padding)
//! - `model`   : grid + settled widths, single-cell edits
//! - `reader`  : first-sheet workbook reader
//! - `session` : load/edit/preview/export state machine
pub mod conf;
pub mod model;
pub mod reader;
pub mod session;
pub mod spec;
pub mod util;

pub use conf::{
    C_PATH_EXPORT_DEFAULT, N_WIDTH_COLUMN_GAP, N_WIDTH_COLUMN_GAP_MAX, N_WIDTH_COLUMN_MAX,
    TUP_SHEET_EXTENSIONS,
};
pub use model::TabularModel;
pub use reader::{read_first_sheet_from_bytes, read_first_sheet_from_path};
pub use session::{EnumSessionState, Session};
pub use spec::{
    ColumnWidths, EditCellError, EnumLoadOutcome, EnumSheetFormat, ExportError, FixedWidthError,
    Grid, LoadTicket, SheetLoadError, SpecExportOptions, SpecExportReport, SpecFixedWidthOptions,
};
pub use util::{compute_column_widths, format_fixed_width};
