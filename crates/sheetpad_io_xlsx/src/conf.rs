//! Fixed-width export constants and default preset factories.

use crate::spec::{SpecExportOptions, SpecFixedWidthOptions};

/// Minimum number of spaces reserved after the widest value of a column.
pub const N_WIDTH_COLUMN_GAP: usize = 2;
/// Largest accepted column gap.
pub const N_WIDTH_COLUMN_GAP_MAX: usize = 255;
/// Largest accepted column width; Excel caps cell text at 32,767 chars.
pub const N_WIDTH_COLUMN_MAX: usize = 32_767;
/// Default export target, relative to the working directory.
pub const C_PATH_EXPORT_DEFAULT: &str = "export/abastecimentos.txt";
/// Accepted spreadsheet file extensions (lowercase, without dot).
pub const TUP_SHEET_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];
/// Row separator used by the fixed-width formatter.
pub const C_ROW_SEPARATOR: &str = "\n";

/// Build default formatter options.
pub fn derive_default_fixed_width_options() -> SpecFixedWidthOptions {
    SpecFixedWidthOptions::default()
}

/// Build default export options targeting [`C_PATH_EXPORT_DEFAULT`].
pub fn derive_default_export_options() -> SpecExportOptions {
    SpecExportOptions::default()
}
