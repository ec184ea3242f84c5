//! Stateless helpers: cell text conversion, column widths and fixed-width rendering.

use calamine::Data;

use crate::conf::{C_ROW_SEPARATOR, N_WIDTH_COLUMN_GAP_MAX, N_WIDTH_COLUMN_MAX};
use crate::spec::{ColumnWidths, FixedWidthError, Grid, SpecFixedWidthOptions};

////////////////////////////////////////////////////////////////////////////////
// #region CellTextConversion

/// Convert one parsed cell into its text form.
///
/// Blank and error cells become `""`. Numbers use the shortest round-trip
/// digits, switching to exponent form outside `[1e-6, 1e21)`.
pub fn convert_data_to_text(value: &Data) -> String {
    match value {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        Data::Float(n) => format_number_text(*n),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => format_number_text(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Number text: plain decimal inside `[1e-6, 1e21)`, otherwise `1e+21` / `1e-7` form.
pub fn format_number_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let n_abs = value.abs();
    if (1e-6..1e21).contains(&n_abs) {
        return value.to_string();
    }

    let c_exp = format!("{value:e}");
    match c_exp.split_once('e') {
        Some((c_mantissa, c_power)) if !c_power.starts_with('-') => {
            format!("{c_mantissa}e+{c_power}")
        }
        _ => c_exp,
    }
}

/// Convert one parsed row, dropping trailing `Empty` cells.
///
/// Cells holding an empty string are kept.
pub fn derive_row_texts(row: &[Data]) -> Vec<String> {
    let n_len = row
        .iter()
        .rposition(|cell| !matches!(cell, Data::Empty))
        .map_or(0, |n_idx| n_idx + 1);
    row[..n_len].iter().map(convert_data_to_text).collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnWidths

/// Text length in chars; width and padding share this measure.
pub fn measure_text_len(text: &str) -> usize {
    text.chars().count()
}

/// Compute, per column, the longest cell text across all rows.
///
/// Columns past the end of a row are skipped for that row. Always a full
/// recompute, so a shrinking edit is reflected.
pub fn compute_column_widths(grid: &Grid) -> ColumnWidths {
    let mut l_widths: Vec<usize> = Vec::with_capacity(grid.n_cols());
    for row in grid.rows() {
        for (n_idx_col, c_cell) in row.iter().enumerate() {
            let n_len = measure_text_len(c_cell);
            match l_widths.get_mut(n_idx_col) {
                Some(n_width) => *n_width = usize::max(*n_width, n_len),
                None => l_widths.push(n_len),
            }
        }
    }

    tracing::debug!(
        n_rows = grid.n_rows(),
        n_cols = l_widths.len(),
        "recomputed column widths"
    );
    ColumnWidths::from(l_widths)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FixedWidthFormatting

/// Right-pad `text` with spaces to `width_target` chars. Longer text is kept whole.
pub fn pad_cell_text(text: &str, width_target: usize, out: &mut String) {
    out.push_str(text);
    let n_len = measure_text_len(text);
    out.extend(std::iter::repeat_n(' ', width_target.saturating_sub(n_len)));
}

/// Render one row: each column of `widths` padded to `width + width_gap`.
pub fn format_fixed_width_row(row: &[String], widths: &ColumnWidths, width_gap: usize) -> String {
    let mut c_line = String::new();
    for (n_idx_col, n_width) in widths.iter().enumerate() {
        let c_cell = row.get(n_idx_col).map(String::as_str).unwrap_or("");
        pad_cell_text(c_cell, n_width.saturating_add(width_gap), &mut c_line);
    }
    c_line
}

/// Reject a column gap above [`N_WIDTH_COLUMN_GAP_MAX`].
pub fn validate_fixed_width_options(
    options: &SpecFixedWidthOptions,
) -> Result<(), FixedWidthError> {
    if options.width_gap > N_WIDTH_COLUMN_GAP_MAX {
        return Err(FixedWidthError::GapTooLarge {
            width_gap: options.width_gap,
            max: N_WIDTH_COLUMN_GAP_MAX,
        });
    }
    Ok(())
}

/// Reject any column width above [`N_WIDTH_COLUMN_MAX`].
pub fn validate_column_widths(widths: &ColumnWidths) -> Result<(), FixedWidthError> {
    match widths
        .iter()
        .enumerate()
        .find(|(_, n_width)| *n_width > N_WIDTH_COLUMN_MAX)
    {
        Some((n_idx_col, n_width)) => Err(FixedWidthError::WidthTooLarge {
            col: n_idx_col,
            width: n_width,
            max: N_WIDTH_COLUMN_MAX,
        }),
        None => Ok(()),
    }
}

/// Render the grid as fixed-width text, one line per row.
///
/// Pure and deterministic. Rows are joined with `\n`; a trailing separator is
/// emitted only when `options.if_trailing_newline` is set. Fails when the gap
/// or any width is above its maximum.
pub fn format_fixed_width(
    grid: &Grid,
    widths: &ColumnWidths,
    options: &SpecFixedWidthOptions,
) -> Result<String, FixedWidthError> {
    validate_fixed_width_options(options)?;
    validate_column_widths(widths)?;
    Ok(render_fixed_width(grid, widths, options))
}

/// [`format_fixed_width`] for options and widths already validated.
pub(crate) fn render_fixed_width(
    grid: &Grid,
    widths: &ColumnWidths,
    options: &SpecFixedWidthOptions,
) -> String {
    let l_lines: Vec<String> = grid
        .rows()
        .iter()
        .map(|row| format_fixed_width_row(row, widths, options.width_gap))
        .collect();

    let mut c_text = l_lines.join(C_ROW_SEPARATOR);
    if options.if_trailing_newline && !l_lines.is_empty() {
        c_text.push_str(C_ROW_SEPARATOR);
    }

    tracing::debug!(
        n_rows = l_lines.len(),
        n_bytes = c_text.len(),
        "formatted fixed-width text"
    );
    c_text
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
