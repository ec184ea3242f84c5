//! Loaded grid paired with the column widths derived from it.

use crate::spec::{ColumnWidths, EditCellError, FixedWidthError, Grid, SpecFixedWidthOptions};
use crate::util::{compute_column_widths, render_fixed_width, validate_fixed_width_options};

/// Immutable grid + widths snapshot.
///
/// Widths are computed whenever a model is built, so they are never stale
/// relative to the grid they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabularModel {
    grid: Grid,
    widths: ColumnWidths,
}

impl TabularModel {
    /// Wrap a freshly parsed grid and compute its widths.
    pub fn new(grid: Grid) -> Self {
        let widths = compute_column_widths(&grid);
        Self { grid, widths }
    }

    /// Current grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Widths for [`Self::grid`].
    pub fn widths(&self) -> &ColumnWidths {
        &self.widths
    }

    /// Read one cell; out-of-range reads as `""`.
    pub fn cell(&self, row_idx: usize, col_idx: usize) -> &str {
        self.grid.cell(row_idx, col_idx)
    }

    /// Replace exactly one cell and return the new settled model.
    ///
    /// `col_idx` past the end of the row extends it with `""`. Widths of the
    /// returned model are fully recomputed, so a column may shrink.
    pub fn edit_cell(
        &self,
        row_idx: usize,
        col_idx: usize,
        value: impl Into<String>,
    ) -> Result<TabularModel, EditCellError> {
        let mut grid = self.grid.clone();
        if !grid.set_cell_extending(row_idx, col_idx, value.into()) {
            return Err(EditCellError::RowOutOfRange {
                row: row_idx,
                n_rows: self.grid.n_rows(),
            });
        }
        Ok(Self::new(grid))
    }

    /// Fixed-width rendering of the current grid.
    ///
    /// Widths come from the grid's own text, so only the gap is checked.
    pub fn format(&self, options: &SpecFixedWidthOptions) -> Result<String, FixedWidthError> {
        validate_fixed_width_options(options)?;
        Ok(self.render(options))
    }

    /// [`Self::format`] with options already validated.
    pub(crate) fn render(&self, options: &SpecFixedWidthOptions) -> String {
        render_fixed_width(&self.grid, &self.widths, options)
    }
}
