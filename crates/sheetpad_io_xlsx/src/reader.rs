//! First-sheet reader: spreadsheet bytes into a [`Grid`].

use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{Data, Range, Reader, Xls, Xlsx, open_workbook_auto_from_rs};

use crate::spec::{EnumSheetFormat, Grid, SheetLoadError};
use crate::util::derive_row_texts;

/// Parse the first worksheet of an in-memory workbook.
///
/// With `format = None` the container type is detected from the bytes.
/// Rows are relative to the sheet's used range; trailing blank cells of each
/// row are dropped.
pub fn read_first_sheet_from_bytes(
    v_bytes: &[u8],
    format: Option<EnumSheetFormat>,
) -> Result<Grid, SheetLoadError> {
    let cursor = Cursor::new(v_bytes);
    let range = match format {
        Some(EnumSheetFormat::Xlsx) => derive_first_sheet_range(Xlsx::new(cursor)?)?,
        Some(EnumSheetFormat::Xls) => derive_first_sheet_range(Xls::new(cursor)?)?,
        None => derive_first_sheet_range(open_workbook_auto_from_rs(cursor)?)?,
    };

    let grid = derive_grid_from_range(&range);
    tracing::debug!(
        n_bytes = v_bytes.len(),
        n_rows = grid.n_rows(),
        n_cols = grid.n_cols(),
        "parsed first sheet"
    );
    Ok(grid)
}

/// Read and parse the first worksheet of a `.xlsx` / `.xls` file.
///
/// The extension is checked before any IO; the content itself is sniffed, so a
/// mislabelled `.xls` that is really `.xlsx` still loads.
pub fn read_first_sheet_from_path(path: &Path) -> Result<Grid, SheetLoadError> {
    EnumSheetFormat::from_path(path)?;
    let v_bytes = read_file_bytes(path)?;
    read_first_sheet_from_bytes(&v_bytes, None)
}

/// Read a whole file into memory.
pub fn read_file_bytes(path: &Path) -> Result<Vec<u8>, SheetLoadError> {
    fs::read(path).map_err(|source| SheetLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn derive_first_sheet_range<RS, R>(mut workbook: R) -> Result<Range<Data>, SheetLoadError>
where
    RS: Read + Seek,
    R: Reader<RS>,
    SheetLoadError: From<R::Error>,
{
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetLoadError::NoSheets)??;
    Ok(range)
}

fn derive_grid_from_range(range: &Range<Data>) -> Grid {
    Grid::from_rows(range.rows().map(derive_row_texts).collect())
}
