use std::path::PathBuf;

use pyo3::exceptions::{PyIndexError, PyOSError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use sheetpad_io_xlsx::{
    C_PATH_EXPORT_DEFAULT, ColumnWidths, EditCellError, EnumLoadOutcome, EnumSheetFormat,
    ExportError, FixedWidthError, Grid, LoadTicket, N_WIDTH_COLUMN_GAP, Session, SheetLoadError,
    SpecExportOptions, SpecExportReport, SpecFixedWidthOptions, TUP_SHEET_EXTENSIONS,
    compute_column_widths as rs_compute_column_widths,
    format_fixed_width as rs_format_fixed_width,
};

const N_BRIDGE_ABI_VERSION: u64 = 1;
const C_BRIDGE_CONTRACT_VERSION: &str = "sheetpad.xlsx.fixed_width.v1";
const C_BRIDGE_TRANSPORT: &str = "rust_native";

#[pyclass(name = "LoadTicket", frozen)]
#[derive(Debug, Clone, Copy)]
struct PyLoadTicket {
    inner: LoadTicket,
}

#[pymethods]
impl PyLoadTicket {
    #[getter]
    fn seq(&self) -> u64 {
        self.inner.seq()
    }

    fn __repr__(&self) -> String {
        format!("LoadTicket(seq={})", self.inner.seq())
    }
}

#[pyclass(name = "ExportReport", frozen)]
#[derive(Debug, Clone)]
struct PyExportReport {
    inner: SpecExportReport,
}

impl From<SpecExportReport> for PyExportReport {
    fn from(report: SpecExportReport) -> Self {
        Self { inner: report }
    }
}

#[pymethods]
impl PyExportReport {
    #[getter]
    fn file_out(&self) -> String {
        self.inner.path_file_out.to_string_lossy().to_string()
    }

    #[getter]
    fn n_rows(&self) -> usize {
        self.inner.n_rows
    }

    #[getter]
    fn n_cols(&self) -> usize {
        self.inner.n_cols
    }

    #[getter]
    fn n_bytes(&self) -> usize {
        self.inner.n_bytes
    }

    #[pyo3(signature = (prefix = "[EXPORT]"))]
    fn format(&self, prefix: &str) -> String {
        self.inner.format(prefix)
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }
}

#[pyclass(name = "Session")]
struct PySession {
    inner: Session,
}

#[pymethods]
impl PySession {
    #[new]
    #[pyo3(signature = (width_gap = N_WIDTH_COLUMN_GAP, if_trailing_newline = false))]
    fn new(width_gap: usize, if_trailing_newline: bool) -> PyResult<Self> {
        let inner = Session::new(SpecFixedWidthOptions {
            width_gap,
            if_trailing_newline,
        })
        .map_err(map_fixed_width_error)?;
        Ok(Self { inner })
    }

    #[getter]
    fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    /// Register a load request; earlier tickets become stale.
    fn begin_load(&mut self) -> PyLoadTicket {
        PyLoadTicket {
            inner: self.inner.begin_load(),
        }
    }

    /// Finish a load. Returns `False` when the ticket was superseded.
    #[pyo3(signature = (ticket, data, format = None))]
    fn complete_load(
        &mut self,
        ticket: PyRef<'_, PyLoadTicket>,
        data: &[u8],
        format: Option<&str>,
    ) -> PyResult<bool> {
        let enum_format = format.map(parse_sheet_format).transpose()?;
        let outcome = self
            .inner
            .complete_load(ticket.inner, data, enum_format)
            .map_err(map_sheet_load_error)?;
        Ok(matches!(outcome, EnumLoadOutcome::Applied { .. }))
    }

    fn load_path(&mut self, path: PathBuf) -> PyResult<bool> {
        let outcome = self
            .inner
            .load_path(&path)
            .map_err(map_sheet_load_error)?;
        Ok(matches!(outcome, EnumLoadOutcome::Applied { .. }))
    }

    fn edit_cell(&mut self, row: usize, col: usize, value: String) -> PyResult<()> {
        self.inner
            .edit_cell(row, col, value)
            .map_err(map_edit_cell_error)
    }

    fn cell(&self, row: usize, col: usize) -> String {
        self.inner
            .model()
            .map(|model| model.cell(row, col).to_string())
            .unwrap_or_default()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.inner
            .model()
            .map(|model| model.grid().rows().to_vec())
            .unwrap_or_default()
    }

    /// First row, or `None` while empty.
    fn header(&self) -> Option<Vec<String>> {
        self.inner
            .model()
            .and_then(|model| model.grid().header())
            .map(<[String]>::to_vec)
    }

    /// Rows after the header.
    fn body_rows(&self) -> Vec<Vec<String>> {
        self.inner
            .model()
            .map(|model| model.grid().body_rows().to_vec())
            .unwrap_or_default()
    }

    fn widths(&self) -> Vec<usize> {
        self.inner
            .model()
            .map(|model| model.widths().as_slice().to_vec())
            .unwrap_or_default()
    }

    fn preview(&self) -> Option<String> {
        self.inner.preview()
    }

    /// Write the fixed-width text. Returns `None` while nothing is loaded.
    #[pyo3(signature = (file_out = C_PATH_EXPORT_DEFAULT.to_string(), if_create_parent_dirs = true))]
    fn export(
        &self,
        file_out: String,
        if_create_parent_dirs: bool,
    ) -> PyResult<Option<PyExportReport>> {
        let options = SpecExportOptions {
            path_file_out: PathBuf::from(file_out),
            if_create_parent_dirs,
        };
        let report = self.inner.export(&options).map_err(map_export_error)?;
        Ok(report.map(PyExportReport::from))
    }
}

fn parse_sheet_format(value: &str) -> PyResult<EnumSheetFormat> {
    EnumSheetFormat::from_extension(value).ok_or_else(|| {
        PyValueError::new_err(format!(
            "Invalid sheet format: `{value}`. Expected one of: {TUP_SHEET_EXTENSIONS:?}"
        ))
    })
}

fn map_sheet_load_error(exception: SheetLoadError) -> PyErr {
    match exception {
        SheetLoadError::Io { .. } => PyOSError::new_err(exception.to_string()),
        _ => PyValueError::new_err(exception.to_string()),
    }
}

fn map_edit_cell_error(exception: EditCellError) -> PyErr {
    match exception {
        EditCellError::SessionEmpty => PyRuntimeError::new_err(exception.to_string()),
        EditCellError::RowOutOfRange { .. } => PyIndexError::new_err(exception.to_string()),
    }
}

fn map_export_error(exception: ExportError) -> PyErr {
    PyOSError::new_err(exception.to_string())
}

fn map_fixed_width_error(exception: FixedWidthError) -> PyErr {
    PyValueError::new_err(exception.to_string())
}

#[pyfunction(name = "compute_column_widths")]
fn compute_column_widths_py(rows: Vec<Vec<Option<String>>>) -> Vec<usize> {
    rs_compute_column_widths(&Grid::from_optional_rows(rows)).into()
}

#[pyfunction(name = "format_fixed_width")]
#[pyo3(signature = (rows, widths, width_gap = N_WIDTH_COLUMN_GAP, if_trailing_newline = false))]
fn format_fixed_width_py(
    rows: Vec<Vec<Option<String>>>,
    widths: Vec<usize>,
    width_gap: usize,
    if_trailing_newline: bool,
) -> PyResult<String> {
    rs_format_fixed_width(
        &Grid::from_optional_rows(rows),
        &ColumnWidths::from(widths),
        &SpecFixedWidthOptions {
            width_gap,
            if_trailing_newline,
        },
    )
    .map_err(map_fixed_width_error)
}

#[pymodule]
fn _sheetpad_io_xlsx_rs(module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_class::<PyLoadTicket>()?;
    module.add_class::<PyExportReport>()?;
    module.add_class::<PySession>()?;
    module.add_function(wrap_pyfunction!(compute_column_widths_py, module)?)?;
    module.add_function(wrap_pyfunction!(format_fixed_width_py, module)?)?;
    module.add("__bridge_abi__", N_BRIDGE_ABI_VERSION)?;
    module.add("__bridge_contract__", C_BRIDGE_CONTRACT_VERSION)?;
    module.add("__bridge_transport__", C_BRIDGE_TRANSPORT)?;
    Ok(())
}
