//! Session state machine: load, edit, preview and export.
//!
//! `Empty -> Loaded` on the first successful parse; every edit and every
//! re-load is a `Loaded -> Loaded` self-loop. A failed parse or a superseded
//! load request leaves the state exactly as it was.

use std::fs;
use std::path::Path;

use crate::model::TabularModel;
use crate::reader::{read_file_bytes, read_first_sheet_from_bytes};
use crate::spec::{
    EditCellError, EnumLoadOutcome, EnumSheetFormat, ExportError, FixedWidthError, LoadTicket,
    SheetLoadError, SpecExportOptions, SpecExportReport, SpecFixedWidthOptions,
};
use crate::util::validate_fixed_width_options;

/// Session-level state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EnumSessionState {
    /// No spreadsheet loaded yet.
    #[default]
    Empty,
    /// A grid is loaded and settled.
    Loaded(TabularModel),
}

/// Single-owner editing session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: EnumSessionState,
    n_seq_load_latest: u64,
    options_text: SpecFixedWidthOptions,
}

impl Session {
    /// Create an empty session with the given formatter options.
    ///
    /// Fails when the column gap is above its maximum.
    pub fn new(options_text: SpecFixedWidthOptions) -> Result<Self, FixedWidthError> {
        validate_fixed_width_options(&options_text)?;
        Ok(Self {
            state: EnumSessionState::Empty,
            n_seq_load_latest: 0,
            options_text,
        })
    }

    /// Current state.
    pub fn state(&self) -> &EnumSessionState {
        &self.state
    }

    /// Loaded model, if any.
    pub fn model(&self) -> Option<&TabularModel> {
        match &self.state {
            EnumSessionState::Empty => None,
            EnumSessionState::Loaded(model) => Some(model),
        }
    }

    /// Whether a grid is loaded.
    pub fn is_loaded(&self) -> bool {
        self.model().is_some()
    }

    /// Formatter options used for preview and export.
    pub fn options_text(&self) -> &SpecFixedWidthOptions {
        &self.options_text
    }

    /// Register a new load request. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.n_seq_load_latest += 1;
        LoadTicket(self.n_seq_load_latest)
    }

    /// Finish a load request with the file's full byte buffer.
    ///
    /// Returns [`EnumLoadOutcome::Stale`] without parsing when a newer ticket
    /// exists. On parse failure the previous state is kept and the error is
    /// returned.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        v_bytes: &[u8],
        format: Option<EnumSheetFormat>,
    ) -> Result<EnumLoadOutcome, SheetLoadError> {
        if ticket.0 != self.n_seq_load_latest {
            tracing::warn!(
                ticket = ticket.0,
                latest = self.n_seq_load_latest,
                "ignoring superseded load"
            );
            return Ok(EnumLoadOutcome::Stale);
        }

        let grid = read_first_sheet_from_bytes(v_bytes, format).inspect_err(|err| {
            tracing::warn!(ticket = ticket.0, error = %err, "load failed, keeping state");
        })?;

        let model = TabularModel::new(grid);
        let (n_rows, n_cols) = (model.grid().n_rows(), model.widths().len());
        self.state = EnumSessionState::Loaded(model);

        tracing::info!(ticket = ticket.0, n_rows, n_cols, "spreadsheet loaded");
        Ok(EnumLoadOutcome::Applied { n_rows, n_cols })
    }

    /// Load a `.xlsx` / `.xls` file from disk as one request.
    pub fn load_path(&mut self, path: &Path) -> Result<EnumLoadOutcome, SheetLoadError> {
        EnumSheetFormat::from_path(path)?;
        let ticket = self.begin_load();
        let v_bytes = read_file_bytes(path)?;
        self.complete_load(ticket, &v_bytes, None)
    }

    /// Replace one cell and settle the widths.
    pub fn edit_cell(
        &mut self,
        row_idx: usize,
        col_idx: usize,
        value: impl Into<String>,
    ) -> Result<(), EditCellError> {
        let EnumSessionState::Loaded(model) = &self.state else {
            return Err(EditCellError::SessionEmpty);
        };
        let model_next = model.edit_cell(row_idx, col_idx, value)?;
        tracing::debug!(row = row_idx, col = col_idx, "cell edited");
        self.state = EnumSessionState::Loaded(model_next);
        Ok(())
    }

    /// Current fixed-width text, or `None` while empty.
    pub fn preview(&self) -> Option<String> {
        self.model().map(|model| model.render(&self.options_text))
    }

    /// Write the fixed-width text as UTF-8.
    ///
    /// No-op returning `Ok(None)` while no spreadsheet is loaded.
    pub fn export(
        &self,
        options: &SpecExportOptions,
    ) -> Result<Option<SpecExportReport>, ExportError> {
        let Some(model) = self.model() else {
            tracing::debug!("export skipped, no spreadsheet loaded");
            return Ok(None);
        };

        let c_text = model.render(&self.options_text);
        let path_file_out = options.path_file_out.clone();
        if options.if_create_parent_dirs
            && let Some(path_dir_parent) = path_file_out.parent()
            && !path_dir_parent.as_os_str().is_empty()
        {
            fs::create_dir_all(path_dir_parent).map_err(|source| ExportError::Io {
                path: path_dir_parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path_file_out, c_text.as_bytes()).map_err(|source| ExportError::Io {
            path: path_file_out.clone(),
            source,
        })?;

        let report = SpecExportReport {
            path_file_out,
            n_rows: model.grid().n_rows(),
            n_cols: model.widths().len(),
            n_bytes: c_text.len(),
        };
        tracing::info!("{report}");
        Ok(Some(report))
    }
}
