//! `sheetpad`: first sheet of a `.xlsx` / `.xls` workbook to fixed-width text.

mod logging;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sheetpad_io_xlsx::conf::{derive_default_export_options, derive_default_fixed_width_options};
use sheetpad_io_xlsx::{C_PATH_EXPORT_DEFAULT, N_WIDTH_COLUMN_GAP, Session};

/// One `ROW:COL=VALUE` edit (0-based coordinates).
#[derive(Debug, Clone, PartialEq, Eq)]
struct SpecCellEdit {
    row_idx: usize,
    col_idx: usize,
    value: String,
}

#[derive(Debug, Parser)]
#[command(
    name = "sheetpad",
    version,
    about = "Convert the first sheet of an .xlsx/.xls workbook into fixed-width text"
)]
struct Cli {
    /// Spreadsheet to convert (.xlsx or .xls).
    input: PathBuf,

    /// Text file to write.
    #[arg(short, long, default_value = C_PATH_EXPORT_DEFAULT)]
    output: PathBuf,

    /// Replace one cell before exporting; repeatable, applied in order.
    #[arg(long = "set", value_name = "ROW:COL=VALUE", value_parser = parse_cell_edit)]
    edits: Vec<SpecCellEdit>,

    /// Spaces reserved after the widest value of each column (at most 255).
    #[arg(long, default_value_t = N_WIDTH_COLUMN_GAP)]
    gap: usize,

    /// End the file with a newline after the last row.
    #[arg(long)]
    trailing_newline: bool,

    /// Print the fixed-width text to stdout.
    #[arg(long)]
    preview: bool,

    /// Do not write the output file.
    #[arg(long)]
    dry_run: bool,

    /// Fail instead of creating missing output directories.
    #[arg(long)]
    no_create_dirs: bool,
}

fn parse_cell_edit(raw: &str) -> Result<SpecCellEdit, String> {
    let (c_coords, c_value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ROW:COL=VALUE, got {raw:?}"))?;
    let (c_row, c_col) = c_coords
        .split_once(':')
        .ok_or_else(|| format!("expected ROW:COL before '=', got {c_coords:?}"))?;

    let row_idx = c_row
        .trim()
        .parse::<usize>()
        .map_err(|err| format!("invalid row {c_row:?}: {err}"))?;
    let col_idx = c_col
        .trim()
        .parse::<usize>()
        .map_err(|err| format!("invalid column {c_col:?}: {err}"))?;

    Ok(SpecCellEdit {
        row_idx,
        col_idx,
        value: c_value.to_string(),
    })
}

fn run(cli: Cli) -> Result<()> {
    let mut options_text = derive_default_fixed_width_options();
    options_text.width_gap = cli.gap;
    options_text.if_trailing_newline = cli.trailing_newline;

    let mut session = Session::new(options_text).context("invalid --gap")?;
    session
        .load_path(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;

    for edit in &cli.edits {
        session
            .edit_cell(edit.row_idx, edit.col_idx, edit.value.clone())
            .with_context(|| format!("failed to set {}:{}", edit.row_idx, edit.col_idx))?;
    }

    if cli.preview
        && let Some(c_text) = session.preview()
    {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(c_text.as_bytes())?;
        if !c_text.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
    }

    if cli.dry_run {
        tracing::info!("dry run, nothing written");
        return Ok(());
    }

    let mut options_export = derive_default_export_options();
    options_export.path_file_out = cli.output;
    options_export.if_create_parent_dirs = !cli.no_create_dirs;

    if let Some(report) = session
        .export(&options_export)
        .context("failed to export text")?
    {
        eprintln!("{report}");
    }
    Ok(())
}

fn main() -> Result<()> {
    logging::init();
    run(Cli::parse())
}
