use std::fs;

use rust_xlsxwriter::Workbook;
use sheetpad_io_xlsx::{
    EnumLoadOutcome, EnumSessionState, EnumSheetFormat, Grid, Session, SpecExportOptions,
    SpecFixedWidthOptions, compute_column_widths, format_fixed_width, read_first_sheet_from_bytes,
};

fn build_fuel_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Name").unwrap();
    worksheet.write_string(0, 1, "Qty").unwrap();
    worksheet.write_string(1, 0, "Gasoline-Premium").unwrap();
    worksheet.write_number(1, 1, 10.0).unwrap();
    worksheet.write_string(2, 0, "Oil").unwrap();
    worksheet.write_number(2, 1, 2.0).unwrap();
    workbook.save_to_buffer().unwrap()
}

fn build_single_column_workbook(values: &[&str]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (n_row, c_value) in values.iter().enumerate() {
        worksheet.write_string(n_row as u32, 0, *c_value).unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

fn load_bytes(session: &mut Session, v_bytes: &[u8]) -> EnumLoadOutcome {
    let ticket = session.begin_load();
    session.complete_load(ticket, v_bytes, None).unwrap()
}

#[test]
fn reads_first_sheet_as_text_rows() {
    let grid = read_first_sheet_from_bytes(&build_fuel_workbook(), Some(EnumSheetFormat::Xlsx))
        .expect("parse xlsx");

    assert_eq!(grid.n_rows(), 3);
    assert_eq!(grid.header().unwrap(), ["Name", "Qty"]);
    assert_eq!(grid.cell(1, 0), "Gasoline-Premium");
    assert_eq!(grid.cell(1, 1), "10");
    assert_eq!(grid.cell(2, 1), "2");
}

#[test]
fn reads_only_the_first_sheet() {
    let mut workbook = Workbook::new();
    workbook
        .add_worksheet()
        .set_name("First")
        .unwrap()
        .write_string(0, 0, "first")
        .unwrap();
    workbook
        .add_worksheet()
        .set_name("Second")
        .unwrap()
        .write_string(0, 0, "second-sheet-value")
        .unwrap();
    let v_bytes = workbook.save_to_buffer().unwrap();

    let grid = read_first_sheet_from_bytes(&v_bytes, None).unwrap();
    assert_eq!(grid.rows(), [vec!["first".to_string()]]);
}

#[test]
fn ragged_rows_are_kept_short_and_formatted_without_error() {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "A").unwrap();
    worksheet.write_string(0, 1, "BB").unwrap();
    worksheet.write_string(0, 2, "CCC").unwrap();
    worksheet.write_string(1, 0, "OnlyOneCell").unwrap();
    let v_bytes = workbook.save_to_buffer().unwrap();

    let mut session = Session::default();
    load_bytes(&mut session, &v_bytes);

    let model = session.model().unwrap();
    assert_eq!(model.grid().row(1).unwrap(), ["OnlyOneCell"]);
    assert_eq!(model.widths().as_slice(), &[11, 2, 3]);
    assert_eq!(
        session.preview().unwrap(),
        format!("A            BB  CCC  \nOnlyOneCell{}", " ".repeat(11))
    );
}

#[test]
fn export_without_edits_matches_direct_formatting() {
    let v_bytes = build_fuel_workbook();
    let dir = tempfile::tempdir().unwrap();
    let path_file_out = dir.path().join("export").join("abastecimentos.txt");

    let mut session = Session::default();
    assert_eq!(
        load_bytes(&mut session, &v_bytes),
        EnumLoadOutcome::Applied {
            n_rows: 3,
            n_cols: 2
        }
    );
    let report = session
        .export(&SpecExportOptions {
            path_file_out: path_file_out.clone(),
            if_create_parent_dirs: true,
        })
        .unwrap()
        .expect("loaded session exports");

    let grid = read_first_sheet_from_bytes(&v_bytes, None).unwrap();
    let c_expected = format_fixed_width(
        &grid,
        &compute_column_widths(&grid),
        &SpecFixedWidthOptions::default(),
    )
    .unwrap();
    let c_written = fs::read_to_string(&path_file_out).unwrap();

    assert_eq!(c_written, c_expected);
    assert_eq!(Some(c_written.clone()), session.preview());
    assert_eq!(report.n_bytes, c_written.len());
    assert_eq!(report.n_rows, 3);
    assert_eq!(
        c_written,
        "Name              Qty  \nGasoline-Premium  10   \nOil               2    "
    );
}

#[test]
fn edit_then_export_reflects_shrunk_width() {
    let mut session = Session::default();
    load_bytes(&mut session, &build_fuel_workbook());

    session.edit_cell(1, 0, "Gas").unwrap();
    assert_eq!(session.model().unwrap().widths().get(0), Some(4));

    let dir = tempfile::tempdir().unwrap();
    let path_file_out = dir.path().join("out.txt");
    session
        .export(&SpecExportOptions {
            path_file_out: path_file_out.clone(),
            if_create_parent_dirs: false,
        })
        .unwrap();

    assert_eq!(
        fs::read_to_string(&path_file_out).unwrap(),
        "Name  Qty  \nGas   10   \nOil   2    "
    );
}

#[test]
fn reload_replaces_grid_entirely() {
    let mut session = Session::default();
    load_bytes(&mut session, &build_fuel_workbook());
    session.edit_cell(2, 4, "extra").unwrap();

    load_bytes(&mut session, &build_single_column_workbook(&["x", "yy"]));

    let model = session.model().unwrap();
    assert_eq!(
        model.grid(),
        &Grid::from_rows(vec![vec!["x".to_string()], vec!["yy".to_string()]])
    );
    assert_eq!(model.widths().as_slice(), &[2]);
}

#[test]
fn out_of_order_reads_keep_the_newest_file() {
    let mut session = Session::default();
    let ticket_first = session.begin_load();
    let ticket_second = session.begin_load();

    let outcome_second = session
        .complete_load(ticket_second, &build_single_column_workbook(&["second"]), None)
        .unwrap();
    assert!(matches!(outcome_second, EnumLoadOutcome::Applied { .. }));

    let outcome_first = session
        .complete_load(ticket_first, &build_fuel_workbook(), None)
        .unwrap();
    assert_eq!(outcome_first, EnumLoadOutcome::Stale);
    assert_eq!(session.model().unwrap().cell(0, 0), "second");
}

#[test]
fn failed_reload_keeps_previous_grid() {
    let mut session = Session::default();
    load_bytes(&mut session, &build_fuel_workbook());
    let state_before = session.state().clone();

    let ticket = session.begin_load();
    assert!(session.complete_load(ticket, b"PK\x03\x04broken", None).is_err());

    assert_eq!(session.state(), &state_before);
    assert!(matches!(session.state(), EnumSessionState::Loaded(_)));
}

#[test]
fn load_path_accepts_uppercase_extension_and_sniffs_content() {
    let dir = tempfile::tempdir().unwrap();
    let path_file_in = dir.path().join("Fuel.XLS");
    fs::write(&path_file_in, build_fuel_workbook()).unwrap();

    let mut session = Session::default();
    let outcome = session.load_path(&path_file_in).unwrap();

    assert_eq!(
        outcome,
        EnumLoadOutcome::Applied {
            n_rows: 3,
            n_cols: 2
        }
    );
}

#[test]
fn trailing_newline_option_applies_to_export() {
    let mut session = Session::new(SpecFixedWidthOptions {
        width_gap: 1,
        if_trailing_newline: true,
    })
    .unwrap();
    load_bytes(&mut session, &build_single_column_workbook(&["ab", "c"]));

    assert_eq!(session.preview().unwrap(), "ab \nc  \n");
}
