use proptest::prelude::*;
use sheetpad_io_xlsx::{
    Grid, SpecFixedWidthOptions, TabularModel, compute_column_widths, format_fixed_width,
};

fn rows_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(
        prop::collection::vec("[a-zA-Z0-9 çéã-]{0,12}", 0..6),
        0..12,
    )
}

fn expected_width(rows: &[Vec<String>], n_idx_col: usize) -> usize {
    rows.iter()
        .filter_map(|row| row.get(n_idx_col))
        .map(|cell| cell.chars().count())
        .max()
        .unwrap_or(0)
}

proptest! {
    #[test]
    fn widths_are_column_maxima(rows in rows_strategy()) {
        let grid = Grid::from_rows(rows.clone());
        let widths = compute_column_widths(&grid);

        let n_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        prop_assert_eq!(widths.len(), n_cols);
        for n_idx_col in 0..n_cols {
            prop_assert_eq!(widths.get(n_idx_col), Some(expected_width(&rows, n_idx_col)));
        }
    }

    #[test]
    fn every_formatted_row_has_the_same_length(rows in rows_strategy(), width_gap in 0usize..4) {
        let grid = Grid::from_rows(rows.clone());
        let widths = compute_column_widths(&grid);
        let options = SpecFixedWidthOptions { width_gap, if_trailing_newline: false };
        let c_text = format_fixed_width(&grid, &widths, &options).unwrap();

        prop_assume!(!rows.is_empty());
        let l_lines: Vec<&str> = c_text.split('\n').collect();
        prop_assert_eq!(l_lines.len(), rows.len());
        for c_line in l_lines {
            prop_assert_eq!(c_line.chars().count(), widths.calculate_line_width(width_gap));
        }
    }

    #[test]
    fn edit_matches_full_recompute(
        rows in rows_strategy(),
        n_row_pick in any::<prop::sample::Index>(),
        n_col in 0usize..8,
        value in "[a-z]{0,20}",
    ) {
        prop_assume!(!rows.is_empty());
        let n_row = n_row_pick.index(rows.len());

        let model = TabularModel::new(Grid::from_rows(rows.clone()));
        let model_edited = model.edit_cell(n_row, n_col, value.clone()).unwrap();

        let mut rows_expected = rows;
        let row = &mut rows_expected[n_row];
        if n_col >= row.len() {
            row.resize(n_col + 1, String::new());
        }
        row[n_col] = value;
        let grid_expected = Grid::from_rows(rows_expected);

        prop_assert_eq!(model_edited.grid(), &grid_expected);
        prop_assert_eq!(model_edited.widths(), &compute_column_widths(&grid_expected));
    }
}
