use robodilute::{process_plate, read_table, PipelineError, RunOptions, TableError};
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Two-column plate: numeric headers, A2 left as a `#N/A` marker.
fn write_small_plate(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    sheet.write_number(0, 1, 1).unwrap();
    sheet.write_number(0, 2, 2).unwrap();

    sheet.write_string(1, 0, "A").unwrap();
    sheet.write_number(1, 1, 5.0).unwrap();
    sheet.write_string(1, 2, "#N/A").unwrap();

    sheet.write_string(2, 0, "B").unwrap();
    sheet.write_number(2, 1, 0.5).unwrap();
    sheet.write_number(2, 2, 3.3).unwrap();

    workbook.save(path).unwrap();
}

#[test]
fn test_xlsx_is_read_through_workbook_loader() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("plate.xlsx");
    write_small_plate(&input);

    let loaded = read_table(&input).unwrap();
    assert_eq!(loaded.encoding, "workbook");
    assert_eq!(loaded.delimiter, None);
    assert_eq!(loaded.table.column_headers, vec!["1", "2"]);
    assert_eq!(loaded.table.populated_cells(), 3);
}

#[test]
fn test_xlsx_plate_end_to_end() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("plate.xlsx");
    write_small_plate(&input);

    let run = process_plate(&input, &RunOptions::default()).unwrap();
    assert_eq!(run.rows.len(), 3);

    let out = dir.path().join("robo_sp3_info");
    assert_eq!(
        fs::read_to_string(out.join("robo_sp3_info.txt")).unwrap(),
        "org_pos; new_pos; org_con; sample_vol; buffer_vol\n\
         A1; A1; 5.0; 2.0; 28.0\n\
         B1; B1; 0.5; 20.0; 10.0\n\
         B2; C1; 3.3; 3.0; 27.0"
    );
    assert_eq!(fs::read_to_string(out.join("org_pos.txt")).unwrap(), "A1\nB1\nB2");
}

#[test]
fn test_blank_worksheet_is_malformed() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("blank.xlsx");
    let mut workbook = Workbook::new();
    workbook.add_worksheet();
    workbook.save(&input).unwrap();

    let err = process_plate(&input, &RunOptions::default()).unwrap_err();
    assert!(matches!(err, PipelineError::Table(TableError::EmptyFile)));
    assert_eq!(err.title(), "Malformed Input");
    assert!(!dir.path().join("robo_sp3_info").exists());
}
