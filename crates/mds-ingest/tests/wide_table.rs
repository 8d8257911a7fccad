//! Tests for wide-table reading and the row-symmetry audit.

use std::fs;

use mds_ingest::{check_symmetry, read_variable_list, read_wide_table, write_variable_list};
use tempfile::tempdir;

#[test]
fn reads_semicolon_table_with_bom() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("extract.csv");
    fs::write(
        &path,
        "\u{feff}sidkrg;start_time;stop_time;age;height\n1;2024-01-01;2024-01-02;42;180\n",
    )
    .unwrap();

    let table = read_wide_table(&path).unwrap();
    assert_eq!(
        table.headers,
        vec!["sidkrg", "start_time", "stop_time", "age", "height"]
    );
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.rows[0], vec!["1", "2024-01-01", "2024-01-02", "42", "180"]);
}

#[test]
fn column_lookup_is_case_insensitive() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("extract.csv");
    fs::write(&path, "sidkrg;Age\n1;42\n").unwrap();

    let table = read_wide_table(&path).unwrap();
    assert_eq!(table.column_index("AGE"), Some(1));
    assert_eq!(table.column_index("weight"), None);
}

#[test]
fn short_rows_are_padded_to_header_width() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("extract.csv");
    fs::write(&path, "sidkrg;age;height\n1;42\n2;40;170;extra\n").unwrap();

    let table = read_wide_table(&path).unwrap();
    assert_eq!(table.rows[0], vec!["1", "42", ""]);
    assert_eq!(table.rows[1], vec!["2", "40", "170"]);
}

#[test]
fn empty_table_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "").unwrap();
    assert!(read_wide_table(&path).is_err());
}

#[test]
fn symmetry_flags_mismatched_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("extract.csv");
    fs::write(&path, "sidkrg;age;height\n1;42;180\n2;40\n3;41;170;9\n").unwrap();

    let issues = check_symmetry(&path).unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].line, 3);
    assert_eq!(issues[0].found, 2);
    assert_eq!(issues[0].expected, 3);
    assert_eq!(issues[1].line, 4);
    assert_eq!(issues[1].found, 4);
}

#[test]
fn symmetry_is_clean_for_aligned_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("extract.csv");
    fs::write(&path, "\u{feff}sidkrg;age\n1;42\n\n2;40\n").unwrap();
    assert!(check_symmetry(&path).unwrap().is_empty());
}

#[test]
fn variable_list_round_trip_lowercases_and_skips_blanks() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("variables.txt");
    fs::write(&path, "\u{feff}AGE\n\n  Height \nweight\n").unwrap();

    let names = read_variable_list(&path).unwrap();
    assert_eq!(names, vec!["age", "height", "weight"]);

    let out = dir.path().join("derived.txt");
    write_variable_list(&out, &names).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), "age\nheight\nweight\n");
}
