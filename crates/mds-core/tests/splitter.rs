//! Tests for the wide-to-long record splitter.

use std::fs;

use mds_core::splitter::{SplitColumns, resolve_split_columns, split};
use mds_core::{catalog, record_file};
use mds_ingest::WideTable;
use mds_model::{RecordFieldPolicy, ReservedColumns, Variable};
use tempfile::tempdir;

fn spec_table() -> WideTable {
    WideTable {
        headers: ["id", "start_time", "stop_time", "age", "height"]
            .map(String::from)
            .to_vec(),
        rows: vec![
            ["1", "2024-01-01", "2024-01-02", "42", "180"]
                .map(String::from)
                .to_vec(),
        ],
    }
}

fn spec_reserved() -> ReservedColumns {
    ReservedColumns::new(["id", "start_time", "stop_time"])
}

#[test]
fn resolves_identifier_and_time_columns() {
    let table = spec_table();
    let columns = resolve_split_columns(&table.headers, &spec_reserved());
    assert_eq!(columns.identifier, "id");
    assert_eq!(columns.start.as_deref(), Some("start_time"));
    assert_eq!(columns.stop.as_deref(), Some("stop_time"));
}

#[test]
fn overridden_reserved_set_still_feeds_the_time_fields() {
    let headers = ["s_sidkrg", "s_start_time", "s_stop_time", "age"]
        .map(String::from)
        .to_vec();
    let reserved = ReservedColumns::new(["s_sidkrg", "s_start_time", "s_stop_time"]);
    let columns = resolve_split_columns(&headers, &reserved);
    assert_eq!(columns.identifier, "s_sidkrg");
    assert_eq!(columns.start.as_deref(), Some("s_start_time"));
    assert_eq!(columns.stop.as_deref(), Some("s_stop_time"));

    let dir = tempdir().unwrap();
    let table = WideTable {
        headers,
        rows: vec![
            ["1", "2024-01-01", "2024-01-02", "42"]
                .map(String::from)
                .to_vec(),
        ],
    };
    split(
        &table,
        &[Variable::new("age")],
        &columns,
        dir.path(),
        RecordFieldPolicy::Timestamps,
    );
    let age = fs::read_to_string(record_file(dir.path(), &Variable::new("age"))).unwrap();
    assert_eq!(age, "1;42;;2024-01-01;2024-01-02\n");
}

#[test]
fn renamed_time_columns_fill_slots_in_header_order() {
    let headers = ["id", "valid_from_time", "valid_to_time", "age"]
        .map(String::from)
        .to_vec();
    let reserved = ReservedColumns::new(["id", "valid_from_time", "valid_to_time"]);
    let columns = resolve_split_columns(&headers, &reserved);
    assert_eq!(columns.start.as_deref(), Some("valid_from_time"));
    assert_eq!(columns.stop.as_deref(), Some("valid_to_time"));
}

#[test]
fn identifier_falls_back_to_first_header() {
    let headers = vec!["subject".to_string(), "age".to_string()];
    let columns = resolve_split_columns(&headers, &ReservedColumns::default());
    assert_eq!(columns.identifier, "subject");
    assert!(columns.start.is_none());
    assert!(columns.stop.is_none());
}

#[test]
fn writes_spec_example_records() {
    let dir = tempdir().unwrap();
    let table = spec_table();
    let reserved = spec_reserved();
    let variables = catalog::extract(&table.headers, &reserved);
    let columns = resolve_split_columns(&table.headers, &reserved);

    let report = split(
        &table,
        &variables,
        &columns,
        dir.path(),
        RecordFieldPolicy::Timestamps,
    );
    assert_eq!(report.manifest, variables);
    assert!(report.missing_columns.is_empty());
    assert!(report.errors.is_empty());

    let age = fs::read_to_string(record_file(dir.path(), &Variable::new("age"))).unwrap();
    assert_eq!(age, "1;42;;2024-01-01;2024-01-02\n");
    let height = fs::read_to_string(record_file(dir.path(), &Variable::new("height"))).unwrap();
    assert_eq!(height, "1;180;;2024-01-01;2024-01-02\n");
}

#[test]
fn blank_policy_leaves_time_fields_empty() {
    let dir = tempdir().unwrap();
    let table = spec_table();
    let reserved = spec_reserved();
    let variables = vec![Variable::new("age")];
    let columns = resolve_split_columns(&table.headers, &reserved);

    split(&table, &variables, &columns, dir.path(), RecordFieldPolicy::Blank);
    let age = fs::read_to_string(record_file(dir.path(), &Variable::new("age"))).unwrap();
    assert_eq!(age, "1;42;;;\n");
}

#[test]
fn one_record_per_row_in_row_order() {
    let dir = tempdir().unwrap();
    let table = WideTable {
        headers: ["id", "age"].map(String::from).to_vec(),
        rows: vec![
            ["1", "42"].map(String::from).to_vec(),
            ["2", "40"].map(String::from).to_vec(),
            ["3", ""].map(String::from).to_vec(),
        ],
    };
    let variables = vec![Variable::new("age")];
    let columns = SplitColumns {
        identifier: "id".to_string(),
        start: None,
        stop: None,
    };

    split(&table, &variables, &columns, dir.path(), RecordFieldPolicy::Timestamps);
    let content = fs::read_to_string(record_file(dir.path(), &Variable::new("age"))).unwrap();
    assert_eq!(content, "1;42;;;\n2;40;;;\n3;;;;\n");
    for line in content.lines() {
        assert_eq!(line.split(';').count(), 5);
    }
}

#[test]
fn missing_column_is_skipped_without_blocking_siblings() {
    let dir = tempdir().unwrap();
    let table = spec_table();
    let reserved = spec_reserved();
    let variables = vec![Variable::new("weight"), Variable::new("age")];
    let columns = resolve_split_columns(&table.headers, &reserved);

    let report = split(
        &table,
        &variables,
        &columns,
        dir.path(),
        RecordFieldPolicy::Timestamps,
    );
    assert_eq!(report.missing_columns, vec!["weight".to_string()]);
    assert_eq!(report.manifest, vec![Variable::new("age")]);
    assert!(!record_file(dir.path(), &Variable::new("weight")).exists());
    assert!(record_file(dir.path(), &Variable::new("age")).exists());
}

#[test]
fn io_error_is_fatal_for_that_variable_only() {
    let dir = tempdir().unwrap();
    // A plain file where AGE's directory should go forces a create_dir_all error.
    fs::write(dir.path().join("AGE"), "blocker").unwrap();

    let table = spec_table();
    let reserved = spec_reserved();
    let variables = catalog::extract(&table.headers, &reserved);
    let columns = resolve_split_columns(&table.headers, &reserved);

    let report = split(
        &table,
        &variables,
        &columns,
        dir.path(),
        RecordFieldPolicy::Timestamps,
    );
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].0, "age");
    assert_eq!(report.manifest, vec![Variable::new("height")]);
    assert!(record_file(dir.path(), &Variable::new("height")).exists());
}

#[test]
fn rerunning_split_overwrites_files_identically() {
    let dir = tempdir().unwrap();
    let table = spec_table();
    let reserved = spec_reserved();
    let variables = catalog::extract(&table.headers, &reserved);
    let columns = resolve_split_columns(&table.headers, &reserved);

    split(&table, &variables, &columns, dir.path(), RecordFieldPolicy::Timestamps);
    let first = fs::read(record_file(dir.path(), &Variable::new("age"))).unwrap();
    split(&table, &variables, &columns, dir.path(), RecordFieldPolicy::Timestamps);
    let second = fs::read(record_file(dir.path(), &Variable::new("age"))).unwrap();
    assert_eq!(first, second);
}
