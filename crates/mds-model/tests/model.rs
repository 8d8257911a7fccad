use mds_model::{
    PipelineReport, RecordFieldPolicy, ReservedColumns, ValidationOutcome, Variable, VariableRecord,
};

#[test]
fn variable_directory_key_is_uppercase_name() {
    let variable = Variable::new("Age ");
    assert_eq!(variable.name, "age");
    assert_eq!(variable.directory_key(), "AGE");
}

#[test]
fn reserved_columns_match_case_insensitively() {
    let reserved = ReservedColumns::default();
    assert!(reserved.contains("SIDKRG"));
    assert!(reserved.contains("start_time"));
    assert!(reserved.contains(" Stop_Time "));
    assert!(!reserved.contains("age"));

    let custom = ReservedColumns::new(["s_sidkrg", "start_time", "stop_time"]);
    assert!(custom.contains("S_SIDKRG"));
    assert!(!custom.contains("sidkrg"));
}

#[test]
fn blank_reserved_names_yield_an_empty_set() {
    assert!(ReservedColumns::new([" ", "", "\t"]).is_empty());
    assert!(!ReservedColumns::default().is_empty());
}

#[test]
fn record_fields_follow_policy() {
    let with_times = VariableRecord::new("1", "42", "2024-01-01", "2024-01-02", RecordFieldPolicy::Timestamps);
    assert_eq!(with_times.fields(), ["1", "42", "", "2024-01-01", "2024-01-02"]);

    let blank = VariableRecord::new("1", "42", "2024-01-01", "2024-01-02", RecordFieldPolicy::Blank);
    assert_eq!(blank.fields(), ["1", "42", "", "", ""]);
}

#[test]
fn validation_outcome_from_errors() {
    assert!(ValidationOutcome::from_errors(Vec::new()).is_valid());
    let invalid = ValidationOutcome::from_errors(vec!["bad".to_string()]);
    assert_eq!(invalid, ValidationOutcome::Invalid(vec!["bad".to_string()]));
}

#[test]
fn report_error_accounting() {
    let mut report = PipelineReport::default();
    assert!(!report.has_errors());
    assert_eq!(report.failure_count(), 0);

    report.missing_columns.push("weight".to_string());
    assert!(!report.has_errors(), "missing columns are warnings, not errors");

    report
        .metadata_errors
        .push(("age".to_string(), vec!["missing metadata document".to_string()]));
    report
        .packaging_failures
        .push(("height".to_string(), "encryption failed".to_string()));
    assert!(report.has_errors());
    assert_eq!(report.failure_count(), 2);
}

#[test]
fn report_serializes_to_json() {
    let mut report = PipelineReport::default();
    report.packaged.push("age".to_string());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["packaged"][0], "age");
    assert!(json["metadata_errors"].as_array().unwrap().is_empty());
}
