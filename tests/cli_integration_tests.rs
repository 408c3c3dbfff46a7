//! CLI Integration Tests
//!
//! Runs the excel2csv binary against workbooks generated with rust_xlsxwriter.
//! Skipped during coverage builds, which do not run the binary.

#![cfg(not(coverage))]
#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::path::PathBuf;
use tempfile::TempDir;

/// Workbook with a "Data" sheet [[a, b], [1, 2]] and a "Notes" sheet [[n1], [n2, n3]]
fn create_workbook(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("book.xlsx");
    let mut workbook = Workbook::new();

    let data = workbook.add_worksheet();
    data.set_name("Data").unwrap();
    data.write_string(0, 0, "a").unwrap();
    data.write_string(0, 1, "b").unwrap();
    data.write_string(1, 0, "1").unwrap();
    data.write_string(1, 1, "2").unwrap();

    let notes = workbook.add_worksheet();
    notes.set_name("Notes").unwrap();
    notes.write_string(0, 0, "n1").unwrap();
    notes.write_string(1, 0, "n2").unwrap();
    notes.write_string(1, 1, "n3").unwrap();

    workbook.save(&path).unwrap();
    path
}

fn excel2csv() -> Command {
    let mut cmd = Command::cargo_bin("excel2csv").unwrap();
    cmd.env_remove("EXCEL2CSV_DELIMITER").env_remove("RUST_LOG");
    cmd
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP, VERSION AND USAGE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    excel2csv()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("excel2csv"))
        .stdout(predicate::str::contains("--range"));
}

#[test]
fn test_cli_version() {
    excel2csv()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("excel2csv"));
}

#[test]
fn test_missing_input_is_usage_error() {
    excel2csv()
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_two_inputs_is_usage_error() {
    excel2csv()
        .args(["one.xlsx", "two.xlsx"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

// ═══════════════════════════════════════════════════════════════════════════
// CONVERSION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_first_sheet_to_stdout() {
    let dir = TempDir::new().unwrap();
    let book = create_workbook(&dir);

    excel2csv()
        .arg(&book)
        .assert()
        .success()
        .stdout("a\tb\n1\t2\n");
}

#[test]
fn test_range_to_stdout() {
    let dir = TempDir::new().unwrap();
    let book = create_workbook(&dir);

    excel2csv()
        .arg(&book)
        .args(["-d", "A1:A2"])
        .assert()
        .success()
        .stdout("a\n1\n");
}

#[test]
fn test_named_sheet_with_delimiter() {
    let dir = TempDir::new().unwrap();
    let book = create_workbook(&dir);

    excel2csv()
        .arg(&book)
        .args(["-s", "Notes", "-r", ",;"])
        .assert()
        .success()
        .stdout("n1\nn2,n3\n");
}

#[test]
fn test_delimiter_from_environment() {
    let dir = TempDir::new().unwrap();
    let book = create_workbook(&dir);

    excel2csv()
        .env("EXCEL2CSV_DELIMITER", "|")
        .arg(&book)
        .assert()
        .success()
        .stdout("a|b\n1|2\n");
}

#[test]
fn test_crlf_and_quote_all() {
    let dir = TempDir::new().unwrap();
    let book = create_workbook(&dir);

    excel2csv()
        .arg(&book)
        .args(["--crlf", "--quote-all", "-d", "A1:B1"])
        .assert()
        .success()
        .stdout("\"a\"\t\"b\"\r\n");
}

#[test]
fn test_output_file() {
    let dir = TempDir::new().unwrap();
    let book = create_workbook(&dir);
    let out = dir.path().join("out.tsv");

    excel2csv()
        .arg(&book)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(std::fs::read_to_string(&out).unwrap(), "a\tb\n1\t2\n");
}

#[test]
fn test_dash_output_means_stdout() {
    let dir = TempDir::new().unwrap();
    let book = create_workbook(&dir);

    excel2csv()
        .arg(&book)
        .args(["-o", "-"])
        .assert()
        .success()
        .stdout("a\tb\n1\t2\n");
}

#[test]
fn test_blank_row_becomes_blank_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gap.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "a").unwrap();
    sheet.write_string(0, 1, "b").unwrap();
    sheet.write_string(2, 0, "1").unwrap();
    sheet.write_string(2, 1, "2").unwrap();
    workbook.save(&path).unwrap();

    excel2csv()
        .arg(&path)
        .assert()
        .success()
        .stdout("a\tb\n\n1\t2\n");

    excel2csv()
        .arg(&path)
        .arg("--crlf")
        .assert()
        .success()
        .stdout("a\tb\r\n\r\n1\t2\r\n");
}

#[test]
fn test_whitespace_sheet_name_exports_nothing() {
    let dir = TempDir::new().unwrap();
    let book = create_workbook(&dir);

    excel2csv()
        .arg(&book)
        .args(["-s", "  "])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_unknown_sheet_exits_zero_with_no_output() {
    let dir = TempDir::new().unwrap();
    let book = create_workbook(&dir);

    excel2csv()
        .arg(&book)
        .args(["-s", "Nope"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    let book = create_workbook(&dir);

    excel2csv()
        .arg(&book)
        .arg("-v")
        .assert()
        .success()
        .stdout("a\tb\n1\t2\n")
        .stderr(predicate::str::contains("conversion complete"));
}

// ═══════════════════════════════════════════════════════════════════════════
// FATAL ERRORS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_missing_workbook_fails() {
    excel2csv()
        .arg("/nonexistent/path/book.xlsx")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_malformed_range_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let book = create_workbook(&dir);
    let out = dir.path().join("out.tsv");

    excel2csv()
        .arg(&book)
        .args(["-d", "A:B2"])
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no row number"));

    assert!(!out.exists());
}

#[test]
fn test_empty_delimiter_fails() {
    let dir = TempDir::new().unwrap();
    let book = create_workbook(&dir);

    excel2csv()
        .arg(&book)
        .args(["-r", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("delimiter"));
}
