use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const ENGIE_ORDER: &str = "\
ENGIE Solicitação de Proposta
0000112345678PARAFUSO SEXTAVADO4UN2024-01-01
Marca: Acme
REF: X1
AÇO INOX
Processado por computador
";

const MD_GROUP_ORDER: &str = "\
Encomenda
123450,50un0,100,05203 - Bolt M8 - 01/01/2024
000021,00pcs1,001,00204 - Nut M8 - 02/01/2024
";

fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Config file in the temp dir, so tests never read the user's config.
fn isolated_config(dir: &Path) -> PathBuf {
    write_fixture(dir, "config.json", "{}")
}

#[test]
fn extract_multi_line_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "engie.txt", ENGIE_ORDER);

    let mut cmd = cargo_bin_cmd!("orderlines");
    cmd.arg("-c")
        .arg(isolated_config(dir.path()))
        .arg("extract")
        .arg(&input)
        .arg("--format")
        .arg("json");

    let output_pred = predicate::str::contains(r#""materialCode": "12345678""#)
        .and(predicate::str::contains(r#""brand": "Acme""#))
        .and(predicate::str::contains("PARAFUSO SEXTAVADO AÇO INOX"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn extract_fused_line_as_csv() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "md.txt", MD_GROUP_ORDER);

    let mut cmd = cargo_bin_cmd!("orderlines");
    cmd.arg("-c")
        .arg(isolated_config(dir.path()))
        .arg("extract")
        .arg(&input)
        .args(["--layout", "c", "--format", "csv"]);

    let output_pred = predicate::str::contains(
        "itemNumber,quantity,unitOfMeasure,deliveryDate,description,price,amount",
    )
    .and(predicate::str::contains("12345,0.5,UN,01/01/2024,MD5863 203 - Bolt M8,0.1,0.05"))
    .and(predicate::str::contains("00002,1,PCS,02/01/2024,MD5863 204 - Nut M8,1,1"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn extract_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "md.txt", MD_GROUP_ORDER);
    let output = dir.path().join("out.json");

    let mut cmd = cargo_bin_cmd!("orderlines");
    cmd.arg("-c")
        .arg(isolated_config(dir.path()))
        .arg("extract")
        .arg(&input)
        .args(["-f", "json", "-o"])
        .arg(&output);

    cmd.assert().success();

    let records: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(records.as_array().unwrap().len(), 2);
}

#[test]
fn extract_missing_source_fails() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("orderlines");
    cmd.arg("-c")
        .arg(isolated_config(dir.path()))
        .arg("extract")
        .arg(dir.path().join("absent.pdf"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Source unavailable"));
}

#[test]
fn extract_rejects_unknown_layout() {
    let mut cmd = cargo_bin_cmd!("orderlines");
    cmd.args(["extract", "order.txt", "--layout", "z"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown layout"));
}

#[test]
fn lines_prints_normalized_lines() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "engie.txt", &format!("\n  {}\n\n", ENGIE_ORDER));

    let mut cmd = cargo_bin_cmd!("orderlines");
    cmd.arg("-c")
        .arg(isolated_config(dir.path()))
        .args(["lines", "--numbered"])
        .arg(&input);

    let output_pred = predicate::str::starts_with("0  ENGIE Solicitação de Proposta\n")
        .and(predicate::str::contains("2  Marca: Acme\n"))
        .and(predicate::str::contains("5  Processado por computador\n"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn lines_writes_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "md.txt", MD_GROUP_ORDER);
    let output = dir.path().join("md-lines.txt");

    let mut cmd = cargo_bin_cmd!("orderlines");
    cmd.arg("-c")
        .arg(isolated_config(dir.path()))
        .arg("lines")
        .arg(&input)
        .arg("-o")
        .arg(&output);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("3 lines written"));

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().collect::<Vec<_>>()[0], "Encomenda");
    assert_eq!(written.lines().count(), 3);
}

#[test]
fn lines_missing_source_fails() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("orderlines");
    cmd.arg("-c")
        .arg(isolated_config(dir.path()))
        .arg("lines")
        .arg(dir.path().join("absent.txt"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Source unavailable"));
}

#[test]
fn extract_table_to_file_is_plain_text() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "md.txt", MD_GROUP_ORDER);
    let output = dir.path().join("out.txt");

    let mut cmd = cargo_bin_cmd!("orderlines");
    cmd.env("CLICOLOR_FORCE", "1")
        .arg("-c")
        .arg(isolated_config(dir.path()))
        .arg("extract")
        .arg(&input)
        .args(["-f", "table", "-o"])
        .arg(&output);

    cmd.assert().success();

    let table = fs::read_to_string(&output).unwrap();
    assert!(table.starts_with("fused-line (MD GROUP) - 2 items\n"));
    assert!(!table.contains("\x1b["));
}

#[test]
fn layouts_lists_all_vendors() {
    let mut cmd = cargo_bin_cmd!("orderlines");
    cmd.arg("layouts");

    let output_pred = predicate::str::contains("multi-line")
        .and(predicate::str::contains("GLN"))
        .and(predicate::str::contains("experimental"))
        .and(predicate::str::contains("MD GROUP"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn batch_writes_outputs_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), "engie.txt", ENGIE_ORDER);
    write_fixture(dir.path(), "md.txt", MD_GROUP_ORDER);
    write_fixture(dir.path(), "notes.md", "ignored");
    let out_dir = dir.path().join("out");
    let pattern = format!("{}/*", dir.path().display());

    let mut cmd = cargo_bin_cmd!("orderlines");
    cmd.arg("-c")
        .arg(isolated_config(dir.path()))
        .arg("batch")
        .arg(&pattern)
        .arg("--output-dir")
        .arg(&out_dir)
        .arg("--summary");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files"));

    assert!(out_dir.join("engie.json").exists());
    assert!(out_dir.join("md.json").exists());

    let summary = fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,records"));
    assert!(summary.contains("engie.txt,success,1,1,0,0"));
    assert!(summary.contains("md.txt,success,2,0,0,2"));
}

#[test]
fn config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");

    cargo_bin_cmd!("orderlines")
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();

    cargo_bin_cmd!("orderlines")
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "extraction.description_prefix", "QF"])
        .assert()
        .success();

    cargo_bin_cmd!("orderlines")
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "extraction.description_prefix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"QF\""));
}
