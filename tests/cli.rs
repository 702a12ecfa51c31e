use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn elibrary_report(work_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("elibrary-report").unwrap();
    cmd.current_dir(work_dir)
        .env_remove("ELIBRARY_REPORT_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn writes_markdown_report_for_profiles() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("reports");

    elibrary_report(temp_dir.path())
        .arg(fixture("ivanov.html"))
        .arg(fixture("petrov.html"))
        .arg("--output-dir")
        .arg(&out)
        .arg("-q")
        .assert()
        .success()
        .code(0);

    let report = fs::read_to_string(out.join("Output.md")).unwrap();
    assert!(report.contains("## Иванов Иван Иванович"));
    assert!(report.contains("- **Индекс Хирша:** 2"));
    assert!(report.contains("- **Количество статей:** 4"));
    assert!(report.contains("- **Количество статей с нулевым цитированием:** 2"));
    assert!(report.contains("### Модели очередей в сетях хранения"));
    assert!(report.contains("### Журналирование в транзакционных системах"));
    assert!(!report.contains("### Оценка устойчивости"));
    assert!(report.contains("## Петров Пётр Петрович"));
    assert!(report.contains("Discrete Analysis, 2021"));

    // Authors appear in input order
    let ivanov = report.find("Иванов Иван").unwrap();
    let petrov = report.find("Петров Пётр").unwrap();
    assert!(ivanov < petrov);
}

#[test]
fn duplicate_inputs_produce_one_author() {
    let temp_dir = TempDir::new().unwrap();

    elibrary_report(temp_dir.path())
        .arg(fixture("ivanov.html"))
        .arg(fixture("ivanov.html"))
        .args(["--format", "json", "--name", "staff", "-q"])
        .arg("-o")
        .arg(temp_dir.path())
        .assert()
        .success();

    let content = fs::read_to_string(temp_dir.path().join("staff.json")).unwrap();
    let authors: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(authors.as_array().unwrap().len(), 1);
    assert_eq!(authors[0]["hirsch_index"], 2);
    assert_eq!(authors[0]["publications"][0]["venue"], "Программирование, 2020");
}

#[test]
fn directory_input_is_scanned() {
    let temp_dir = TempDir::new().unwrap();
    let profiles = temp_dir.path().join("profiles");
    fs::create_dir_all(&profiles).unwrap();
    fs::copy(fixture("petrov.html"), profiles.join("petrov.html")).unwrap();
    fs::write(profiles.join("notes.txt"), "ignored").unwrap();

    elibrary_report(temp_dir.path())
        .arg(&profiles)
        .args(["--format", "text", "-q"])
        .assert()
        .success();

    let report = fs::read_to_string(temp_dir.path().join("Output.txt")).unwrap();
    assert!(report.starts_with("Петров Пётр Петрович\n"));
    assert!(report.contains("  A note on graph colouring\n"));
    assert!(report.contains("  Petrov P.P., Smirnova A.A.\n"));
    assert!(report.contains("\n  Discrete Analysis, 2021\n"));
}

#[test]
fn invalid_citation_skips_author_by_default() {
    let temp_dir = TempDir::new().unwrap();

    elibrary_report(temp_dir.path())
        .arg(fixture("invalid_citation.html"))
        .arg(fixture("petrov.html"))
        .args(["--output-format", "plain"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("is not a number"));

    let report = fs::read_to_string(temp_dir.path().join("Output.md")).unwrap();
    assert!(report.contains("Петров Пётр Петрович"));
    assert!(!report.contains("Сидоров"));
}

#[test]
fn invalid_citation_aborts_when_requested() {
    let temp_dir = TempDir::new().unwrap();

    elibrary_report(temp_dir.path())
        .arg(fixture("petrov.html"))
        .arg(fixture("invalid_citation.html"))
        .args(["--on-invalid-citation", "abort-run", "--output-format", "plain"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("n/a"));

    assert!(!temp_dir.path().join("Output.md").exists());
}

#[test]
fn blank_profile_is_nothing_to_report() {
    let temp_dir = TempDir::new().unwrap();

    elibrary_report(temp_dir.path())
        .arg(fixture("blank.html"))
        .arg("-q")
        .assert()
        .code(4);

    assert!(!temp_dir.path().join("Output.md").exists());
}

#[test]
fn empty_directory_has_no_sources() {
    let temp_dir = TempDir::new().unwrap();
    let empty = temp_dir.path().join("empty");
    fs::create_dir_all(&empty).unwrap();

    elibrary_report(temp_dir.path())
        .arg(&empty)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No profile exports found"));
}

#[test]
fn existing_report_requires_force() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("Output.md"), "previous").unwrap();

    elibrary_report(temp_dir.path())
        .arg(fixture("petrov.html"))
        .arg("-q")
        .assert()
        .code(6);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("Output.md")).unwrap(),
        "previous"
    );

    elibrary_report(temp_dir.path())
        .arg(fixture("petrov.html"))
        .args(["-q", "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(temp_dir.path().join("Output.md"))
        .unwrap()
        .contains("Петров"));
}

#[test]
fn print_lists_authors_on_console() {
    let temp_dir = TempDir::new().unwrap();

    elibrary_report(temp_dir.path())
        .arg(fixture("ivanov.html"))
        .args(["--print", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Иванов Иван Иванович"))
        .stdout(predicate::str::contains("Индекс Хирша: 2"));
}

#[test]
fn dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();

    elibrary_report(temp_dir.path())
        .arg(fixture("ivanov.html"))
        .args(["--dry-run", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ivanov.html"));

    assert!(!temp_dir.path().join("Output.md").exists());
}

#[test]
fn config_file_is_picked_up_from_working_directory() {
    let temp_dir = TempDir::new().unwrap();

    elibrary_report(temp_dir.path())
        .args(["--generate-config", "--config", "elibrary-report.toml"])
        .assert()
        .success();

    let config_path = temp_dir.path().join("elibrary-report.toml");
    let config = fs::read_to_string(&config_path)
        .unwrap()
        .replace("file_name = \"Output\"", "file_name = \"from-config\"");
    fs::write(&config_path, config).unwrap();

    elibrary_report(temp_dir.path())
        .arg(fixture("petrov.html"))
        .arg("-q")
        .assert()
        .success();

    assert!(temp_dir.path().join("from-config.md").exists());
}

#[test]
fn missing_arguments_show_help() {
    let temp_dir = TempDir::new().unwrap();

    elibrary_report(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
