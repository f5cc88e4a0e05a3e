use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const SORT: &str = "\
int x;
int minloc(int a, int low, int high)
{
  int k;
  k = low;
  while (low < high)
  {
    if (a < k) k = low;
    low = low + 1;
  }
  return k;
}

void main(void)
{
  x = minloc(input(), 0, 10);
  output(x);
}
";

#[test]
fn compiles_clean_program() {
    let dir = tempdir().expect("tempdir");
    let input_path = dir.path().join("sort.cm");
    fs::write(&input_path, SORT).expect("write input");

    Command::cargo_bin("cminus")
        .expect("binary exists")
        .arg(&input_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("C-MINUS COMPILATION:"))
        .stdout(predicate::str::contains("error").not());
}

#[test]
fn appends_source_extension() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("sort.cm"), SORT).expect("write input");

    Command::cargo_bin("cminus")
        .expect("binary exists")
        .arg(dir.path().join("sort"))
        .assert()
        .success()
        .stdout(predicate::str::contains("sort.cm"));
}

#[test]
fn trace_prints_tree_and_symbol_table() {
    let dir = tempdir().expect("tempdir");
    let input_path = dir.path().join("sort.cm");
    fs::write(&input_path, SORT).expect("write input");

    Command::cargo_bin("cminus")
        .expect("binary exists")
        .arg(&input_path)
        .arg("--trace")
        .assert()
        .success()
        .stdout(predicate::str::contains("   1: int x;"))
        .stdout(predicate::str::contains("reserved word: while"))
        .stdout(predicate::str::contains("Syntax tree:"))
        .stdout(predicate::str::contains(
            "Function Declaration: minloc (returns int)",
        ))
        .stdout(predicate::str::contains("Symbol table:"))
        .stdout(predicate::str::contains("Type Checking Finished"));
}

#[test]
fn reports_type_errors_and_fails() {
    let dir = tempdir().expect("tempdir");
    let input_path = dir.path().join("bad.cm");
    fs::write(&input_path, "void main(void)\n{\n  if (1) x = 1;\n}\n").expect("write input");

    Command::cargo_bin("cminus")
        .expect("binary exists")
        .arg(&input_path)
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Type error at line 3: if test is not Boolean",
        ))
        .stderr(predicate::str::contains("1 error(s) found"));
}

#[test]
fn reports_syntax_errors_without_type_checking() {
    let dir = tempdir().expect("tempdir");
    let input_path = dir.path().join("bad.cm");
    fs::write(&input_path, "void main(void)\n{\n  x = ;\n  if (1) x = 1;\n}\n")
        .expect("write input");

    Command::cargo_bin("cminus")
        .expect("binary exists")
        .arg(&input_path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Syntax error at line 3"))
        .stdout(predicate::str::contains("Type error").not());
}

#[test]
fn reports_missing_source() {
    let dir = tempdir().expect("tempdir");

    Command::cargo_bin("cminus")
        .expect("binary exists")
        .arg(dir.path().join("absent.cm"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read source"));
}
