use std::{fs, path::Path, process::Command};

use indoc::indoc;
use tempfile::TempDir;

fn pgpy(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_pgpy"))
        .current_dir(dir)
        .env("PGPY_LOG", "off")
        .args(args)
        .output()
        .unwrap()
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "schema/types/01_address.sql",
        "CREATE TYPE address AS (street TEXT, zip INTEGER_NOTNULL);",
    );
    write(
        temp.path(),
        "schema/functions/addresses.sql",
        indoc! {"
            CREATE FUNCTION list_addresses(p_limit INTEGER_NOTNULL)
            RETURNS SETOF address LANGUAGE sql AS $$ SELECT NULL::address $$;
        "},
    );
    temp
}

#[test]
fn test_generate_with_flags() {
    let temp = project();

    let output = pgpy(
        temp.path(),
        &["generate", "-i", "schema", "-o", "src", "-m", "app.db"],
    );

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("app.db: 1 type, 0 domains, 1 function from 2 schema files"));
    let module = temp.path().join("src/app/db/functions/addresses.py");
    assert!(fs::read_to_string(module).unwrap().contains("def list_addresses_fetchall("));
    assert!(temp.path().join("src/app/db/py.typed").is_file());
}

#[test]
fn test_generate_from_config_file() {
    let temp = project();
    write(
        temp.path(),
        "pgpy.toml",
        indoc! {r#"
            [generate]
            input = "schema"
            output = "src"
            module = "db"
        "#},
    );

    let output = pgpy(temp.path(), &["generate"]);

    assert!(output.status.success(), "{:?}", output);
    assert!(temp.path().join("src/db/types/address.py").is_file());
    assert!(temp.path().join("src/db/register.py").is_file());
}

#[test]
fn test_check_writes_nothing() {
    let temp = project();

    let output = pgpy(temp.path(), &["check", "-i", "schema", "-m", "db"]);

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("is valid"));
    assert!(stdout.contains("db.functions.addresses"));
    assert!(!temp.path().join("db").exists());
}

#[test]
fn test_malformed_statement_fails_with_file_name() {
    let temp = project();
    write(
        temp.path(),
        "schema/types/02_broken.sql",
        "CREATE TYPE broken AS (a TEXT, b);",
    );

    let output = pgpy(temp.path(), &["check", "-i", "schema", "-m", "db"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("02_broken.sql"), "{stderr}");
}

#[test]
fn test_missing_module_is_reported() {
    let temp = project();

    let output = pgpy(temp.path(), &["generate", "-i", "schema", "-o", "src"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--module"));
}
