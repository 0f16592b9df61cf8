use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn http_requires_insecure_flag() {
    let home_dir = tempfile::tempdir().expect("tempdir");
    let home = home_dir.path();

    Command::new(assert_cmd::cargo::cargo_bin!("n26"))
        .env("HOME", home)
        .env_remove("N26_CREDENTIALS")
        .args(["--api-url", "http://example.com", "account"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "refusing to use http:// without --insecure",
        ));
}
