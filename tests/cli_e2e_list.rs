//! End-to-end tests for the `list` command.

mod common;
use common::prelude::*;

#[test]
fn test_list_prints_sorted_names() {
    let fixture = TestFixture::new().with_catalog(&[
        ("uart", "https://github.com/acme/uart"),
        ("gpio", "git@github.com:acme/gpio.git"),
    ]);
    fixture
        .command()
        .arg("list")
        .assert()
        .success()
        .stdout("gpio\nuart\n");
}

#[test]
fn test_list_long_includes_locators() {
    let fixture = TestFixture::new().with_catalog(&[("gpio", "git@github.com:acme/gpio.git")]);
    fixture
        .command()
        .args(["list", "--long"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gpio\tgit@github.com:acme/gpio.git"));
}

#[test]
fn test_list_empty_catalog() {
    let fixture = TestFixture::new().with_catalog(&[]);
    fixture.command().arg("list").assert().success().stdout("");
}

#[test]
fn test_list_rejects_malformed_catalog() {
    let fixture = TestFixture::new();
    std::fs::write(
        fixture.path().parent().unwrap().join("catalog/repository.json"),
        "{\"libraries\": [1, 2]}",
    )
    .unwrap();
    fixture.command().arg("list").assert().code(1);
}
