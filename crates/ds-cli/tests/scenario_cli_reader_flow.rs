//! Reading, bookmarking, reacting and sharing against a mock hadith CDN.

use assert_cmd::prelude::*;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::process::Command;

fn section_body(n: u64) -> serde_json::Value {
    let hadiths: Vec<_> = (1..=n)
        .map(|i| json!({"hadithnumber": i, "text": format!("hadith text {i}"),
                        "reference": {"book": 1, "hadith": i}}))
        .collect();
    json!({"metadata": {"name": "Sahih al Bukhari", "section": {"1": "Revelation"}},
           "hadiths": hadiths})
}

fn ds(data: &tempfile::TempDir, server: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("ds").unwrap();
    cmd.current_dir(data.path())
        .env("DS_DATA_DIR", data.path())
        .env("DS_API_BASE", server.base_url())
        .env_remove("RUST_LOG");
    cmd
}

fn serve_section_1(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET).path("/editions/eng-bukhari/sections/1.json");
        then.status(200).json_body(section_body(45));
    });
}

#[test]
fn read_windows_pages_over_one_download() {
    let server = MockServer::start();
    let data = tempfile::tempdir().unwrap();
    let m = server.mock(|when, then| {
        when.method(GET).path("/editions/eng-bukhari/sections/1.json");
        then.status(200).json_body(section_body(45));
    });

    ds(&data, &server)
        .args(["read", "1", "--pages", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("book_name=Sahih al Bukhari section=1: Revelation"))
        .stdout(predicate::str::contains("#7   - [Book 1, Hadith 7] hadith text 7"))
        .stdout(predicate::str::contains("page=2 total_pages=3 items=40"))
        .stdout(predicate::str::contains("#40"))
        .stdout(predicate::str::contains("#41").not());
    m.assert_hits(1);

    ds(&data, &server)
        .args(["read", "1", "--pages", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page=3 total_pages=3 items=45"));
}

#[test]
fn bookmark_toggle_list_open_remove() {
    let server = MockServer::start();
    serve_section_1(&server);
    let data = tempfile::tempdir().unwrap();

    ds(&data, &server)
        .args(["bookmark", "toggle", "1", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id=bukhari:1:25:eng bookmarked=true"));

    ds(&data, &server)
        .args(["bookmark", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bookmarks=1"))
        .stdout(predicate::str::contains("number=25"));

    // Open lands on page 2 and marks the row.
    ds(&data, &server)
        .args(["bookmark", "open", "bukhari:1:25:eng"])
        .assert()
        .success()
        .stdout(predicate::str::contains("book_name=Sahih al Bukhari section=1: Revelation"))
        .stdout(predicate::str::contains("#25 * - [Book 1, Hadith 25] hadith text 25"))
        .stdout(predicate::str::contains("open=bukhari:1:25:eng page=2 index=24"));

    ds(&data, &server)
        .args(["bookmark", "remove", "bukhari:1:25:eng"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed=true"));

    ds(&data, &server)
        .args(["bookmark", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bookmarks=0"));
}

#[test]
fn reaction_toggles_off_on_repeat() {
    let server = MockServer::start();
    let data = tempfile::tempdir().unwrap();

    ds(&data, &server)
        .args(["react", "1", "3", "🤲"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reaction=🤲"));

    ds(&data, &server)
        .args(["reactions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id=bukhari:1:3:eng reaction=🤲"));

    ds(&data, &server)
        .args(["react", "1", "3", "🤲"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reaction=none"));

    ds(&data, &server)
        .args(["react", "1", "3", "🎉"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown reaction"));
}

#[test]
fn share_prints_message_and_survives_export_failure() {
    let server = MockServer::start();
    serve_section_1(&server);
    let data = tempfile::tempdir().unwrap();
    let out = data.path().join("share.txt");

    ds(&data, &server)
        .args(["share", "1", "3", "--out", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("hadith text 3\n\n— bukhari #3"));
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "hadith text 3\n\n— bukhari #3"
    );

    let unwritable = data.path().join("missing-dir").join("share.txt");
    ds(&data, &server)
        .args(["share", "1", "3", "--out", unwritable.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("share export"));
}

#[test]
fn missing_edition_shows_language_hint() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/editions/eng-bukhari.json");
        then.status(404);
    });
    let data = tempfile::tempdir().unwrap();

    ds(&data, &server)
        .args(["sections"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("http status 404"))
        .stderr(predicate::str::contains("Try changing the language to Arabic"));
}

#[test]
fn featured_uses_requested_entry() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/editions/eng-bukhari/7.min.json");
        then.status(200).json_body(section_body(1));
    });
    let data = tempfile::tempdir().unwrap();

    ds(&data, &server)
        .args(["featured", "--number", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("featured_number=7 hadith=1 section=Section 1, Revelation"));

    ds(&data, &server)
        .args(["featured", "--number", "41"])
        .assert()
        .failure();
}
