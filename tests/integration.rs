use predicates::prelude::*;
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_postgen")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn read_collection(dir: &Path) -> Value {
    let text = std::fs::read_to_string(dir.join("Sample.Api.postman.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn request_names(collection: &Value, folder: &str) -> Vec<String> {
    let folder = collection["folders"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["name"] == folder)
        .unwrap();
    folder["order"]
        .as_array()
        .unwrap()
        .iter()
        .map(|id| {
            let request = collection["requests"]
                .as_array()
                .unwrap()
                .iter()
                .find(|r| r["id"] == *id)
                .unwrap();
            format!(
                "{} {}",
                request["method"].as_str().unwrap(),
                request["name"].as_str().unwrap()
            )
        })
        .collect()
}

// -- generation --

#[test]
fn creates_collection_file() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("Sample.Api.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Postman collection created"));

    let collection = read_collection(dir.path());
    assert_eq!(collection["name"], "Sample.Api");
    assert_eq!(collection["description"], "Sample.Api Api v1.0.0.0");
    assert_eq!(collection["folders"].as_array().unwrap().len(), 2);
    assert_eq!(collection["requests"].as_array().unwrap().len(), 6);
}

#[test]
fn folders_in_catalog_order() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("Sample.Api.json"))
        .assert()
        .success();

    let collection = read_collection(dir.path());
    let folders: Vec<&str> = collection["folders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(folders, ["NoDocTest", "Test"]);
    assert_eq!(collection["folders"][0]["description"], "  \n_ _");
}

#[test]
fn requests_sorted_within_folder() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("Sample.Api.json"))
        .assert()
        .success();

    let collection = read_collection(dir.path());
    assert_eq!(
        request_names(&collection, "Test"),
        [
            "GET api/Test",
            "GET api/Test/:id",
            "GET foo/:id/bar?myIntParameter=&myStringParamter=&myBoolParameter=",
            "GET message/:typeName?skip=&take=",
            "POST api/Test",
        ]
    );
    assert_eq!(request_names(&collection, "NoDocTest"), ["GET api/NoDocTest"]);
}

#[test]
fn environment_key_prefixes_urls() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap(), "-e", "myhost"])
        .arg(fixture_path("Sample.Api.json"))
        .assert()
        .success();

    let collection = read_collection(dir.path());
    for request in collection["requests"].as_array().unwrap() {
        let url = request["url"].as_str().unwrap();
        let name = request["name"].as_str().unwrap();
        assert_eq!(url, format!("{{{{myhost}}}}/{}", name));
    }
}

#[test]
fn route_template_fills_unrouted_actions() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-t", "myapi/v2/{controller}"])
        .arg(fixture_path("Sample.Api.json"))
        .assert()
        .success();

    let collection = read_collection(dir.path());
    let names = request_names(&collection, "Test");
    assert_eq!(names[3], "GET myapi/v2/Test?id=");
    assert!(!names.iter().any(|n| n.contains("api/Test/:id")));
}

#[test]
fn documentation_rendered_as_markdown() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("Sample.Api.json"))
        .assert()
        .success();

    let collection = read_collection(dir.path());
    let requests = collection["requests"].as_array().unwrap();
    let message = requests
        .iter()
        .find(|r| r["name"] == "message/:typeName?skip=&take=")
        .unwrap();
    assert_eq!(message["descriptionFormat"], "markdown");
    assert_eq!(
        message["description"],
        "**Summary** Returns the messages in a queue  \n\
         **Parameters**  \n\
         `string` typeName - _The queue name_, required  \n\
         `Nullable<int>` skip - _The number of records to skip_, optional  \n\
         `Nullable<int>` take - _The number of records to take_, default [10], optional  \n\
         **Returns**  \n\
         `List<string>` - _The list of messages_  \n"
    );

    let undocumented = requests
        .iter()
        .find(|r| r["name"] == "api/NoDocTest")
        .unwrap();
    assert_eq!(
        undocumented["description"],
        "**Returns**  \n`IHttpActionResult`  \n"
    );
}

#[test]
fn folder_key_spelling() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("Sample.Api.json"))
        .assert()
        .success();

    let collection = read_collection(dir.path());
    let folder = &collection["folders"][0];
    assert_eq!(folder["collection_id"], collection["id"]);
    assert!(folder.get("collectionId").is_none());
    let request = &collection["requests"][0];
    assert_eq!(request["collectionId"], collection["id"]);
    assert_eq!(request["headers"], "Content-Type: application/json");
    assert_eq!(request["dataMode"], "raw");
    assert_eq!(request["time"], collection["timestamp"]);
}

// -- samples --

#[test]
fn samples_fill_request_bodies() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-s", &fixture_path("Sample.Api.samples.json")])
        .arg(fixture_path("Sample.Api.json"))
        .assert()
        .success();

    let collection = read_collection(dir.path());
    for request in collection["requests"].as_array().unwrap() {
        if request["method"] == "POST" {
            let body = request["rawModeData"].as_str().unwrap();
            assert!(body.contains("\"Name\": \"sample string 2\""));
        } else {
            assert!(request["rawModeData"].is_null());
        }
    }
}

#[test]
fn without_samples_bodies_are_null() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("Sample.Api.json"))
        .assert()
        .success();

    let collection = read_collection(dir.path());
    assert!(collection["requests"]
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["rawModeData"].is_null()));
}

// -- empty catalogs --

fn empty_catalog(dir: &TempDir) -> std::path::PathBuf {
    let catalog = dir.path().join("Empty.Api.json");
    std::fs::write(&catalog, r#"{ "source": { "name": "Empty.Api", "version": "2.0" } }"#).unwrap();
    std::fs::write(
        dir.path().join("Empty.Api.xml"),
        "<?xml version=\"1.0\"?><doc><members></members></doc>",
    )
    .unwrap();
    catalog
}

#[test]
fn empty_catalog_warns() {
    let dir = TempDir::new().unwrap();
    let catalog = empty_catalog(&dir);

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(&catalog)
        .assert()
        .success()
        .stderr(predicate::str::contains("no API controllers found"));

    let text = std::fs::read_to_string(dir.path().join("Empty.Api.postman.json")).unwrap();
    let collection: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(collection["folders"].as_array().unwrap().len(), 0);
    assert_eq!(collection["requests"].as_array().unwrap().len(), 0);
}

#[test]
fn allow_empty_suppresses_warning() {
    let dir = TempDir::new().unwrap();
    let catalog = empty_catalog(&dir);

    cmd()
        .args(["-o", dir.path().to_str().unwrap(), "--allow-empty"])
        .arg(&catalog)
        .assert()
        .success()
        .stderr(predicate::str::contains("no API controllers found").not());
}

// -- errors --

#[test]
fn missing_documentation_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.xml");

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-d", missing.to_str().unwrap()])
        .arg(fixture_path("Sample.Api.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("XML documentation file not found"));

    assert!(!dir.path().join("Sample.Api.postman.json").exists());
}

#[test]
fn missing_catalog_fails() {
    cmd()
        .arg("/nonexistent/Missing.Api.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("route catalog not found"));
}

#[test]
fn malformed_catalog_fails() {
    let mut f = NamedTempFile::new().unwrap();
    write!(f, "{{ \"routes\": 42 }}").unwrap();

    cmd()
        .arg(f.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed JSON"));
}

#[test]
fn malformed_documentation_fails() {
    let dir = TempDir::new().unwrap();
    let docs = dir.path().join("broken.xml");
    std::fs::write(&docs, "<doc><members>").unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-d", docs.to_str().unwrap()])
        .arg(fixture_path("Sample.Api.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed XML documentation"));
}

#[test]
fn empty_environment_key_fails() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap(), "-e", ""])
        .arg(fixture_path("Sample.Api.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid argument: environment key"));
}

#[test]
fn help_lists_options() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--environment-key"))
        .stdout(predicate::str::contains("--route-template"));
}
