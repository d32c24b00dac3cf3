use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;

use axum::Router;
use axum::http::{StatusCode, header};
use axum::routing::get;

const PETSTORE: &str = include_str!("../../swagger-cs-core/tests/fixtures/petstore.json");

fn swagger_cs(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_swagger-cs"))
        .args(args)
        .output()
        .expect("failed to run swagger-cs")
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Serve the pet store document at `/swagger.json` and 404 everywhere else.
fn spawn_document_server() -> SocketAddr {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            let app = Router::new()
                .route(
                    "/swagger.json",
                    get(|| async { ([(header::CONTENT_TYPE, "application/json")], PETSTORE) }),
                )
                .fallback(|| async { StatusCode::NOT_FOUND });
            axum::serve(listener, app).await.unwrap();
        });
    });
    rx.recv().unwrap()
}

#[test]
fn no_arguments_prints_usage() {
    let output = swagger_cs(&[]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("usage: swagger-cs <SOURCE>"));
    assert!(output.stdout.is_empty());
}

#[test]
fn generates_from_local_file() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("swagger.json");
    fs::write(&input, PETSTORE).unwrap();
    let out = tmp.path().join("out");

    let output = swagger_cs(&[input.to_str().unwrap(), "-o", out.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let generated = out.join("PetStoreHttpClient");
    insta::assert_debug_snapshot!(listing(&generated), @r#"
    [
        "BaseApiClient.cs",
        "Empty.cs",
        "Pet.cs",
        "PetStoreV1HttpClient.cs",
        "README.md",
        "Status.cs",
        "UserProfile.cs",
    ]
    "#);

    let client = fs::read_to_string(generated.join("PetStoreV1HttpClient.cs")).unwrap();
    assert!(client.contains("public class PetStoreV1HttpClient : BaseApiClient"));
    assert!(client.contains("PetsGetAsync("));
}

#[test]
fn regenerating_is_byte_identical() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("swagger.json");
    fs::write(&input, PETSTORE).unwrap();

    let first = tmp.path().join("first");
    let second = tmp.path().join("second");
    for out in [&first, &second] {
        let output = swagger_cs(&[input.to_str().unwrap(), "-o", out.to_str().unwrap()]);
        assert!(output.status.success());
    }

    let first = first.join("PetStoreHttpClient");
    let second = second.join("PetStoreHttpClient");
    assert_eq!(listing(&first), listing(&second));
    for name in listing(&first) {
        if name == "README.md" {
            continue;
        }
        assert_eq!(
            fs::read(first.join(&name)).unwrap(),
            fs::read(second.join(&name)).unwrap(),
            "{name} differs"
        );
    }
}

#[test]
fn dry_run_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("swagger.json");
    fs::write(&input, PETSTORE).unwrap();
    let out = tmp.path().join("out");

    let output = swagger_cs(&[
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--dry-run",
        "--no-base-client",
    ]);
    assert!(output.status.success());
    assert!(!out.exists());

    insta::assert_snapshot!(String::from_utf8_lossy(&output.stdout), @r"
    PetStoreV1HttpClient.cs
    Status.cs
    Pet.cs
    UserProfile.cs
    Empty.cs
    README.md
    ");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("components.schemas.PetId"));
}

#[test]
fn generates_from_yaml_file() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("api.yaml");
    fs::write(
        &input,
        "info:\n  title: Orders API\n  version: 1.0.0\npaths:\n  /orders:\n    get: {}\n",
    )
    .unwrap();

    let output = swagger_cs(&[input.to_str().unwrap(), "-o", tmp.path().to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let client = tmp
        .path()
        .join("OrdersAPIHttpClient")
        .join("OrdersAPIV1_0_0HttpClient.cs");
    let content = fs::read_to_string(client).unwrap();
    assert!(content.contains("OrdersGetAsync()"));
}

#[test]
fn malformed_document_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("swagger.json");
    fs::write(&input, "{ not json").unwrap();

    let output = swagger_cs(&[input.to_str().unwrap(), "-o", tmp.path().to_str().unwrap()]);
    assert!(!output.status.success());
    assert_eq!(listing(tmp.path()), vec!["swagger.json"]);
}

#[test]
fn generates_from_url() {
    let addr = spawn_document_server();
    let tmp = tempfile::tempdir().unwrap();

    let url = format!("http://{addr}/swagger.json");
    let output = swagger_cs(&[&url, "-o", tmp.path().to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(
        tmp.path()
            .join("PetStoreHttpClient")
            .join("PetStoreV1HttpClient.cs")
            .exists()
    );
}

#[test]
fn fetch_failure_writes_nothing() {
    let addr = spawn_document_server();
    let tmp = tempfile::tempdir().unwrap();

    let url = format!("http://{addr}/missing.json");
    let output = swagger_cs(&[&url, "-o", tmp.path().to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to fetch"));
    assert!(listing(tmp.path()).is_empty());
}

#[test]
fn schema_names_cannot_leave_output_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("swagger.json");
    fs::write(
        &input,
        r#"{
            "info": {"title": "T", "version": "1"},
            "paths": {},
            "components": {"schemas": {
                "../../escaped": {"properties": {"id": {"type": "integer"}}},
                "a/b": {"properties": {}},
                "Pet": {"properties": {}}
            }}
        }"#,
    )
    .unwrap();
    let out = tmp.path().join("out");

    let output = swagger_cs(&[input.to_str().unwrap(), "-o", out.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    assert!(!tmp.path().join("escaped.cs").exists());
    assert_eq!(listing(tmp.path()), vec!["out", "swagger.json"]);
    assert_eq!(listing(&out), vec!["THttpClient"]);
    insta::assert_debug_snapshot!(listing(&out.join("THttpClient")), @r#"
    [
        "BaseApiClient.cs",
        "Pet.cs",
        "README.md",
        "TV1HttpClient.cs",
    ]
    "#);
}
