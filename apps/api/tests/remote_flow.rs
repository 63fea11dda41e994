mod common;

use std::sync::{Arc, Mutex};

use axum::{routing::post, Json, Router};
use bytes::Bytes;
use serde_json::{json, Value};

use common::{pdf_with_pages, spawn_server};
use lens_api::analysis::{AnalyzerBackend, KeywordAnalyzer, LlmAnalyzer};
use lens_api::client::{ClientError, LensClient};
use lens_api::errors::NO_RESUME_MESSAGE;
use lens_api::keywords::compare_texts;
use lens_api::llm_client::LlmClient;
use lens_api::workbench::{Workbench, WorkbenchError};

const RESUME: &str = "Python developer with AWS experience";
const JOB: &str = "Looking for Python and Docker expert";

fn sorted(mut words: Vec<String>) -> Vec<String> {
    words.sort();
    words
}

#[tokio::test]
async fn test_remote_analysis_matches_local_comparison() {
    let (base_url, _state) = spawn_server(Arc::new(KeywordAnalyzer)).await;
    let bench = Workbench::remote(LensClient::new(base_url));

    let upload = bench
        .upload_remote("cv.pdf", None, Bytes::from(pdf_with_pages(&[RESUME])))
        .await
        .unwrap();
    assert_eq!(upload.message, "Resume processed and stored successfully.");
    assert_eq!(upload.session.pages, 1);
    assert!(bench.trigger().is_enabled());

    let remote = bench.analyze_remote(JOB).await.unwrap();
    let local = compare_texts(RESUME, JOB).unwrap();

    assert_eq!(sorted(remote.report.matches.clone()), sorted(local.matches.to_vec()));
    assert_eq!(sorted(remote.report.missing.clone()), sorted(local.additions.to_vec()));
    assert_eq!(sorted(remote.report.deletions.clone()), sorted(local.deletions.to_vec()));
    assert_eq!(remote.report.score, local.score());
    assert_eq!(remote.rendered.matches.to_string(), "[python]");
    assert!(bench.trigger().is_enabled());
}

#[tokio::test]
async fn test_analyze_before_upload_surfaces_server_message() {
    let (base_url, _state) = spawn_server(Arc::new(KeywordAnalyzer)).await;
    let bench = Workbench::remote(LensClient::new(base_url));

    let err = bench.analyze_remote("Rust engineer").await.unwrap_err();
    match err {
        WorkbenchError::Network(ClientError::Status { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, NO_RESUME_MESSAGE);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(bench.trigger().is_enabled());
}

#[tokio::test]
async fn test_multi_page_upload_and_session_teardown() {
    let (base_url, state) = spawn_server(Arc::new(KeywordAnalyzer)).await;
    let client = LensClient::new(base_url);

    let pdf = pdf_with_pages(&["Rust services", "Kubernetes clusters", "Terraform modules"]);
    let upload = client.upload_pdf("cv.pdf", pdf).await.unwrap();
    assert_eq!(upload.session.pages, 3);

    let session = state.sessions.current().await.unwrap();
    let text = session.text.to_lowercase();
    assert!(text.find("rust").unwrap() < text.find("kubernetes").unwrap());
    assert!(text.find("kubernetes").unwrap() < text.find("terraform").unwrap());

    client.clear_session().await.unwrap();
    assert!(state.sessions.current().await.is_none());
}

#[tokio::test]
async fn test_compare_endpoint_through_client() {
    let (base_url, _state) = spawn_server(Arc::new(KeywordAnalyzer)).await;
    let client = LensClient::new(base_url);

    let report = client.compare("rust python", "rust docker").await.unwrap();
    assert_eq!(report.matches, vec!["rust"]);
    assert_eq!(report.missing, vec!["docker"]);
    assert_eq!(report.deletions, vec!["python"]);

    let err = client.compare("rust", " ").await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 400, .. }));
}

#[tokio::test]
async fn test_llm_backend_round_trip() {
    // Stand-in for the Messages API that records the prompt it receives.
    let seen_prompt: Arc<Mutex<Option<String>>> = Arc::default();
    let recorder = seen_prompt.clone();
    let mock = Router::new().route(
        "/v1/messages",
        post(move |Json(body): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                let prompt = body["messages"][0]["content"].as_str().unwrap_or_default().to_string();
                *recorder.lock().unwrap() = Some(prompt);
                Json(json!({
                    "content": [{
                        "type": "text",
                        "text": "SCORE: 64\nMATCHES: Python, AWS\nMISSING: Docker"
                    }],
                    "usage": {"input_tokens": 100, "output_tokens": 12}
                }))
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let mock_addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, mock).await.unwrap();
    });

    let llm = LlmClient::with_api_url("test-key".to_string(), format!("http://{mock_addr}/v1/messages"))
        .unwrap();
    let (base_url, _state) = spawn_server(Arc::new(LlmAnalyzer(llm))).await;
    let client = LensClient::new(base_url);

    client
        .upload_pdf("cv.pdf", pdf_with_pages(&[RESUME]))
        .await
        .unwrap();
    let report = client.analyze(JOB).await.unwrap();

    assert_eq!(report.backend, AnalyzerBackend::Llm);
    assert_eq!(report.score, 64);
    assert_eq!(report.matches, vec!["Python", "AWS"]);
    assert_eq!(report.missing, vec!["Docker"]);
    assert!(report.deletions.is_empty());
    assert!(report.raw_analysis.unwrap().contains("SCORE: 64"));

    let prompt = seen_prompt.lock().unwrap().clone().unwrap();
    assert!(prompt.contains(JOB));
    assert!(prompt.contains("Python developer"));
}
