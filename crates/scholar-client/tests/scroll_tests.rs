//! Scroll loop tests against an in-memory service

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use rstest::rstest;
use scholar_client::{
    scroll_all, ClientError, ScholarConfig, ScholarResponse, ScrollOutput, ScrollSink,
    SearchRequest, SearchService,
};
use serde_json::{json, Value};

/// Replays scripted responses and records every request it sees.
struct ScriptedService {
    responses: Mutex<VecDeque<Result<ScholarResponse, ClientError>>>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl ScriptedService {
    fn new(responses: Vec<Result<ScholarResponse, ClientError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchService for ScriptedService {
    async fn search(&self, request: &SearchRequest) -> Result<ScholarResponse, ClientError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response left"))
    }

    async fn usage(&self) -> Result<Value, ClientError> {
        Ok(json!({"remaining": 100}))
    }

    async fn by_lens_id(&self, lens_id: &str) -> Result<Value, ClientError> {
        Ok(json!({"lens_id": lens_id}))
    }
}

fn page(ids: &[&str], scroll_id: Option<&str>) -> Result<ScholarResponse, ClientError> {
    Ok(ScholarResponse {
        total: 5,
        data: ids.iter().map(|id| json!({"lens_id": id})).collect(),
        scroll_id: scroll_id.map(str::to_string),
        ..Default::default()
    })
}

fn config() -> ScholarConfig {
    ScholarConfig {
        rate_limit_sleep_secs: 0,
        max_rate_limit_retries: 2,
        ..ScholarConfig::new("secret")
    }
}

fn request() -> SearchRequest {
    SearchRequest::scroll(json!({"bool": {}})).with_size(2)
}

#[tokio::test]
async fn test_scroll_collects_all_pages() {
    let service = ScriptedService::new(vec![
        page(&["a", "b"], Some("s1")),
        page(&["c", "d"], Some("s2")),
        page(&["e"], Some("s3")),
    ]);

    let output = scroll_all(&service, request(), &ScrollSink::Memory, &config())
        .await
        .unwrap();

    let ScrollOutput::Documents(docs) = output else {
        panic!("expected documents");
    };
    let ids: Vec<_> = docs.iter().map(|d| d["lens_id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);

    let scroll_ids: Vec<_> = service
        .requests()
        .into_iter()
        .map(|r| r.scroll_id)
        .collect();
    assert_eq!(
        scroll_ids,
        vec![None, Some("s1".to_string()), Some("s2".to_string())]
    );
}

#[tokio::test]
async fn test_scroll_stops_on_empty_page() {
    let service = ScriptedService::new(vec![page(&["a", "b"], Some("s1")), page(&[], None)]);
    let output = scroll_all(&service, request(), &ScrollSink::Memory, &config())
        .await
        .unwrap();
    assert_eq!(output.len(), 2);
    assert_eq!(service.requests().len(), 2);
}

#[tokio::test]
async fn test_scroll_stops_on_empty_page_with_zero_size() {
    let service = ScriptedService::new(vec![
        page(&[], Some("s1")),
        page(&[], Some("s2")),
        page(&[], Some("s3")),
    ]);
    let request = SearchRequest::scroll(json!({"bool": {}})).with_size(0);

    let output = scroll_all(&service, request, &ScrollSink::Memory, &config())
        .await
        .unwrap();

    assert!(output.is_empty());
    assert_eq!(service.requests().len(), 1);
}

#[tokio::test]
async fn test_scroll_retries_rate_limit() {
    let service = ScriptedService::new(vec![
        page(&["a", "b"], Some("s1")),
        Err(ClientError::RateLimited),
        Err(ClientError::RateLimited),
        page(&["c"], None),
    ]);
    let output = scroll_all(&service, request(), &ScrollSink::Memory, &config())
        .await
        .unwrap();
    assert_eq!(output.len(), 3);

    // Retries resend the same scroll id
    let requests = service.requests();
    assert_eq!(requests.len(), 4);
    assert!(requests[1..]
        .iter()
        .all(|r| r.scroll_id.as_deref() == Some("s1")));
}

#[tokio::test]
async fn test_scroll_gives_up_after_retries() {
    let service = ScriptedService::new(vec![
        Err(ClientError::RateLimited),
        Err(ClientError::RateLimited),
        Err(ClientError::RateLimited),
    ]);
    let err = scroll_all(&service, request(), &ScrollSink::Memory, &config())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::RetriesExhausted { attempts: 3 }));
}

#[rstest]
#[case(401)]
#[case(500)]
#[tokio::test]
async fn test_scroll_stops_on_http_error(#[case] status: u16) {
    let service = ScriptedService::new(vec![
        page(&["a", "b"], Some("s1")),
        Err(ClientError::Status {
            status,
            body: "{}".to_string(),
        }),
    ]);
    let err = scroll_all(&service, request(), &ScrollSink::Memory, &config())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Status { status: s, .. } if s == status));
}

#[tokio::test]
async fn test_scroll_writes_page_files() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("pages");
    let service = ScriptedService::new(vec![page(&["a", "b"], Some("s1")), page(&["c"], None)]);

    let output = scroll_all(
        &service,
        request(),
        &ScrollSink::Directory(target.clone()),
        &config(),
    )
    .await
    .unwrap();

    let ScrollOutput::Files(files) = output else {
        panic!("expected files");
    };
    assert_eq!(files.len(), 2);
    for file in &files {
        assert!(file.starts_with(&target));
        let name = file.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("scroll_data_") && name.ends_with(".json"));
    }

    let first: Value = serde_json::from_str(&std::fs::read_to_string(&files[0]).unwrap()).unwrap();
    assert_eq!(first["data"], json!([{"lens_id": "a"}, {"lens_id": "b"}]));
    assert_eq!(first["scroll_id"], json!("s1"));
}

#[tokio::test]
async fn test_service_is_object_safe() {
    let service: Box<dyn SearchService> = Box::new(ScriptedService::new(vec![page(&["a"], None)]));
    assert_eq!(service.usage().await.unwrap()["remaining"], json!(100));
    assert_eq!(
        service.by_lens_id("020-200-401-307-33X").await.unwrap()["lens_id"],
        json!("020-200-401-307-33X")
    );
    let output = scroll_all(service.as_ref(), request(), &ScrollSink::Memory, &config())
        .await
        .unwrap();
    assert_eq!(output.len(), 1);
}
