//! Integration tests for the search client against a mocked engine

use std::sync::{Arc, Mutex};

use elastic_filesearch::{
    CallEvent, CallObserver, ClientConfig, ClientConfigBuilder, ElasticClient, Error, FileDocument,
    MatchQuerySpec, SearchRequest, TermSuggestSpec,
};
use mockito::Matcher;
use serde_json::json;

/// Observer test double recording every outbound call
#[derive(Default)]
struct CountingObserver {
    calls: Mutex<Vec<(String, Option<u16>)>>,
}

impl CountingObserver {
    fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl CallObserver for CountingObserver {
    fn on_call(&self, event: &CallEvent<'_>) {
        self.calls
            .lock()
            .unwrap()
            .push((format!("{} {}", event.method, event.url), event.status));
    }
}

fn test_config(server: &mockito::ServerGuard, index: &str) -> ClientConfig {
    ClientConfigBuilder::new()
        .index_name(index)
        .node(server.url().parse().unwrap())
        .timeout_secs(5)
        .build()
}

#[tokio::test]
async fn test_connect_skips_creation_when_index_exists() {
    let mut server = mockito::Server::new_async().await;
    let head = server
        .mock("HEAD", "/files")
        .with_status(200)
        .create_async()
        .await;
    let put = server
        .mock("PUT", "/files")
        .expect(0)
        .create_async()
        .await;

    let client = ElasticClient::connect(test_config(&server, "files")).await;
    assert!(client.is_ok());

    head.assert_async().await;
    put.assert_async().await;
}

#[tokio::test]
async fn test_connect_creates_missing_index_with_analyzer() {
    let mut server = mockito::Server::new_async().await;
    let head = server
        .mock("HEAD", "/files")
        .with_status(404)
        .create_async()
        .await;
    let put = server
        .mock("PUT", "/files")
        .match_body(Matcher::PartialJson(json!({
            "settings": {
                "analysis": {
                    "analyzer": {
                        "windows_path_hierarchy_analyzer": {
                            "type": "custom",
                            "tokenizer": "windows_path_hierarchy_tokenizer"
                        }
                    },
                    "tokenizer": {
                        "windows_path_hierarchy_tokenizer": {
                            "type": "path_hierarchy",
                            "delimiter": "\\"
                        }
                    }
                }
            }
        })))
        .with_status(200)
        .with_body(r#"{"acknowledged": true, "index": "files"}"#)
        .create_async()
        .await;

    let client = ElasticClient::connect(test_config(&server, "files")).await;
    assert!(client.is_ok());

    head.assert_async().await;
    put.assert_async().await;
}

#[tokio::test]
async fn test_empty_index_name_fails_before_any_network_call() {
    let mut server = mockito::Server::new_async().await;
    let any = server
        .mock("HEAD", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let observer = Arc::new(CountingObserver::default());
    let config = ClientConfigBuilder::new()
        .node(server.url().parse().unwrap())
        .build();
    let err = ElasticClient::connect_with_observer(config, observer.clone())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Configuration(_)));
    assert_eq!(observer.count(), 0);
    any.assert_async().await;
}

#[tokio::test]
async fn test_missing_node_fails_before_any_network_call() {
    let observer = Arc::new(CountingObserver::default());
    let config = ClientConfigBuilder::new().index_name("files").build();
    let err = ElasticClient::connect_with_observer(config, observer.clone())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Configuration(_)));
    assert_eq!(observer.count(), 0);
}

#[tokio::test]
async fn test_failed_existence_check_is_construction_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("HEAD", "/files")
        .with_status(500)
        .create_async()
        .await;

    let err = ElasticClient::connect(test_config(&server, "files"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Construction(_)));
}

#[tokio::test]
async fn test_failed_index_creation_is_construction_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("HEAD", "/files")
        .with_status(404)
        .create_async()
        .await;
    server
        .mock("PUT", "/files")
        .with_status(400)
        .with_body(r#"{"error": {"type": "invalid_index_name_exception"}}"#)
        .create_async()
        .await;

    let err = ElasticClient::connect(test_config(&server, "files"))
        .await
        .unwrap_err();
    match err {
        Error::Construction(message) => {
            assert!(message.contains("invalid_index_name_exception"))
        }
        other => panic!("expected construction error, got {other:?}"),
    }
}

async fn connected_client(server: &mut mockito::ServerGuard) -> ElasticClient {
    server
        .mock("HEAD", "/files")
        .with_status(200)
        .create_async()
        .await;
    ElasticClient::connect(test_config(server, "files"))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_search_compiles_request_and_normalizes_response() {
    let mut server = mockito::Server::new_async().await;
    let client = connected_client(&mut server).await;

    let search = server
        .mock("POST", "/files/_search")
        .match_body(Matcher::PartialJson(json!({
            "query": {"match": {"name": {"query": "report"}}}
        })))
        .with_status(200)
        .with_body(
            json!({
                "took": 2,
                "timed_out": false,
                "hits": {
                    "total": {"value": 1, "relation": "eq"},
                    "hits": [{
                        "_index": "files",
                        "_id": "1",
                        "_score": 1.2,
                        "_source": {"id": 1, "content_base64": "aGVsbG8="},
                        "highlight": {
                            "name": ["<em>report</em>"],
                            "attachment.content": ["annual <em>report</em>"]
                        }
                    }]
                },
                "suggest": {
                    "termSuggest": [{
                        "text": "reprot",
                        "offset": 0,
                        "length": 6,
                        "options": [{"text": "report", "score": 0.9, "freq": 3}]
                    }]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let request = SearchRequest::new()
        .with_match(MatchQuerySpec::new("name", "report"))
        .with_suggest(
            elastic_filesearch::SuggestSpec::new()
                .with_term(TermSuggestSpec::new("name", "reprot")),
        );
    let hits = client.search::<serde_json::Value>(&request).await.unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "1");
    assert_eq!(
        hits[0].highlights,
        vec!["<em>report</em>", "annual <em>report</em>"]
    );
    assert_eq!(hits[0].suggestions, vec!["report"]);
    assert_eq!(hits[0].document.as_ref().unwrap()["id"], 1);
    search.assert_async().await;
}

#[tokio::test]
async fn test_search_engine_error_surfaces_as_query_error() {
    let mut server = mockito::Server::new_async().await;
    let client = connected_client(&mut server).await;

    let diagnostics =
        r#"{"error": {"type": "search_phase_execution_exception", "reason": "all shards failed"}}"#;
    server
        .mock("POST", "/files/_search")
        .with_status(400)
        .with_body(diagnostics)
        .create_async()
        .await;

    let request = SearchRequest::new().with_match(MatchQuerySpec::new("name", "x"));
    let err = client
        .search::<serde_json::Value>(&request)
        .await
        .unwrap_err();

    match err {
        Error::Query(message) => assert_eq!(message, diagnostics),
        other => panic!("expected query error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_insert_routes_through_pipeline_and_waits_for_refresh() {
    let mut server = mockito::Server::new_async().await;
    let client = connected_client(&mut server).await;

    let insert = server
        .mock("PUT", "/files/_doc/1")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("pipeline".into(), "attachment".into()),
            Matcher::UrlEncoded("refresh".into(), "wait_for".into()),
        ]))
        .match_body(Matcher::PartialJson(json!({
            "id": 1,
            "content_base64": "aGVsbG8="
        })))
        .with_status(201)
        .with_body(r#"{"_id": "1", "result": "created"}"#)
        .create_async()
        .await;

    let ack = client
        .insert_doc(&FileDocument::from_bytes(1, b"hello"))
        .await
        .unwrap();

    assert_eq!(ack.id, "1");
    assert_eq!(ack.result, "created");
    insert.assert_async().await;
}

#[tokio::test]
async fn test_delete_doc_by_id() {
    let mut server = mockito::Server::new_async().await;
    let client = connected_client(&mut server).await;

    let delete = server
        .mock("DELETE", "/files/_doc/7")
        .with_status(200)
        .with_body(r#"{"_id": "7", "result": "deleted"}"#)
        .create_async()
        .await;

    let ack = client.delete_doc(7).await.unwrap();
    assert_eq!(ack.result, "deleted");
    delete.assert_async().await;
}

#[tokio::test]
async fn test_delete_missing_doc_acknowledged_as_not_found() {
    let mut server = mockito::Server::new_async().await;
    let client = connected_client(&mut server).await;

    server
        .mock("DELETE", "/files/_doc/9")
        .with_status(404)
        .with_body(r#"{"_id": "9", "result": "not_found"}"#)
        .create_async()
        .await;

    let ack = client.delete_doc(9).await.unwrap();
    assert_eq!(ack.result, "not_found");
}

#[tokio::test]
async fn test_delete_index() {
    let mut server = mockito::Server::new_async().await;
    let client = connected_client(&mut server).await;

    let delete = server
        .mock("DELETE", "/files")
        .with_status(200)
        .with_body(r#"{"acknowledged": true}"#)
        .create_async()
        .await;

    client.delete_index().await.unwrap();
    delete.assert_async().await;
}

#[tokio::test]
async fn test_observer_reports_method_url_and_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("HEAD", "/files")
        .with_status(200)
        .create_async()
        .await;

    let observer = Arc::new(CountingObserver::default());
    ElasticClient::connect_with_observer(test_config(&server, "files"), observer.clone())
        .await
        .unwrap();

    let calls = observer.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].0.starts_with("HEAD"));
    assert!(calls[0].0.contains("/files"));
    assert_eq!(calls[0].1, Some(200));
}

#[test]
fn test_blocking_variants_match_async_semantics() {
    let mut server = mockito::Server::new();
    server.mock("HEAD", "/files").with_status(200).create();
    server
        .mock("POST", "/files/_search")
        .with_status(200)
        .with_body(
            json!({
                "hits": {"hits": [{"_id": "1", "_source": {"id": 1}}]}
            })
            .to_string(),
        )
        .create();
    server
        .mock("DELETE", "/files/_doc/1")
        .with_status(200)
        .with_body(r#"{"_id": "1", "result": "deleted"}"#)
        .create();

    let config = ClientConfigBuilder::new()
        .index_name("files")
        .node(server.url().parse().unwrap())
        .build();
    let client = ElasticClient::connect_blocking(config).unwrap();

    let request = SearchRequest::new().with_match(MatchQuerySpec::new("name", "x"));
    let hits = client
        .search_blocking::<serde_json::Value>(&request)
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "1");

    let ack = client.delete_doc_blocking(1).unwrap();
    assert_eq!(ack.result, "deleted");
}
