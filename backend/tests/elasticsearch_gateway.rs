//! Exercises the reqwest gateway against an in-process stub of the search
//! store.
//!
//! The stub binds an ephemeral port on loopback and answers the handful of
//! Elasticsearch endpoints the service uses. Each test owns its server and
//! stops it before returning.

use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};
use student_search::domain::StudentService;
use student_search::domain::document_mapper::{extract_created_id, extract_records};
use student_search::domain::ports::{SearchGateway, SearchGatewayError};
use student_search::inbound::http::state::HttpState;
use student_search::inbound::http::students;
use student_search::outbound::elasticsearch::{ElasticsearchCredentials, ElasticsearchGateway};

const INDEX: &str = "students";

/// Requests observed by the stub, newest last.
#[derive(Default)]
struct Recorded {
    requests: Mutex<Vec<RecordedRequest>>,
}

#[derive(Clone, Debug)]
struct RecordedRequest {
    method: String,
    path: String,
    query: String,
    authorization: Option<String>,
    body: Vec<u8>,
}

impl Recorded {
    fn last(&self) -> RecordedRequest {
        self.requests
            .lock()
            .expect("recording lock")
            .last()
            .cloned()
            .expect("at least one request recorded")
    }
}

async fn stub_store(
    req: HttpRequest,
    body: web::Bytes,
    recorded: web::Data<Recorded>,
) -> HttpResponse {
    recorded
        .requests
        .lock()
        .expect("recording lock")
        .push(RecordedRequest {
            method: req.method().to_string(),
            path: req.path().to_owned(),
            query: req.query_string().to_owned(),
            authorization: req
                .headers()
                .get("authorization")
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned),
            body: body.to_vec(),
        });

    match (req.method().as_str(), req.path()) {
        ("GET", "/") => HttpResponse::Ok().json(json!({
            "name": "node-1",
            "cluster_name": "stub-cluster",
            "version": { "number": "8.13.0" }
        })),
        ("POST", "/students/_doc") => HttpResponse::Created().json(json!({
            "_index": INDEX,
            "_id": "stub-1",
            "_version": 1,
            "result": "created"
        })),
        ("POST", "/students/_search") => search_response(&body),
        ("DELETE", "/students/_doc/missing") => HttpResponse::NotFound().json(json!({
            "_index": INDEX,
            "_id": "missing",
            "result": "not_found"
        })),
        ("DELETE", _) => HttpResponse::Ok().json(json!({ "result": "deleted" })),
        _ => HttpResponse::NotFound().json(json!({
            "error": { "type": "index_not_found_exception", "reason": "no such index [other]" },
            "status": 404
        })),
    }
}

fn search_response(body: &[u8]) -> HttpResponse {
    let query: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
    let name = query
        .pointer("/query/match/name")
        .and_then(Value::as_str)
        .unwrap_or_default();
    match name {
        "boom" => HttpResponse::BadRequest().json(json!({
            "error": { "type": "parsing_exception", "reason": "unknown query [boom]" },
            "status": 400
        })),
        "garbled" => HttpResponse::Ok().json(json!({ "hits": { "hits": [ { "_id": "g1" } ] } })),
        _ => HttpResponse::Ok().json(json!({
            "took": 1,
            "hits": {
                "total": { "value": 2, "relation": "eq" },
                "hits": [
                    { "_id": "a1", "_source": { "name": "Ann", "age": 21, "average_score": 3.5 } },
                    { "_id": "a2", "_source": { "name": "Anna", "age": 22.9, "average_score": 3.25 } }
                ]
            }
        })),
    }
}

struct StubStore {
    base_url: url::Url,
    recorded: web::Data<Recorded>,
    handle: ServerHandle,
}

impl StubStore {
    async fn stop(self) {
        self.handle.stop(true).await;
    }
}

fn spawn_stub_store() -> StubStore {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    let recorded = web::Data::new(Recorded::default());
    let app_recorded = recorded.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_recorded.clone())
            .default_service(web::to(stub_store))
    })
    .workers(1)
    .listen(listener)
    .expect("listen on stub socket")
    .run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    StubStore {
        base_url: format!("http://{addr}").parse().expect("stub URL"),
        recorded,
        handle,
    }
}

fn gateway(store: &StubStore) -> ElasticsearchGateway {
    ElasticsearchGateway::new(store.base_url.clone(), Duration::from_secs(5))
        .expect("client builds")
}

#[actix_rt::test]
async fn create_document_requests_refresh_and_returns_ack() {
    let store = spawn_stub_store();
    let document = br#"{"name":"Ann","age":21,"average_score":3.5}"#;

    let ack = gateway(&store)
        .create_document(INDEX, document)
        .await
        .expect("create succeeds");

    assert_eq!(extract_created_id(&ack).expect("ack decodes"), "stub-1");
    let seen = store.recorded.last();
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.path, "/students/_doc");
    assert_eq!(seen.query, "refresh=true");
    assert_eq!(seen.body, document.to_vec());
    store.stop().await;
}

#[actix_rt::test]
async fn search_sends_match_query_and_maps_hits() {
    let store = spawn_stub_store();

    let body = gateway(&store)
        .search_by_name(INDEX, "Ann")
        .await
        .expect("search succeeds");

    let students = extract_records(&body).expect("hits decode");
    let names: Vec<_> = students.iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Ann", "Anna"]);
    assert_eq!(students[1].age(), 22);
    assert_eq!(students[1].average_score(), 3.25);

    let seen = store.recorded.last();
    assert_eq!(seen.path, "/students/_search");
    assert!(seen.query.contains("track_total_hits=true"));
    let sent: Value = serde_json::from_slice(&seen.body).expect("query is JSON");
    assert_eq!(sent, json!({ "query": { "match": { "name": "Ann" } } }));
    store.stop().await;
}

#[actix_rt::test]
async fn store_error_envelope_becomes_store_error() {
    let store = spawn_stub_store();

    let err = gateway(&store)
        .search_by_name(INDEX, "boom")
        .await
        .expect_err("store rejects query");

    assert_eq!(
        err,
        SearchGatewayError::store(400_u16, "parsing_exception", "unknown query [boom]")
    );
    store.stop().await;
}

#[rstest]
#[case::missing("missing", true)]
#[case::present("a1", false)]
#[actix_rt::test]
async fn delete_document_distinguishes_missing_documents(
    #[case] id: &str,
    #[case] expect_missing: bool,
) {
    let store = spawn_stub_store();

    let outcome = gateway(&store).delete_document(INDEX, id).await;

    if expect_missing {
        assert_eq!(outcome, Err(SearchGatewayError::document_not_found(id)));
    } else {
        assert_eq!(outcome, Ok(()));
    }
    assert_eq!(store.recorded.last().path, format!("/students/_doc/{id}"));
    store.stop().await;
}

#[actix_rt::test]
async fn cluster_info_sends_credentials_when_configured() {
    let store = spawn_stub_store();
    let gateway = ElasticsearchGateway::with_credentials(
        store.base_url.clone(),
        Duration::from_secs(5),
        Some(ElasticsearchCredentials {
            username: "elastic".to_owned(),
            password: "changeme".to_owned(),
        }),
    )
    .expect("client builds");

    let info = gateway.cluster_info().await.expect("probe succeeds");

    assert_eq!(info.cluster_name, "stub-cluster");
    assert_eq!(info.version, "8.13.0");
    assert_eq!(
        store.recorded.last().authorization.as_deref(),
        Some("Basic ZWxhc3RpYzpjaGFuZ2VtZQ==")
    );
    store.stop().await;
}

#[actix_rt::test]
async fn unreachable_store_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("reserve port");
    let addr = listener.local_addr().expect("address");
    drop(listener);
    let gateway = ElasticsearchGateway::new(
        format!("http://{addr}").parse().expect("URL"),
        Duration::from_secs(5),
    )
    .expect("client builds");

    let err = gateway.cluster_info().await.expect_err("nothing listening");

    assert!(matches!(err, SearchGatewayError::Transport { .. }), "{err:?}");
}

#[actix_rt::test]
async fn endpoints_serve_through_the_real_adapter() {
    let store = spawn_stub_store();
    let service = StudentService::new(Arc::new(gateway(&store)), INDEX);
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::from_service(Arc::new(service))))
            .configure(students::configure),
    )
    .await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/student")
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"name":"Ann","age":21,"average_score":3.5}"#)
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let record: Value = actix_test::read_body_json(created).await;
    assert_eq!(record.get("id").and_then(Value::as_str), Some("stub-1"));

    let listed = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/students?name=Ann")
            .to_request(),
    )
    .await;
    assert_eq!(listed.status(), StatusCode::OK);
    let records: Vec<Value> = actix_test::read_body_json(listed).await;
    assert_eq!(records.len(), 2);

    let garbled = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/students?name=garbled")
            .to_request(),
    )
    .await;
    assert_eq!(garbled.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let envelope: Value = actix_test::read_body_json(garbled).await;
    assert!(
        envelope
            .get("error")
            .and_then(Value::as_str)
            .is_some_and(|message| message.contains("_source"))
    );
    store.stop().await;
}
