use birdfeed_http::{Auth, HttpClient, HttpError, RequestOpts};
use serde::Deserialize;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize)]
struct Item {
    id: String,
}

#[tokio::test]
async fn sends_bearer_and_query_then_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/1.1/items.json"))
        .and(header("authorization", "Bearer sekrit"))
        .and(query_param("count", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "42"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let item: Item = client
        .get_json(
            "1.1/items.json",
            RequestOpts {
                auth: Some(Auth::Bearer(" sekrit ")),
                query: Some(vec![("count", "3".into())]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(item.id, "42");
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(serde_json::json!({"message": "over capacity"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let err = client
        .get_json::<Item>("flaky", RequestOpts::default())
        .await
        .unwrap_err();

    match err {
        HttpError::Api {
            status, message, ..
        } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(message, "over capacity");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn base_url_path_prefix_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/twitter/1.1/items.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "7"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&format!("{}/twitter", server.uri())).unwrap();
    let item: Item = client
        .get_json("1.1/items.json", RequestOpts::default())
        .await
        .unwrap();

    assert_eq!(item.id, "7");
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let err = client
        .get_json::<Item>("broken", RequestOpts::default())
        .await
        .unwrap_err();

    assert!(matches!(err, HttpError::Decode(_, ref snippet) if snippet == "not json"));
}
