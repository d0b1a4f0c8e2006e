//! End-to-end tests against a running mock server.

use reqwest::StatusCode;

mod common;

const SCENARIO: &str = r#"{
    "/": {
        "handlers": [{
            "method": "GET",
            "status": 200,
            "response": {"message":"Hello, world!"},
            "headers": {"Content-Type": "application/json"}
        }],
        "children": {
            "/newpath": {
                "handlers": [{
                    "method": "GET",
                    "status": 200,
                    "headers": {"Content-Type": "application/json"}
                }],
                "children": {
                    "/newpath2": {
                        "handlers": [{
                            "method": "POST",
                            "status": 204,
                            "headers": {"Content-Type": "application/json"}
                        }]
                    }
                }
            }
        }
    }
}"#;

#[tokio::test]
async fn test_repeated_post_to_nested_path() {
    let server = common::start_server(SCENARIO).await;
    let client = common::client();

    for _ in 0..4 {
        let res = client
            .post(server.url("/newpath/newpath2"))
            .header("Content-Type", "text/plain")
            .send()
            .await
            .expect("server unreachable");

        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        assert_eq!(res.headers()["content-type"], "application/json");
        assert!(res.bytes().await.unwrap().is_empty());
    }

    server.stop().await;
}

#[tokio::test]
async fn test_root_get_returns_body() {
    let server = common::start_server(SCENARIO).await;
    let client = common::client();

    let res = client.get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.text().await.unwrap(), r#"{"message":"Hello, world!"}"#);

    server.stop().await;
}

#[tokio::test]
async fn test_unsupported_method_and_unknown_path() {
    let server = common::start_server(SCENARIO).await;
    let client = common::client();

    let res = client.get(server.url("/newpath/newpath2")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(res.bytes().await.unwrap().is_empty());

    let res = client.get(server.url("/nonexistent")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.stop().await;
}

#[tokio::test]
async fn test_strict_matching_of_sub_paths() {
    let server = common::start_server(SCENARIO).await;
    let client = common::client();

    for path in ["/newpath/", "/newpath/other", "/newpath/newpath2/deeper", "/newpat"] {
        let res = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "path {path}");
    }

    let res = client.get(server.url("/newpath")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    server.stop().await;
}

#[tokio::test]
async fn test_responses_are_identical_across_requests() {
    let server = common::start_server(
        r#"{"/items": {"handlers": [{
            "method": "GET",
            "status": 203,
            "headers": {"X-Fixture": "items", "Cache-Control": "no-store"},
            "response": [ {"id": 1}, {"id": 2} ]
        }]}}"#,
    )
    .await;
    let client = common::client();

    let mut seen = Vec::new();
    for _ in 0..3 {
        let res = client.get(server.url("/items")).send().await.unwrap();
        let status = res.status();
        let fixture = res.headers()["x-fixture"].to_str().unwrap().to_string();
        let cache = res.headers()["cache-control"].to_str().unwrap().to_string();
        let body = res.text().await.unwrap();
        seen.push((status, fixture, cache, body));
    }

    assert!(seen.windows(2).all(|pair| pair[0] == pair[1]));
    let (status, fixture, cache, body) = &seen[0];
    assert_eq!(*status, StatusCode::NON_AUTHORITATIVE_INFORMATION);
    assert_eq!(fixture, "items");
    assert_eq!(cache, "no-store");
    assert_eq!(body, r#"[ {"id": 1}, {"id": 2} ]"#);

    server.stop().await;
}

#[tokio::test]
async fn test_every_response_carries_request_id() {
    let server = common::start_server(SCENARIO).await;
    let client = common::client();

    let res = client.get(server.url("/")).send().await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));

    let res = client
        .get(server.url("/nonexistent"))
        .header("x-request-id", "fixed-id")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "fixed-id");

    server.stop().await;
}
