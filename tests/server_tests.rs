//! End-to-end tests over a real socket.
//!
//! Each test starts its own seeded server on a random port; the fixture
//! stops it on drop, even when an assertion fails.

use serde_json::json;

mod common;
use common::http::{get, parse_response, parse_response_parts, post, send_request};
use common::test_server::RosterTestServer;

#[test]
fn test_list_over_http() {
    let server = RosterTestServer::start();
    let (status, content_type, body) = parse_response_parts(&get(&server.addr(), "/devops"));
    assert_eq!(status, 200);
    assert_eq!(content_type, "application/json");
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body.as_array().unwrap().len(), 4);
    assert_eq!(body[0]["name"], "Celestine Ugwu");
}

#[test]
fn test_count_is_bare_integer() {
    let server = RosterTestServer::start();
    let (status, _, body) = parse_response_parts(&get(&server.addr(), "/devops-count"));
    assert_eq!(status, 200);
    assert_eq!(body.trim(), "4");
}

#[test]
fn test_post_then_get() {
    let server = RosterTestServer::start();
    let resp = post(
        &server.addr(),
        "/students",
        r#"{"classId": 5, "name": "Ada Obi", "gender": "female"}"#,
    );
    assert!(resp.starts_with("HTTP/1.1 201"), "unexpected response: {resp}");
    let (_, body) = parse_response(&resp);
    assert_eq!(body, json!({"classId": 5, "name": "Ada Obi", "gender": "female"}));

    let (status, body) = parse_response(&get(&server.addr(), "/students/5"));
    assert_eq!(status, 200);
    assert_eq!(body["name"], "Ada Obi");
}

#[test]
fn test_malformed_json_is_400() {
    let server = RosterTestServer::start();
    let (status, body) = parse_response(&post(&server.addr(), "/students", "{classId: 5"));
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid input");

    let (_, count) = parse_response(&get(&server.addr(), "/devops-count"));
    assert_eq!(count, json!(4));
}

#[test]
fn test_duplicate_is_409() {
    let server = RosterTestServer::start();
    let (status, body) = parse_response(&post(
        &server.addr(),
        "/students",
        r#"{"classId": 1, "name": "Again", "gender": "male"}"#,
    ));
    assert_eq!(status, 409);
    assert_eq!(body["classId"], 1);
}

#[test]
fn test_missing_student_is_404() {
    let server = RosterTestServer::start();
    let (status, body) = parse_response(&get(&server.addr(), "/students/999"));
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Student not found");
}

#[test]
fn test_unknown_route_is_404() {
    let server = RosterTestServer::start();
    let (status, body) = parse_response(&get(&server.addr(), "/students"));
    assert_eq!(status, 404);
    assert_eq!(body["path"], "/students");
}

#[test]
fn test_health_over_http() {
    let server = RosterTestServer::start();
    let (status, body) = parse_response(&get(&server.addr(), "/health"));
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}

#[test]
fn test_metrics_is_plain_text() {
    let server = RosterTestServer::start();
    let _ = get(&server.addr(), "/devops");
    let (status, content_type, body) = parse_response_parts(&get(&server.addr(), "/metrics"));
    assert_eq!(status, 200);
    assert!(content_type.starts_with("text/plain"));
    assert!(body.contains("roster_requests_total 1"));
}

#[test]
fn test_request_id_header_is_accepted() {
    let server = RosterTestServer::start();
    let resp = send_request(
        &server.addr(),
        "GET /students/2 HTTP/1.1\r\nHost: localhost\r\nX-Request-Id: 01ARZ3NDEKTSV4RRFFQ69G5FAV\r\n\r\n",
    );
    let (status, body) = parse_response(&resp);
    assert_eq!(status, 200);
    assert_eq!(body["name"], "Abel");
}

#[test]
fn test_stray_body_on_list_still_returns_roster() {
    let server = RosterTestServer::start();
    let resp = send_request(
        &server.addr(),
        "GET /devops HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello",
    );
    let (status, body) = parse_response(&resp);
    assert_eq!(status, 200);
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[test]
fn test_trailing_slash_over_http() {
    let server = RosterTestServer::start();
    let (status, body) = parse_response(&get(&server.addr(), "/students/3/"));
    assert_eq!(status, 200);
    assert_eq!(body["name"], "Fred Kanwai");
}
