//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );

    assert_eq!(
        response.header("content-type"),
        Some("image/png"),
        "Expected Content-Type: image/png"
    );
}

/// Assert an error response carries the expected HTTP and JSON status
pub fn assert_json_status(response: &TestResponse, expected_status: u16) {
    assert_eq!(response.status.as_u16(), expected_status);

    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected_status as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected_status,
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(
        json["error"].is_string(),
        "Error responses should carry a message"
    );
}

/// Assert the session JSON reports the given slider values
pub fn assert_adjustments(response: &TestResponse, expected: [(&str, u64); 5]) {
    assert_ok(response);
    let json: serde_json::Value = response.json();
    for (id, value) in expected {
        assert_eq!(
            json["adjustments"][id].as_u64(),
            Some(value),
            "Unexpected value for {id}: {}",
            json["adjustments"]
        );
    }
}
