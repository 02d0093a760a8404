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

/// Assert response is a complete report page
pub fn assert_report_page(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_html(),
        "Expected text/html, got {:?}",
        response.content_type()
    );

    let html = response.text();
    for heading in [
        "<h1>Original Image</h1>",
        "<h1>Grayscale Image</h1>",
        "<h1>Equalized Image</h1>",
        "<h2>Histograms</h2>",
        "<h2>Combined Histograms</h2>",
    ] {
        assert!(html.contains(heading), "Missing heading {heading}");
    }
}

/// Assert response is the plain-text load failure
pub fn assert_load_error(response: &TestResponse) {
    assert_status(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        response.content_type().starts_with("text/plain"),
        "Expected text/plain, got {:?}",
        response.content_type()
    );
    assert_eq!(response.text(), "Error loading image");
}
