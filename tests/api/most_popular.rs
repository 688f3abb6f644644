use crate::helpers::{API_KEY, TestApp, region, video_item, video_list};
use claims::assert_err;
use popular_videos::youtube_api::ApiError;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn most_popular_sends_the_chart_query() {
    // Arrange
    let app = TestApp::spawn(&["KR"]).await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("part", "snippet,statistics"))
        .and(query_param("chart", "mostPopular"))
        .and(query_param("regionCode", "KR"))
        .and(query_param("maxResults", "50"))
        .and(query_param("key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(video_list(vec![])))
        .expect(1)
        .mount(&app.youtube_server)
        .await;

    // Act
    let items = app.client().most_popular(&region("kr"), 50).await;

    // Assert
    assert_eq!(items.expect("Request failed").len(), 0);
}

#[tokio::test]
async fn most_popular_returns_the_items_in_order() {
    // Arrange
    let app = TestApp::spawn(&["US"]).await;
    let response = video_list(vec![video_item("a"), video_item("b"), video_item("c")]);
    Mock::given(path("/videos"))
        .and(query_param("maxResults", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&app.youtube_server)
        .await;

    // Act
    let items = app
        .client()
        .most_popular(&region("US"), 3)
        .await
        .expect("Request failed");

    // Assert
    let ids: Vec<_> = items.iter().map(|item| item["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
}

#[tokio::test]
async fn a_response_without_items_is_an_empty_chart() {
    // Arrange
    let app = TestApp::spawn(&["KR"]).await;
    Mock::given(path("/videos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "kind": "youtube#videoListResponse" })),
        )
        .mount(&app.youtube_server)
        .await;

    // Act
    let items = app.client().most_popular(&region("KR"), 50).await;

    // Assert
    assert!(items.expect("Request failed").is_empty());
}

#[tokio::test]
async fn an_error_status_carries_googles_message() {
    // Arrange
    let app = TestApp::spawn(&["KR"]).await;
    let body = serde_json::json!({
        "error": {
            "code": 403,
            "message": "The request cannot be completed because you have exceeded your quota.",
            "errors": [{ "reason": "quotaExceeded", "domain": "youtube.quota" }]
        }
    });
    Mock::given(path("/videos"))
        .respond_with(ResponseTemplate::new(403).set_body_json(body))
        .expect(1)
        .mount(&app.youtube_server)
        .await;

    // Act
    let outcome = app.client().most_popular(&region("KR"), 50).await;

    // Assert
    match outcome {
        Err(ApiError::Status { status, message }) => {
            assert_eq!(status.as_u16(), 403);
            assert!(message.contains("exceeded your quota"));
        }
        other => panic!("Expected a status error, got {:?}", other),
    }
}

#[tokio::test]
async fn an_unexpected_body_is_a_decode_error() {
    // Arrange
    let app = TestApp::spawn(&["KR"]).await;
    Mock::given(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&app.youtube_server)
        .await;

    // Act
    let outcome = app.client().most_popular(&region("KR"), 50).await;

    // Assert
    assert!(matches!(outcome, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn a_slow_api_times_out_without_leaking_the_key() {
    // Arrange
    let mut app = TestApp::spawn(&["KR"]).await;
    app.settings.youtube.timeout_milliseconds = 200;
    Mock::given(path("/videos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(video_list(vec![]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&app.youtube_server)
        .await;

    // Act
    let outcome = app.client().most_popular(&region("KR"), 50).await;

    // Assert
    let error = assert_err!(outcome);
    assert!(matches!(error, ApiError::Request(_)));
    assert!(!format!("{:?}", error).contains(API_KEY));
}
