//! Pexels adapter tests against a mocked HTTP server.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use stockreel::adapters::PexelsAdapter;
use stockreel::domain::model::{Orientation, PhotoQuery, SearchRequest, VideoQuery};
use stockreel::{DomainError, MediaProviderPort, SearchInteractor};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn adapter(server: &MockServer) -> PexelsAdapter {
    PexelsAdapter::new(Some("test-key".to_string()))
        .unwrap()
        .with_base_url(server.uri())
}

fn video_query(term: &str, orientation: Option<Orientation>) -> VideoQuery {
    VideoQuery {
        term: term.to_string(),
        orientation,
        per_page: 80,
        timeout: Duration::from_secs(5),
    }
}

fn video_fixture() -> serde_json::Value {
    json!({
        "page": 1,
        "per_page": 80,
        "videos": [
            {
                "id": 1001,
                "duration": 12,
                "image": "https://images.example/1001.jpg",
                "video_files": [
                    { "quality": "hd", "width": 1920, "height": 1080, "fps": 25.0, "link": "https://videos.example/1001-hd.mp4" },
                    { "quality": "sd", "width": 640, "height": 360, "fps": 25.0, "link": "https://videos.example/1001-sd.mp4" }
                ]
            },
            {
                "id": 1002,
                "duration": 7,
                "video_files": [
                    { "quality": null, "width": null, "height": null, "fps": null, "link": "https://videos.example/1002.mp4" }
                ]
            }
        ]
    })
}

#[tokio::test]
async fn test_video_search_maps_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos/search"))
        .and(header("Authorization", "test-key"))
        .and(query_param("query", "forest"))
        .and(query_param("orientation", "landscape"))
        .and(query_param("size", "medium"))
        .and(query_param("per_page", "80"))
        .respond_with(ResponseTemplate::new(200).set_body_json(video_fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let videos = adapter(&server)
        .search_videos(&video_query("forest", Some(Orientation::Landscape)))
        .await
        .unwrap();

    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].id, "1001");
    assert_eq!(videos[0].duration, 12.0);
    assert_eq!(videos[0].image.as_deref(), Some("https://images.example/1001.jpg"));
    assert_eq!(videos[0].files.len(), 2);
    assert_eq!(videos[0].files[0].quality.as_deref(), Some("hd"));
    assert_eq!(videos[0].files[0].width, Some(1920));
    assert_eq!(videos[0].files[0].fps, Some(25.0));

    assert_eq!(videos[1].id, "1002");
    assert!(videos[1].image.is_none());
    assert!(videos[1].files[0].quality.is_none());
}

#[tokio::test]
async fn test_preview_query_omits_orientation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos/search"))
        .and(query_param("query", "ocean"))
        .and(query_param("per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "videos": [] })))
        .mount(&server)
        .await;

    let mut query = video_query("ocean", None);
    query.per_page = 10;
    let videos = adapter(&server).search_videos(&query).await.unwrap();
    assert!(videos.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let url = requests[0].url.as_str();
    assert!(!url.contains("orientation="), "unexpected orientation in {}", url);
    assert!(!url.contains("size="), "unexpected size in {}", url);
}

#[tokio::test]
async fn test_missing_collection_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "page": 1 })))
        .mount(&server)
        .await;

    let videos = adapter(&server)
        .search_videos(&video_query("desert", Some(Orientation::Portrait)))
        .await
        .unwrap();
    assert!(videos.is_empty());
}

#[tokio::test]
async fn test_photo_search_maps_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(header("Authorization", "test-key"))
        .and(query_param("query", "mountains"))
        .and(query_param("orientation", "portrait"))
        .and(query_param("per_page", "80"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "photos": [
                { "id": 2001, "width": 1080, "height": 1920, "src": { "original": "https://images.example/2001.jpg" } },
                { "id": "2002", "width": 4000, "height": 6000, "src": { "original": "https://images.example/2002.jpg" } }
            ]
        })))
        .mount(&server)
        .await;

    let photos = adapter(&server)
        .search_photos(&PhotoQuery {
            term: "mountains".to_string(),
            orientation: Orientation::Portrait,
            per_page: 80,
            timeout: Duration::from_secs(5),
        })
        .await
        .unwrap();

    assert_eq!(photos.len(), 2);
    assert_eq!(photos[0].id, "2001");
    assert_eq!(photos[0].url, "https://images.example/2001.jpg");
    assert_eq!(photos[1].id, "2002");
    assert_eq!((photos[1].width, photos[1].height), (4000, 6000));
}

#[tokio::test]
async fn test_unauthorized_is_configuration_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos/search"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = adapter(&server)
        .search_videos(&video_query("forest", Some(Orientation::Portrait)))
        .await
        .unwrap_err();

    match &err {
        DomainError::Configuration(message) => assert!(message.contains("PEXELS_API_KEY")),
        other => panic!("expected configuration error, got {:?}", other),
    }
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_server_error_keeps_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = adapter(&server)
        .search_videos(&video_query("forest", Some(Orientation::Portrait)))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Provider { status: Some(500), .. }));
    assert!(!err.is_fatal());
}

#[tokio::test]
async fn test_malformed_json_is_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
        .mount(&server)
        .await;

    let err = adapter(&server)
        .search_videos(&video_query("forest", Some(Orientation::Portrait)))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Provider { status: None, .. }));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(video_fixture())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let mut query = video_query("forest", Some(Orientation::Landscape));
    query.timeout = Duration::from_millis(50);

    let err = adapter(&server).search_videos(&query).await.unwrap_err();
    match err {
        DomainError::Timeout { term, orientation, .. } => {
            assert_eq!(term, "forest");
            assert_eq!(orientation, Orientation::Landscape);
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_key_sends_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(video_fixture()))
        .expect(0)
        .mount(&server)
        .await;

    let adapter = PexelsAdapter::new(None).unwrap().with_base_url(server.uri());
    assert!(!adapter.has_api_key());

    let err = adapter
        .search_videos(&video_query("forest", Some(Orientation::Portrait)))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Configuration(_)));
    assert!(err.to_string().contains("PEXELS_API_KEY"));
}

#[test]
fn test_blank_key_counts_as_missing() {
    let adapter = PexelsAdapter::new(Some("   ".to_string())).unwrap();
    assert!(!adapter.has_api_key());
}

#[tokio::test]
async fn test_unsendable_key_aborts_search_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(video_fixture()))
        .expect(0)
        .mount(&server)
        .await;

    let provider = PexelsAdapter::new(Some("abc\ndef".to_string()))
        .unwrap()
        .with_base_url(server.uri());
    let interactor = SearchInteractor::with_seed(Arc::new(provider), 3);

    let request = SearchRequest::new(["forest"], 0.0).unwrap();
    let err = interactor.find_video(&request).await.unwrap_err();

    match &err {
        DomainError::Configuration(message) => assert!(message.contains("PEXELS_API_KEY")),
        other => panic!("expected configuration error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_incomplete_item_does_not_hide_its_siblings() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos/search"))
        .and(query_param("query", "forest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "videos": [
                { "id": 3001, "duration": null, "video_files": [] },
                {
                    "id": 3002,
                    "duration": 30,
                    "video_files": [
                        { "quality": "hd", "width": 1080, "height": 1920, "fps": 25.0, "link": "https://videos.example/3002-hd.mp4" }
                    ]
                }
            ]
        })))
        .mount(&server)
        .await;

    let interactor = SearchInteractor::with_seed(Arc::new(adapter(&server)), 3);
    let request = SearchRequest::new(["forest"], 1.0).unwrap();

    let video = interactor.find_video(&request).await.unwrap();
    assert_eq!(video.id, "3002");
    assert_eq!(video.url, "https://videos.example/3002-hd.mp4");
}
