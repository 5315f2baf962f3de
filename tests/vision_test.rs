use std::path::Path;

use serde_json::json;
use spotgrab::types::Song;
use spotgrab::utils::{parse_queries, strip_ordinal_prefix};
use spotgrab::vision::extract::{
    VisionError, extract_songs, image_data_url, load_image, parse_songs, render_song_list,
};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn song(title: &str, artist: Option<&str>) -> Song {
    Song {
        title: title.to_string(),
        artist: artist.map(String::from),
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content }
        }]
    })
}

#[test]
fn test_parse_songs_plain_array() {
    let songs =
        parse_songs(r#"[{"title": "Imagine", "artist": "John Lennon"}, {"title": "Intro"}]"#)
            .unwrap();

    assert_eq!(
        songs,
        vec![song("Imagine", Some("John Lennon")), song("Intro", None)]
    );
}

#[test]
fn test_parse_songs_strips_code_fences() {
    let content = "```json\n[{\"title\": \"Imagine\", \"artist\": \"John Lennon\"}]\n```";
    let songs = parse_songs(content).unwrap();

    assert_eq!(songs, vec![song("Imagine", Some("John Lennon"))]);
}

#[test]
fn test_parse_songs_rejects_prose_and_empty_lists() {
    assert!(matches!(
        parse_songs("I could not read the image."),
        Err(VisionError::Parse(_))
    ));
    assert!(matches!(parse_songs("[]"), Err(VisionError::NoSongs)));
}

#[test]
fn test_render_song_list() {
    let songs = vec![
        song("Imagine", Some("John Lennon")),
        song("Untitled", Some("  ")),
        song("Intro", None),
    ];

    let content = render_song_list(&songs);

    assert_eq!(
        content,
        format!(
            "Playlist Songs\n{}\n\n1. Imagine - John Lennon\n2. Untitled\n3. Intro\n",
            "=".repeat(50)
        )
    );
}

#[test]
fn test_rendered_list_feeds_the_converter() {
    let songs = vec![
        song("Imagine", Some("John Lennon")),
        song("Bohemian Rhapsody", Some("Queen")),
    ];

    let queries: Vec<String> = parse_queries(&render_song_list(&songs))
        .iter()
        .map(|line| strip_ordinal_prefix(line))
        .collect();

    assert_eq!(
        queries,
        vec!["Imagine - John Lennon", "Bohemian Rhapsody - Queen"]
    );
}

#[test]
fn test_image_data_url() {
    assert_eq!(
        image_data_url(Path::new("shot.PNG"), b"abc"),
        "data:image/png;base64,YWJj"
    );
    assert_eq!(
        image_data_url(Path::new("shot.jpg"), b"abc"),
        "data:image/jpeg;base64,YWJj"
    );
}

#[tokio::test]
async fn test_load_image() {
    let temp_dir = tempfile::tempdir().unwrap();
    let image = temp_dir.path().join("playlist.webp");
    std::fs::write(&image, b"abc").unwrap();

    assert_eq!(
        load_image(&image).await.unwrap(),
        "data:image/webp;base64,YWJj"
    );
    assert!(matches!(
        load_image(&temp_dir.path().join("missing.png")).await,
        Err(VisionError::IoError(_))
    ));
}

#[tokio::test]
async fn test_extract_songs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_string_contains("\"model\":\"gpt-4o-mini\""))
        .and(body_string_contains("data:image/png;base64,YWJj"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "```json\n[{\"title\": \"Imagine\", \"artist\": \"John Lennon\"}]\n```",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let songs = extract_songs(
        &mock_server.uri(),
        "sk-test",
        "gpt-4o-mini",
        "data:image/png;base64,YWJj",
    )
    .await
    .unwrap();

    assert_eq!(songs, vec![song("Imagine", Some("John Lennon"))]);
}

#[tokio::test]
async fn test_extract_songs_reports_api_error_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&mock_server)
        .await;

    let err = extract_songs(&mock_server.uri(), "bad", "gpt-4o-mini", "data:image/png;base64,")
        .await
        .unwrap_err();

    match err {
        VisionError::Status { status, message } => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_extract_songs_without_songs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("[]")))
        .mount(&mock_server)
        .await;

    let err = extract_songs(&mock_server.uri(), "sk-test", "gpt-4o-mini", "data:image/png;base64,")
        .await
        .unwrap_err();

    assert!(matches!(err, VisionError::NoSongs));
}
