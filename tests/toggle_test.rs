use reqwest::StatusCode;
use serde_json::json;
use spotswap::{error::AppError, management::ToggleOutcome, types::PlaybackState};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

const STATUS_PATH: &str = "/v1/me/player/currently-playing";
const PLAY_PATH: &str = "/v1/me/player/play";
const PAUSE_PATH: &str = "/v1/me/player/pause";

async fn mount_status(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(STATUS_PATH))
        .and(header("authorization", common::BEARER))
        .respond_with(template)
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_command(
    server: &MockServer,
    command_path: &str,
    template: ResponseTemplate,
    calls: u64,
) {
    Mock::given(method("PUT"))
        .and(path(command_path))
        .and(header("authorization", common::BEARER))
        .respond_with(template)
        .expect(calls)
        .mount(server)
        .await;
}

fn playing(is_playing: bool) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "is_playing": is_playing,
        "progress_ms": 42000,
        "currently_playing_type": "track",
        "item": { "name": "So What", "uri": "spotify:track:123" },
    }))
}

#[tokio::test]
async fn test_playing_track_is_paused() {
    let server = MockServer::start().await;
    mount_status(&server, playing(true)).await;
    mount_command(&server, PAUSE_PATH, ResponseTemplate::new(204), 1).await;
    mount_command(&server, PLAY_PATH, ResponseTemplate::new(204), 0).await;

    let toggler = common::toggler(&common::config(&server, &[]));
    let outcome = toggler.toggle(common::BEARER).await.unwrap();

    assert_eq!(outcome, ToggleOutcome::Toggled(PlaybackState { is_playing: false }));
}

#[tokio::test]
async fn test_paused_track_is_played() {
    let server = MockServer::start().await;
    mount_status(&server, playing(false)).await;
    mount_command(&server, PLAY_PATH, ResponseTemplate::new(204), 1).await;
    mount_command(&server, PAUSE_PATH, ResponseTemplate::new(204), 0).await;

    let toggler = common::toggler(&common::config(&server, &[]));
    let outcome = toggler.toggle(common::BEARER).await.unwrap();

    assert_eq!(outcome, ToggleOutcome::Toggled(PlaybackState { is_playing: true }));
}

#[tokio::test]
async fn test_nothing_playing_sends_no_command() {
    let server = MockServer::start().await;
    mount_status(&server, ResponseTemplate::new(204)).await;
    mount_command(&server, PLAY_PATH, ResponseTemplate::new(204), 0).await;
    mount_command(&server, PAUSE_PATH, ResponseTemplate::new(204), 0).await;

    let toggler = common::toggler(&common::config(&server, &[]));
    let outcome = toggler.toggle(common::BEARER).await.unwrap();

    assert_eq!(outcome, ToggleOutcome::NothingPlaying);
}

#[tokio::test]
async fn test_status_error_is_forwarded_without_command() {
    let server = MockServer::start().await;
    let error = json!({ "error": { "status": 401, "message": "The access token expired" } });
    mount_status(&server, ResponseTemplate::new(401).set_body_json(error.clone())).await;
    mount_command(&server, PLAY_PATH, ResponseTemplate::new(204), 0).await;
    mount_command(&server, PAUSE_PATH, ResponseTemplate::new(204), 0).await;

    let toggler = common::toggler(&common::config(&server, &[]));
    let outcome = toggler.toggle(common::BEARER).await.unwrap();

    match outcome {
        ToggleOutcome::Provider(response) => {
            assert_eq!(response.status, StatusCode::UNAUTHORIZED);
            assert_eq!(response.body, error);
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_command_error_is_forwarded() {
    let server = MockServer::start().await;
    let error = json!({
        "error": {
            "status": 403,
            "message": "Player command failed: Premium required",
            "reason": "PREMIUM_REQUIRED",
        }
    });
    mount_status(&server, playing(false)).await;
    mount_command(
        &server,
        PLAY_PATH,
        ResponseTemplate::new(403).set_body_json(error.clone()),
        1,
    )
    .await;

    let toggler = common::toggler(&common::config(&server, &[]));
    let outcome = toggler.toggle(common::BEARER).await.unwrap();

    match outcome {
        ToggleOutcome::Provider(response) => {
            assert_eq!(response.status, StatusCode::FORBIDDEN);
            assert_eq!(response.body, error);
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_command_ok_with_body_is_forwarded_not_synthesized() {
    let server = MockServer::start().await;
    mount_status(&server, playing(true)).await;
    mount_command(
        &server,
        PAUSE_PATH,
        ResponseTemplate::new(200).set_body_json(json!({ "note": "queued" })),
        1,
    )
    .await;

    let toggler = common::toggler(&common::config(&server, &[]));
    let outcome = toggler.toggle(common::BEARER).await.unwrap();

    match outcome {
        ToggleOutcome::Provider(response) => {
            assert_eq!(response.status, StatusCode::OK);
            assert_eq!(response.body, json!({ "note": "queued" }));
        }
        other => panic!("expected forwarded response, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_is_playing_counts_as_paused() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "progress_ms": 0 })),
    )
    .await;
    mount_command(&server, PLAY_PATH, ResponseTemplate::new(204), 1).await;

    let toggler = common::toggler(&common::config(&server, &[]));
    let outcome = toggler.toggle(common::BEARER).await.unwrap();

    assert_eq!(outcome, ToggleOutcome::Toggled(PlaybackState { is_playing: true }));
}

#[tokio::test]
async fn test_unreachable_player_is_a_transport_error() {
    let config = common::config_for("http://127.0.0.1:1", &[]);
    let err = common::toggler(&config).toggle(common::BEARER).await.unwrap_err();

    assert!(matches!(err, AppError::Transport(_)));
    assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
}
