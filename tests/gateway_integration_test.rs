use anyhow::Result;
use cgi_fetch::{
    bust_cache, FetchError, FetchGateway, FetchOutcome, PollControl, Poller, Settings,
    StopReason,
};
use httpmock::prelude::*;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[tokio::test]
async fn test_fetch_text_against_real_http() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/cgi-bin/videolist.sh");
        then.status(200)
            .header("Content-Type", "text/plain")
            .body("TeslaCam/SavedClips/2024-05-01_12-00-00\n");
    });

    let gateway = FetchGateway::new();
    let body = gateway
        .fetch_text(&server.url("/cgi-bin/videolist.sh"), "load video list")
        .await?;

    mock.assert();
    assert_eq!(body, "TeslaCam/SavedClips/2024-05-01_12-00-00\n");
    Ok(())
}

#[tokio::test]
async fn test_404_maps_to_action_message() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/y");
        then.status(404);
    });

    let err = FetchGateway::new()
        .fetch_text(&server.url("/y"), "load data")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "fail to load data");
    assert_eq!(err.status(), Some(404));
    Ok(())
}

#[tokio::test]
async fn test_201_is_rejected() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/z");
        then.status(201).body("created");
    });

    let gateway = FetchGateway::new();
    assert!(gateway.fetch_text(&server.url("/z"), "create").await.is_err());
    assert_eq!(
        gateway.fetch(&server.url("/z")).await?,
        FetchOutcome::Failure(201)
    );
    Ok(())
}

#[tokio::test]
async fn test_relative_path_with_base_url_and_cache_bust() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/diagnostics.txt")
            .query_param_exists("_t");
        then.status(200).body("ok");
    });

    let settings = Settings {
        base_url: Some(server.base_url()),
        ..Default::default()
    };
    let gateway = FetchGateway::from_config(&settings)?;

    let body = gateway
        .fetch_text(&bust_cache("/diagnostics.txt"), "read diagnostics")
        .await?;

    mock.assert();
    assert_eq!(body, "ok");
    Ok(())
}

#[tokio::test]
async fn test_existing_query_keeps_both_parameters() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/cgi-bin/status.sh")
            .query_param("verbose", "1")
            .query_param_exists("_t");
        then.status(200).body("fine");
    });

    let gateway = FetchGateway::new().with_base_url(&server.base_url())?;
    let body = gateway
        .fetch_text(&bust_cache("/cgi-bin/status.sh?verbose=1"), "check status")
        .await?;

    mock.assert();
    assert_eq!(body, "fine");
    Ok(())
}

/// 回應標頭宣稱 100 bytes，但只送 3 bytes 就關閉連線
#[tokio::test]
async fn test_404_with_truncated_body_still_maps_to_status() -> Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await?;
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await?;
        socket
            .write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 100\r\n\r\nabc")
            .await?;
        let _ = socket.shutdown().await;
        Ok::<_, std::io::Error>(())
    });

    let err = FetchGateway::new()
        .fetch_text(&format!("http://{}/cgi-bin/missing.sh", addr), "load data")
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 404, .. }));
    assert_eq!(err.to_string(), "fail to load data");
    assert_eq!(err.status(), Some(404));

    server.await??;
    Ok(())
}

#[tokio::test]
async fn test_network_failure_is_distinct_from_status_failure() {
    let err = FetchGateway::new()
        .fetch_text("http://127.0.0.1:1/log.txt", "read log")
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
    assert_ne!(err.to_string(), "fail to read log");
}

#[tokio::test]
async fn test_relative_url_without_base_fails_in_transport() {
    let err = FetchGateway::new()
        .fetch_text("/x", "test")
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn test_timeout_against_slow_server() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/slow.log");
        then.status(200)
            .body("late")
            .delay(Duration::from_millis(1_500));
    });

    let err = FetchGateway::new()
        .fetch_text_with_timeout(&server.url("/slow.log"), "read slow log", 100)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Timeout { .. }));
    Ok(())
}

#[tokio::test]
async fn test_poller_hits_server_until_max_attempts() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/log.txt").query_param_exists("_t");
        then.status(200).body("line");
    });

    let settings = Settings {
        base_url: Some(server.base_url()),
        poll_interval_ms: 10,
        max_attempts: Some(3),
        ..Default::default()
    };
    let poller = Poller::from_config(FetchGateway::from_config(&settings)?, &settings);

    let mut bodies = Vec::new();
    let summary = poller
        .poll("/log.txt", "read log", |result| {
            bodies.push(result);
            PollControl::Continue
        })
        .await?;

    mock.assert_hits(3);
    assert_eq!(summary.stop_reason, StopReason::MaxAttempts);
    assert_eq!(summary.successes, 3);
    assert!(bodies.iter().all(|b| matches!(b, Ok(text) if text == "line")));
    Ok(())
}
