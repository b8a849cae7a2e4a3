//! End-to-end health-check passes
//!
//! Real HTTP probes against mock servers, an in-memory endpoint list and a
//! recording notifier.

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use healthcheck::notifier::RecordingNotifier;
use healthcheck::orchestrator::DEFAULT_TABLE;
use healthcheck::{
    ENDPOINTS_KEY, EndpointSource, FileStore, HttpProber, MemoryStore, NotifierGateway,
    Orchestrator, OrchestratorError, ProbeSettings,
};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn prober() -> Arc<HttpProber> {
    Arc::new(
        HttpProber::new(ProbeSettings {
            timeout: Duration::from_millis(1_000),
            ..ProbeSettings::default()
        })
        .unwrap(),
    )
}

fn orchestrator(endpoints: &[String], notifier: Arc<RecordingNotifier>) -> Orchestrator {
    let store = MemoryStore::new().with_entry(DEFAULT_TABLE, ENDPOINTS_KEY, endpoints.iter().cloned());
    Orchestrator::new(
        Arc::new(store),
        prober(),
        NotifierGateway::new(notifier, "health-alerts"),
        EndpointSource::default(),
    )
}

/// An address nothing is listening on
fn refused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/")
}

async fn server_returning(status: u16, delay: Duration) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status).set_delay(delay))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_good_and_refused_endpoints() {
    let _ = tracing_subscriber::fmt::try_init();

    let good = server_returning(200, Duration::from_millis(50)).await;
    let bad = refused_endpoint();
    let notifier = Arc::new(RecordingNotifier::new());

    let summary = orchestrator(&[good.uri(), bad.clone()], notifier.clone()).run().await.unwrap();

    assert_eq!(summary.endpoints, 2);
    assert_eq!(summary.healthy, 1);
    assert_eq!(summary.failing, 1);

    let published = notifier.published();
    assert_eq!(published.len(), 1);
    assert!(published[0].subject.contains("Exception"));
    assert!(published[0].message.contains(&bad));
    assert!(published[0].message.contains("Exception:"));
}

#[tokio::test]
async fn test_teapot_endpoint() {
    let _ = tracing_subscriber::fmt::try_init();

    let teapot = server_returning(418, Duration::from_millis(30)).await;
    let notifier = Arc::new(RecordingNotifier::new());

    orchestrator(&[teapot.uri()], notifier.clone()).run().await.unwrap();

    let published = notifier.published();
    assert_eq!(published.len(), 1);
    assert!(published[0].subject.contains("418"));
    assert!(published[0].message.contains("418"));
    assert!(published[0].message.contains(&teapot.uri()));
}

#[tokio::test]
async fn test_slow_endpoint_does_not_delay_others_past_its_deadline() {
    let _ = tracing_subscriber::fmt::try_init();

    let slow = server_returning(200, Duration::from_secs(5)).await;
    let fast = server_returning(200, Duration::ZERO).await;
    let notifier = Arc::new(RecordingNotifier::new());

    let started = std::time::Instant::now();
    let summary = orchestrator(&[slow.uri(), fast.uri()], notifier.clone()).run().await.unwrap();

    // The slow probe is cut at its own 1s deadline
    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(summary.healthy, 1);
    assert_eq!(summary.failing, 1);

    let published = notifier.published();
    assert_eq!(published.len(), 1);
    assert!(published[0].message.contains(&slow.uri()));
    assert!(published[0].message.contains("timed out"));
}

#[tokio::test]
async fn test_unreadable_store_fails_before_probing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let notifier = Arc::new(RecordingNotifier::new());
    let orchestrator = Orchestrator::new(
        Arc::new(FileStore::new(dir.path().join("missing.toml"))),
        prober(),
        NotifierGateway::new(notifier.clone(), "health-alerts"),
        EndpointSource::default(),
    );

    let result = orchestrator.run().await;

    assert!(matches!(result, Err(OrchestratorError::Store(_))));
    assert!(notifier.published().is_empty());
}

#[tokio::test]
async fn test_file_store_pass() {
    let up = server_returning(204, Duration::ZERO).await;
    let down = server_returning(500, Duration::ZERO).await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("endpoints.toml");
    std::fs::write(
        &path,
        format!("[{DEFAULT_TABLE}]\n{ENDPOINTS_KEY} = [\"{}\", \"{}\"]\n", up.uri(), down.uri()),
    )
    .unwrap();

    let notifier = Arc::new(RecordingNotifier::new());
    let orchestrator = Orchestrator::new(
        Arc::new(FileStore::new(&path)),
        prober(),
        NotifierGateway::new(notifier.clone(), "health-alerts"),
        EndpointSource::default(),
    );

    let summary = orchestrator.run().await.unwrap();

    assert_eq!(summary.healthy, 1);
    assert_eq!(summary.failing, 1);
    assert!(notifier.published()[0].message.contains("500 (Internal Server Error)"));
}
