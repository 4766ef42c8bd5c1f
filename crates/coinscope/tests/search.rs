//! End-to-end searches against a mock HTTP server serving both source pages.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coinscope::{Orchestrator, OrchestratorConfig, SourceError, TickCounter};

const CMC_PAGE: &str = include_str!("fixtures/coinmarketcap.html");
const CW_PAGE: &str = include_str!("fixtures/coinwarz.html");

// ─────────────────────── helpers ───────────────────────

fn config_for(server: &MockServer) -> OrchestratorConfig {
    OrchestratorConfig {
        primary_url: format!("{}/currencies/{{query}}", server.uri()),
        secondary_url: format!("{}/mining/{{query}}/difficulty-chart", server.uri()),
        tick_interval: Duration::from_millis(20),
        ..OrchestratorConfig::default()
    }
}

async fn serve(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

fn page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(body)
}

// ─────────────────────── scenarios ───────────────────────

#[tokio::test]
async fn test_bitcoin_report() {
    let server = MockServer::start().await;
    serve(&server, "/currencies/bitcoin", page(CMC_PAGE)).await;
    serve(
        &server,
        "/mining/bitcoin/difficulty-chart",
        page(CW_PAGE).set_delay(Duration::from_millis(150)),
    )
    .await;

    let orchestrator = Orchestrator::new(config_for(&server)).unwrap();
    let progress = TickCounter::new();
    let report = orchestrator.run("bitcoin", &progress).await.unwrap();

    let texts: Vec<&str> = report.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Current Value: $50,000.00 +(3.00%|$1,500.00)",
            "Current Volume: $30,000,000,000 -(10.00%|$3,000,000,000.00)",
            "Current Rank: 1",
            "Coin Comparison: 16.52 -0.43%",
            "24h Low / 24h High : $48,000.00 / $51,000.00",
            "7d Low / 7d High: $45,000.00 / $52,000.00",
            "30d Low / 30d High: $40,000.00 / $55,000.00",
            "90d Low / 90d High: $30,000.00 / $58,000.00",
            "52 Week Low / 52 Week High: $20,000.00 / $69,000.00",
            "Current Difficulty: 20,000,000",
            "1 Day Difficulty: 2.0% | 400,000.00",
            "7 Days Difficulty: 5.0% | 1,000,000.00",
            "30 Days Difficulty: 10.0% | 2,000,000.00",
            "90 Days Difficulty: 15.0% | 3,000,000.00",
        ]
    );
    assert_eq!(report.query, "bitcoin");
    assert_eq!(report.primary_url, format!("{}/currencies/bitcoin", server.uri()));
    assert!(progress.ticks() >= 1);
    assert!(progress.is_finished());
}

#[tokio::test]
async fn test_secondary_not_found_yields_one_failure() {
    let server = MockServer::start().await;
    serve(&server, "/currencies/bitcoin", page(CMC_PAGE)).await;
    serve(
        &server,
        "/mining/bitcoin/difficulty-chart",
        ResponseTemplate::new(404),
    )
    .await;

    let orchestrator = Orchestrator::new(config_for(&server)).unwrap();
    let failure = orchestrator.run("bitcoin", &TickCounter::new()).await.unwrap_err();

    let secondary = format!("{}/mining/bitcoin/difficulty-chart", server.uri());
    assert_eq!(
        failure.messages(),
        vec![format!("There was an issue scraping {secondary}")]
    );
    assert_eq!(failure.to_string(), format!("There was an issue scraping {secondary}"));
}

#[tokio::test]
async fn test_primary_layout_change_fails_search() {
    let server = MockServer::start().await;
    let redesigned = CMC_PAGE.replace("priceTitle", "priceHeading");
    serve(&server, "/currencies/bitcoin", page(&redesigned)).await;
    serve(&server, "/mining/bitcoin/difficulty-chart", page(CW_PAGE)).await;

    let orchestrator = Orchestrator::new(config_for(&server)).unwrap();
    let failure = orchestrator.run("bitcoin", &TickCounter::new()).await.unwrap_err();

    assert_eq!(failure.failed.len(), 1);
    assert_eq!(
        failure.failed_urls(),
        vec![format!("{}/currencies/bitcoin", server.uri())]
    );
    assert!(matches!(failure.failed[0].error, SourceError::Extraction(_)));
}

#[tokio::test]
async fn test_unknown_coin_fails_both_sources() {
    let server = MockServer::start().await;
    serve(&server, "/currencies/notacoin", ResponseTemplate::new(404)).await;
    serve(
        &server,
        "/mining/notacoin/difficulty-chart",
        ResponseTemplate::new(500),
    )
    .await;

    let orchestrator = Orchestrator::new(config_for(&server)).unwrap();
    let failure = orchestrator.run("notacoin", &TickCounter::new()).await.unwrap_err();

    assert_eq!(failure.messages().len(), 2);
    assert!(failure.messages()[0].ends_with("/currencies/notacoin"));
    assert!(failure.messages()[1].ends_with("/mining/notacoin/difficulty-chart"));
}
