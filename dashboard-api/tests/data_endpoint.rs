//! End-to-end tests for the data endpoint against an in-memory price source
//!
//! Run with: cargo test -p dashboard-api --test data_endpoint

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use dashboard_api::{build_router, AppState, Config};
use dashboard_coingecko::PriceSource;
use dashboard_core::{Asset, CurrentSnapshot, DashboardError, DashboardResult, HistoricalSeries};
use dashboard_services::{ManualClock, PriceCache};
use serde_json::Value;
use tower::ServiceExt;

const DAY_MS: i64 = 86_400_000;

/// Healthy upstream, except for `failing` which answers with `failure`
struct FakeUpstream {
    calls: AtomicUsize,
    failing: Option<(Asset, DashboardError)>,
}

impl FakeUpstream {
    fn healthy() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failing: None,
        }
    }

    fn failing(asset: Asset, failure: DashboardError) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failing: Some((asset, failure)),
        }
    }

    fn check(&self, asset: Asset) -> DashboardResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failing {
            Some((failing, failure)) if *failing == asset => Err(failure.clone()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl PriceSource for FakeUpstream {
    async fn fetch_current(&self, asset: Asset) -> DashboardResult<CurrentSnapshot> {
        self.check(asset)?;
        Ok(CurrentSnapshot {
            id: asset.coin_id().to_string(),
            name: asset.coin_id().to_uppercase(),
            symbol: asset.symbol().to_string(),
            price: 100.0,
            price_change_24h: Some(-2.5),
            market_cap: 1_000_000.0,
            image: format!("https://example.com/{}.png", asset.symbol()),
        })
    }

    async fn fetch_history(&self, asset: Asset) -> DashboardResult<HistoricalSeries> {
        self.check(asset)?;
        Ok(HistoricalSeries {
            samples: (0..7)
                .map(|d| (1_709_942_400_000 + d * DAY_MS, 90.0 + d as f64))
                .collect(),
        })
    }
}

struct TestApp {
    router: Router,
    upstream: Arc<FakeUpstream>,
    cache: Arc<PriceCache>,
    clock: Arc<ManualClock>,
}

fn app_with(upstream: FakeUpstream, config: Config) -> TestApp {
    let upstream = Arc::new(upstream);
    let clock = Arc::new(ManualClock::new());
    let cache = Arc::new(PriceCache::with_clock(config.cache_ttl, clock.clone()));
    let state = AppState::with_cache(&config, upstream.clone(), cache.clone());

    TestApp {
        router: build_router(state, &config),
        upstream,
        cache,
        clock,
    }
}

fn app(upstream: FakeUpstream) -> TestApp {
    app_with(upstream, Config::default())
}

async fn get(router: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, headers, body)
}

#[tokio::test]
async fn test_fresh_request_returns_three_records() {
    let app = app(FakeUpstream::healthy());

    let (status, _, body) = get(&app.router, "/data").await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 3);

    let ids: Vec<&str> = records.iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["bitcoin", "ethereum", "dogecoin"]);

    for record in records {
        assert_eq!(record["priceHistory"].as_array().unwrap().len(), 7);
        assert_eq!(record["priceChange24h"], -2.5);
        assert_eq!(record["marketCap"], 1_000_000.0);
    }
    assert_eq!(records[0]["priceHistory"][0]["date"], "3/9/2024");
    assert_eq!(records[0]["priceHistory"][6]["price"], 96.0);
    assert_eq!(app.upstream.calls.load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn test_second_request_is_served_from_cache() {
    let app = app(FakeUpstream::healthy());

    let (_, _, first) = get(&app.router, "/data").await;
    let (status, _, second) = get(&app.router, "/data").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(app.upstream.calls.load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn test_api_prefixed_path_shares_the_cache() {
    let app = app(FakeUpstream::healthy());

    let (_, _, first) = get(&app.router, "/data").await;
    let (status, _, second) = get(&app.router, "/api/data").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(app.upstream.calls.load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn test_expired_cache_refetches() {
    let app = app(FakeUpstream::healthy());

    get(&app.router, "/data").await;
    app.clock.advance(Duration::from_secs(300));
    let (status, _, _) = get(&app.router, "/data").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.upstream.calls.load(Ordering::SeqCst), 12);
}

#[tokio::test]
async fn test_upstream_rate_limit_returns_429() {
    let app = app(FakeUpstream::failing(
        Asset::Ethereum,
        DashboardError::rate_limited(None),
    ));

    let (status, headers, body) = get(&app.router, "/data").await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Rate limit exceeded. Please try again later.");
    assert!(headers.get(header::RETRY_AFTER).is_none());
    assert!(app.cache.get().is_none());
}

#[tokio::test]
async fn test_upstream_retry_after_is_forwarded() {
    let app = app(FakeUpstream::failing(
        Asset::Bitcoin,
        DashboardError::rate_limited(Some(30)),
    ));

    let (status, headers, body) = get(&app.router, "/data").await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Rate limit exceeded. Please try again later.");
    assert_eq!(body["retryAfterSecs"], 30);
    assert_eq!(headers.get(header::RETRY_AFTER).unwrap(), "30");
}

#[tokio::test]
async fn test_other_upstream_failure_returns_500_with_details() {
    let app = app(FakeUpstream::failing(
        Asset::Dogecoin,
        DashboardError::http(503, "service unavailable"),
    ));

    let (status, _, body) = get(&app.router, "/data").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "An error occurred while fetching data");
    assert_eq!(body["details"], "Request failed with status code 503");
    assert!(app.cache.get().is_none());
}

#[tokio::test]
async fn test_upstream_error_page_is_not_forwarded() {
    let app = app(FakeUpstream::failing(
        Asset::Bitcoin,
        DashboardError::http(502, "<html><body>Bad Gateway</body></html>"),
    ));

    let (status, _, body) = get(&app.router, "/data").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let details = body["details"].as_str().unwrap();
    assert_eq!(details, "Request failed with status code 502");
    assert!(!details.contains("<html>"));
}

#[tokio::test]
async fn test_client_rate_limit() {
    let config = Config {
        rate_limit_max_requests: 2,
        ..Config::default()
    };
    let app = app_with(FakeUpstream::healthy(), config);

    assert_eq!(get(&app.router, "/data").await.0, StatusCode::OK);
    assert_eq!(get(&app.router, "/api/data").await.0, StatusCode::OK);

    let (status, headers, body) = get(&app.router, "/data").await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Too many requests, please try again later.");
    assert!(headers.get(header::RETRY_AFTER).is_some());
}

#[tokio::test]
async fn test_health_is_not_rate_limited() {
    let config = Config {
        rate_limit_max_requests: 1,
        ..Config::default()
    };
    let app = app_with(FakeUpstream::healthy(), config);

    get(&app.router, "/data").await;
    get(&app.router, "/data").await;
    let (status, _, body) = get(&app.router, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["cache"]["populated"], true);
    assert_eq!(body["rateLimiter"]["rejectedRequests"], 1);
}

#[tokio::test]
async fn test_cors_allows_only_configured_origin() {
    let app = app(FakeUpstream::healthy());

    let allowed = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/health/live")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        allowed
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );

    let denied = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/health/live")
                .header(header::ORIGIN, "http://evil.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(denied
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
