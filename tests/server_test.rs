//! Over-the-wire tests of the hosting runtime.

use std::time::Duration;

use sheriff_config::service::handlers::SystemStatus;

mod common;

#[tokio::test]
async fn test_serves_bootstrapped_app_and_stops_on_shutdown() {
    let entry = common::entry_point(common::test_config());
    let server = common::start_server(entry).await;

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{}/status", server.addr))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));

    let status: SystemStatus = res.json().await.unwrap();
    assert_eq!(status.status, "operational");

    server.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), server.task)
        .await
        .expect("server should stop after shutdown");
    assert!(result.unwrap().is_ok());
}

#[tokio::test]
async fn test_health_over_tcp() {
    let entry = common::entry_point(common::test_config());
    let server = common::start_server(entry).await;

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();
    let res = client
        .get(format!("http://{}/healthz", server.addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "ok");

    server.shutdown.trigger();
}
