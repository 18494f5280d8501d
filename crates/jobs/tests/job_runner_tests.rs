mod helpers;

use ferrous_mdns_domain::ServiceName;
use ferrous_mdns_jobs::{CachePurgeJob, JobRunner, MessageIngestJob, ServiceBrowseJob};
use helpers::JobFixture;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn browse_job(f: &JobFixture, service: &str) -> ServiceBrowseJob {
    ServiceBrowseJob::new(
        ServiceName::new(service).unwrap(),
        f.browse_use_case(),
        f.clock.clone(),
    )
}

#[tokio::test]
async fn test_job_runner_empty_starts_cleanly() {
    let handles = JobRunner::new().start();
    assert!(handles.is_empty());
}

#[tokio::test]
async fn test_job_runner_starts_every_job() {
    let mut f = JobFixture::new();
    let shutdown = CancellationToken::new();

    let handles = JobRunner::new()
        .with_message_ingest(MessageIngestJob::new(f.transport.clone(), f.ingest_use_case()))
        .with_cache_purge(CachePurgeJob::new(f.cache.clone(), f.clock.clone()))
        .with_service_browse(browse_job(&f, "service1"))
        .with_service_browse(browse_job(&f, "service2"))
        .with_shutdown_token(shutdown.clone())
        .start();

    assert_eq!(handles.len(), 4);
    f.next_sent().await;
    f.next_sent().await;

    shutdown.cancel();
    for handle in handles {
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("every job should honour the shared shutdown token")
            .unwrap();
    }
}

#[tokio::test]
async fn test_job_runner_without_token_keeps_jobs_running() {
    let f = JobFixture::new();

    let handles = JobRunner::new()
        .with_cache_purge(CachePurgeJob::new(f.cache.clone(), f.clock.clone()))
        .start();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(handles.iter().all(|h| !h.is_finished()));
    handles.iter().for_each(|h| h.abort());
}
