use crate::{CachePurgeJob, MessageIngestJob, ServiceBrowseJob};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub trait SpawnableJob: Send + Sync + 'static {
    fn with_cancellation(self, token: CancellationToken) -> Self;
    fn start_job(self: Arc<Self>) -> JoinHandle<()>;
}

macro_rules! impl_spawnable_job {
    ($t:ty) => {
        impl SpawnableJob for $t {
            fn with_cancellation(self, token: CancellationToken) -> Self {
                self.with_cancellation(token)
            }

            fn start_job(self: Arc<Self>) -> JoinHandle<()> {
                tokio::spawn(async move { self.start().await })
            }
        }
    };
}

impl_spawnable_job!(MessageIngestJob);
impl_spawnable_job!(CachePurgeJob);
impl_spawnable_job!(ServiceBrowseJob);

fn spawn_job<J: SpawnableJob>(job: J, shutdown: &Option<CancellationToken>) -> JoinHandle<()> {
    let job = match shutdown {
        Some(token) => job.with_cancellation(token.clone()),
        None => job,
    };
    Arc::new(job).start_job()
}

/// Starts the client's background jobs under one shutdown token.
pub struct JobRunner {
    message_ingest: Option<MessageIngestJob>,
    cache_purge: Option<CachePurgeJob>,
    service_browse: Vec<ServiceBrowseJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            message_ingest: None,
            cache_purge: None,
            service_browse: Vec::new(),
            shutdown: None,
        }
    }

    pub fn with_message_ingest(mut self, job: MessageIngestJob) -> Self {
        self.message_ingest = Some(job);
        self
    }

    pub fn with_cache_purge(mut self, job: CachePurgeJob) -> Self {
        self.cache_purge = Some(job);
        self
    }

    pub fn with_service_browse(mut self, job: ServiceBrowseJob) -> Self {
        self.service_browse.push(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    /// Spawns every configured job and returns their handles.
    /// Requires a running Tokio runtime.
    pub fn start(self) -> Vec<JoinHandle<()>> {
        info!(
            browsed_services = self.service_browse.len(),
            "Starting background job runner"
        );

        let mut handles = Vec::with_capacity(2 + self.service_browse.len());
        if let Some(job) = self.message_ingest {
            handles.push(spawn_job(job, &self.shutdown));
        }
        if let Some(job) = self.cache_purge {
            handles.push(spawn_job(job, &self.shutdown));
        }
        for job in self.service_browse {
            handles.push(spawn_job(job, &self.shutdown));
        }

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
