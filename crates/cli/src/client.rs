use crate::options::ClientOptions;
use ferrous_mdns_application::clock::SystemClock;
use ferrous_mdns_application::ports::{Clock, MdnsTransport, PurgeOutcome, RecordCache};
use ferrous_mdns_application::services::{
    CacheUpdateListener, CacheUpdateSignal, QuestionMessage, UnicastPreference,
};
use ferrous_mdns_application::use_cases::{
    AnswerQuestionsUseCase, BrowseServiceUseCase, CachedAnswer, IngestMessageUseCase,
    ResolveQuestionUseCase,
};
use ferrous_mdns_domain::config::mdns::MAX_DURATION;
use ferrous_mdns_domain::{DomainError, ServiceName};
use ferrous_mdns_infrastructure::mdns::MdnsRecordCache;
use ferrous_mdns_jobs::{CachePurgeJob, JobRunner, MessageIngestJob, ServiceBrowseJob};
use hickory_proto::op::Query;
use hickory_proto::rr::{Name, Record, RecordType};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Multicast DNS client.
///
/// Owns the record cache and the background jobs that keep it fed: the
/// message ingest loop, the periodic purge and one browser per configured
/// service. Queries are answered from the cache whenever possible and asked
/// on the link otherwise.
///
/// Must be created inside a Tokio runtime. Call [`Client::close`] to stop the
/// jobs and release the transport; dropping the client only signals them.
pub struct Client {
    cache: Arc<MdnsRecordCache>,
    transport: Arc<dyn MdnsTransport>,
    updates: Arc<CacheUpdateSignal>,
    unicast: Arc<UnicastPreference>,
    answerer: Arc<AnswerQuestionsUseCase>,
    resolver: ResolveQuestionUseCase,
    browse_services: Vec<ServiceName>,
    shutdown: CancellationToken,
    jobs: Mutex<Vec<JoinHandle<()>>>,
}

impl Client {
    pub fn new(options: ClientOptions) -> Result<Self, DomainError> {
        let transport = options.transport.ok_or_else(|| {
            DomainError::ConfigError("an mDNS transport is required".to_string())
        })?;

        let browse_services = options
            .browse_services
            .iter()
            .map(ServiceName::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::ConfigError(e.to_string()))?;

        if tokio::runtime::Handle::try_current().is_err() {
            return Err(DomainError::ConfigError(
                "the mDNS client must be created inside a Tokio runtime".to_string(),
            ));
        }

        let clock: Arc<dyn Clock> = options.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let cache = Arc::new(
            MdnsRecordCache::new(clock.clone()).with_min_ttl(options.min_ttl.min(MAX_DURATION)),
        );
        let updates = Arc::new(CacheUpdateSignal::new());
        let unicast = Arc::new(UnicastPreference::new(options.force_unicast_responses));
        let shutdown = CancellationToken::new();

        let answerer = Arc::new(AnswerQuestionsUseCase::new(cache.clone()));
        let resolver = ResolveQuestionUseCase::new(
            answerer.clone(),
            transport.clone(),
            clock.clone(),
            updates.clone(),
        )
        .with_unicast_preference(unicast.clone())
        .with_retry_period(options.retry_period.min(MAX_DURATION))
        .with_cancellation(shutdown.clone());

        let ingest = Arc::new(IngestMessageUseCase::new(cache.clone(), updates.clone()));
        let browse = Arc::new(BrowseServiceUseCase::new(transport.clone(), unicast.clone()));

        let mut runner = JobRunner::new()
            .with_message_ingest(MessageIngestJob::new(transport.clone(), ingest))
            .with_cache_purge(
                CachePurgeJob::new(cache.clone(), clock.clone())
                    .with_period(options.cache_purge_period.min(MAX_DURATION)),
            )
            .with_shutdown_token(shutdown.clone());
        for service in &browse_services {
            runner = runner.with_service_browse(
                ServiceBrowseJob::new(service.clone(), browse.clone(), clock.clone())
                    .with_period(options.browse_period.min(MAX_DURATION)),
            );
        }
        let jobs = runner.start();

        info!(
            transport = transport.transport_name(),
            browsed_services = browse_services.len(),
            force_unicast_responses = options.force_unicast_responses,
            retry_period_ms = resolver.retry_period().as_millis() as u64,
            "mDNS client started"
        );

        Ok(Self {
            cache,
            transport,
            updates,
            unicast,
            answerer,
            resolver,
            browse_services,
            shutdown,
            jobs: Mutex::new(jobs),
        })
    }

    /// Resolves `question`, waiting until an answer is cached, `cancel`
    /// fires, or the client closes.
    pub async fn query(
        &self,
        cancel: &CancellationToken,
        question: &Query,
    ) -> Result<Vec<Record>, DomainError> {
        self.resolver.execute(cancel, question).await
    }

    pub async fn query_name(
        &self,
        cancel: &CancellationToken,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<Record>, DomainError> {
        let question = QuestionMessage::question(name, record_type)?;
        self.query(cancel, &question).await
    }

    pub fn force_unicast_responses(&self) -> bool {
        self.unicast.is_enabled()
    }

    /// Applies to every question sent afterwards, browse questions included.
    pub fn set_force_unicast_responses(&self, enabled: bool) {
        self.unicast.set(enabled);
    }

    /// Prefills the cache and wakes pending queries.
    pub fn add_to_cache(&self, records: Vec<Record>) {
        self.cache.add_records(records);
        self.updates.notify();
    }

    pub fn purge_cache(&self) -> PurgeOutcome {
        self.cache.purge()
    }

    pub fn cached_answers(&self, name: &Name, record_type: RecordType) -> CachedAnswer {
        self.answerer.answer(&Query::query(name.clone(), record_type))
    }

    pub fn answer_questions(&self, questions: &[Query]) -> Vec<Record> {
        self.answerer.execute(questions)
    }

    /// Every cached record, expired ones included, with remaining TTLs.
    pub fn cache_snapshot(&self) -> Vec<Record> {
        self.cache.snapshot()
    }

    pub fn subscribe_updates(&self) -> CacheUpdateListener {
        self.updates.subscribe()
    }

    pub fn browse_services(&self) -> &[ServiceName] {
        &self.browse_services
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Stops every background job, waits for them, then closes the
    /// transport. Pending queries end with `ClientClosed`.
    pub async fn close(&self) {
        self.shutdown.cancel();

        let jobs = {
            let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *jobs)
        };
        for job in jobs {
            if let Err(e) = job.await {
                if e.is_panic() {
                    error!(error = %e, "Background job panicked");
                }
            }
        }

        self.transport.close().await;
        info!(transport = self.transport.transport_name(), "mDNS client closed");
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
