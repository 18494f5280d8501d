use crate::clock::deadline_after;
use crate::ports::{Clock, MdnsTransport};
use crate::services::{CacheUpdateSignal, QuestionMessage, UnicastPreference};
use crate::use_cases::AnswerQuestionsUseCase;
use ferrous_mdns_domain::config::mdns::{or_default, DEFAULT_RETRY_PERIOD};
use ferrous_mdns_domain::DomainError;
use hickory_proto::op::{Message, Query};
use hickory_proto::rr::Record;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Resolves one question: answered from cache when possible, otherwise asked
/// on the link and re-asked every retry period until an answer is cached,
/// the caller cancels, or the client shuts down.
pub struct ResolveQuestionUseCase {
    answerer: Arc<AnswerQuestionsUseCase>,
    transport: Arc<dyn MdnsTransport>,
    clock: Arc<dyn Clock>,
    updates: Arc<CacheUpdateSignal>,
    unicast: Arc<UnicastPreference>,
    retry_period: Duration,
    shutdown: CancellationToken,
}

impl ResolveQuestionUseCase {
    pub fn new(
        answerer: Arc<AnswerQuestionsUseCase>,
        transport: Arc<dyn MdnsTransport>,
        clock: Arc<dyn Clock>,
        updates: Arc<CacheUpdateSignal>,
    ) -> Self {
        Self {
            answerer,
            transport,
            clock,
            updates,
            unicast: Arc::new(UnicastPreference::default()),
            retry_period: DEFAULT_RETRY_PERIOD,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_unicast_preference(mut self, unicast: Arc<UnicastPreference>) -> Self {
        self.unicast = unicast;
        self
    }

    pub fn with_retry_period(mut self, retry_period: Duration) -> Self {
        self.retry_period = or_default(retry_period, DEFAULT_RETRY_PERIOD);
        self
    }

    /// Client-wide shutdown; pending queries end with `ClientClosed`.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn retry_period(&self) -> Duration {
        self.retry_period
    }

    pub async fn execute(
        &self,
        cancel: &CancellationToken,
        question: &Query,
    ) -> Result<Vec<Record>, DomainError> {
        // Subscribe first so a merge racing the cache check still wakes us.
        let mut updates = self.updates.subscribe();

        if let Some(records) = self.cached(question) {
            debug!(
                name = %question.name(),
                record_type = ?question.query_type(),
                answers = records.len(),
                "Query answered from cache"
            );
            return Ok(records);
        }

        if cancel.is_cancelled() {
            return Err(DomainError::Cancelled);
        }
        if self.shutdown.is_cancelled() {
            return Err(DomainError::ClientClosed);
        }

        let message = QuestionMessage::query(question, self.unicast.is_enabled());
        let mut deadline = deadline_after(self.clock.now(), self.retry_period);
        self.send(&message, question, false).await;

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    debug!(name = %question.name(), record_type = ?question.query_type(), "Query cancelled");
                    return Err(DomainError::Cancelled);
                }
                _ = self.shutdown.cancelled() => {
                    return Err(DomainError::ClientClosed);
                }
                update = updates.changed() => {
                    update?;
                    if let Some(records) = self.cached(question) {
                        debug!(
                            name = %question.name(),
                            record_type = ?question.query_type(),
                            answers = records.len(),
                            "Query answered"
                        );
                        return Ok(records);
                    }
                }
                _ = self.clock.sleep_until(deadline) => {
                    deadline = deadline_after(self.clock.now(), self.retry_period);
                    self.send(&message, question, true).await;
                }
            }
        }
    }

    fn cached(&self, question: &Query) -> Option<Vec<Record>> {
        let answer = self.answerer.answer(question);
        answer
            .is_hit_for(question.query_type())
            .then(|| answer.into_records())
    }

    // Send failures are transient; the next retry tick tries again.
    async fn send(&self, message: &Message, question: &Query, retransmit: bool) {
        match self.transport.send(message).await {
            Ok(()) => debug!(
                name = %question.name(),
                record_type = ?question.query_type(),
                id = message.id(),
                retransmit,
                "Query sent"
            ),
            Err(e) => warn!(
                name = %question.name(),
                error = %e,
                transport = self.transport.transport_name(),
                "Failed to send query"
            ),
        }
    }
}
