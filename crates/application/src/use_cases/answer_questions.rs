use crate::ports::{CnameChain, RecordCache};
use hickory_proto::op::Query;
use hickory_proto::rr::{Record, RecordType};
use std::sync::Arc;

/// Cache lookup result for a single question.
#[derive(Debug, Default, Clone)]
pub struct CachedAnswer {
    pub records: Vec<Record>,
    pub cnames: CnameChain,
}

impl CachedAnswer {
    /// Direct answers count, and so do aliases when the question asked for them.
    pub fn is_hit_for(&self, record_type: RecordType) -> bool {
        !self.records.is_empty() || (record_type == RecordType::CNAME && !self.cnames.is_empty())
    }

    pub fn into_records(self) -> Vec<Record> {
        let mut records = self.records;
        records.extend(self.cnames.into_records());
        records
    }
}

pub struct AnswerQuestionsUseCase {
    cache: Arc<dyn RecordCache>,
}

impl AnswerQuestionsUseCase {
    pub fn new(cache: Arc<dyn RecordCache>) -> Self {
        Self { cache }
    }

    /// Direct answers in question order, followed by every CNAME crossed, once each.
    pub fn execute(&self, questions: &[Query]) -> Vec<Record> {
        let mut cnames = CnameChain::new();
        let mut answers = Vec::new();

        for question in questions {
            answers.extend(self.lookup(question, &mut cnames));
        }

        answers.extend(cnames.into_records());
        answers
    }

    pub fn answer(&self, question: &Query) -> CachedAnswer {
        let mut cnames = CnameChain::new();
        let records = self.lookup(question, &mut cnames);
        CachedAnswer { records, cnames }
    }

    fn lookup(&self, question: &Query, cnames: &mut CnameChain) -> Vec<Record> {
        self.cache
            .cached_answers(question.name(), question.query_type(), cnames)
    }
}
