use ferrous_mdns_domain::{DomainError, ServiceName};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared "force unicast responses" switch, read each time a question is built.
#[derive(Debug, Default)]
pub struct UnicastPreference(AtomicBool);

impl UnicastPreference {
    pub fn new(enabled: bool) -> Self {
        Self(AtomicBool::new(enabled))
    }

    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::Release);
    }
}

pub struct QuestionMessage;

impl QuestionMessage {
    /// One-question query with a random id. `unicast_response` sets the QU bit.
    pub fn query(question: &Query, unicast_response: bool) -> Message {
        let mut question = question.clone();
        question.set_mdns_unicast_response(unicast_response);

        let mut message = Message::new();
        message
            .set_id(fastrand::u16(..))
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(false)
            .add_query(question);
        message
    }

    /// PTR question enumerating instances of `service`.
    pub fn browse(service: &ServiceName, unicast_response: bool) -> Result<Message, DomainError> {
        let name = parse_name(&service.browse_name())?;
        Ok(Self::query(
            &Query::query(name, RecordType::PTR),
            unicast_response,
        ))
    }

    pub fn question(name: &str, record_type: RecordType) -> Result<Query, DomainError> {
        Ok(Query::query(parse_name(name)?, record_type))
    }
}

/// Parses a name as fully qualified, adding the root label when missing.
pub fn parse_name(name: &str) -> Result<Name, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidDomainName("empty name".to_string()));
    }

    let mut parsed =
        Name::from_ascii(name).map_err(|e| DomainError::InvalidDomainName(format!("{name}: {e}")))?;
    parsed.set_fqdn(true);
    Ok(parsed)
}
