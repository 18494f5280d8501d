pub mod answer_questions;
pub mod browse_service;
pub mod ingest_message;
pub mod resolve_question;

pub use answer_questions::{AnswerQuestionsUseCase, CachedAnswer};
pub use browse_service::BrowseServiceUseCase;
pub use ingest_message::{IngestMessageUseCase, IngestOutcome};
pub use resolve_question::ResolveQuestionUseCase;
