mod cache_update_signal;
mod question_message;

pub use cache_update_signal::{CacheUpdateListener, CacheUpdateSignal};
pub use question_message::{parse_name, QuestionMessage, UnicastPreference};
