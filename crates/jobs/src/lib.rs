pub mod cache_purge;
pub mod message_ingest;
pub mod runner;
pub mod service_browse;
mod ticker;

pub use cache_purge::CachePurgeJob;
pub use message_ingest::MessageIngestJob;
pub use runner::JobRunner;
pub use service_browse::ServiceBrowseJob;
