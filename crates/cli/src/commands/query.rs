use super::print_records;
use anyhow::Context;
use ferrous_mdns::{Client, DomainError, RecordType};
use std::str::FromStr;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn run(
    client: &Client,
    name: &str,
    record_type: &str,
    timeout: Duration,
) -> anyhow::Result<()> {
    let record_type = RecordType::from_str(&record_type.to_ascii_uppercase())
        .with_context(|| format!("unknown record type {record_type}"))?;

    let cancel = CancellationToken::new();
    let deadline = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(timeout) => {}
                _ = tokio::signal::ctrl_c() => {}
            }
            cancel.cancel();
        })
    };

    info!(name, record_type = ?record_type, "Querying");
    let result = client.query_name(&cancel, name, record_type).await;
    deadline.abort();

    match result {
        Ok(records) => {
            print_records(&records);
            Ok(())
        }
        Err(DomainError::Cancelled) => {
            anyhow::bail!("no answer for {name} {record_type} within {}s", timeout.as_secs())
        }
        Err(e) => Err(e.into()),
    }
}
