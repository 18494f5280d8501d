use super::print_records;
use ferrous_mdns::{Client, Name, RecordType};
use hickory_proto::rr::RData;
use std::time::Duration;
use tracing::{info, warn};

/// Lets the browse jobs run for `duration`, then prints the instances found
/// for each service along with their SRV and TXT records.
pub async fn run(client: &Client, duration: Duration) -> anyhow::Result<()> {
    info!(
        services = client.browse_services().len(),
        duration_secs = duration.as_secs(),
        "Browsing"
    );

    tokio::select! {
        _ = tokio::time::sleep(duration) => {}
        _ = tokio::signal::ctrl_c() => info!("Interrupted, printing what was found"),
    }

    for service in client.browse_services() {
        let browse_name = match Name::from_ascii(service.browse_name()) {
            Ok(name) => name,
            Err(e) => {
                warn!(service = %service, error = %e, "Skipping service");
                continue;
            }
        };

        println!(";; {browse_name}");
        let pointers = client.cached_answers(&browse_name, RecordType::PTR).into_records();
        print_records(&pointers);

        for pointer in &pointers {
            let Some(RData::PTR(instance)) = pointer.data() else {
                continue;
            };
            for record_type in [RecordType::SRV, RecordType::TXT] {
                let answer = client.cached_answers(&instance.0, record_type);
                print_records(&answer.into_records());
            }
        }
    }
    Ok(())
}
