use anyhow::Context;
use ferrous_mdns::{parse_zone, Client, MdnsTransport, UdpMulticastTransport};
use ferrous_mdns_domain::Config;
use std::sync::Arc;
use tracing::info;

pub fn bind_transport(config: &Config) -> anyhow::Result<Arc<dyn MdnsTransport>> {
    let transport = UdpMulticastTransport::bind(&config.transport)
        .with_context(|| format!("binding mDNS socket on port {}", config.transport.port))?;

    if let Ok(addr) = transport.local_addr() {
        info!(local_addr = %addr, destination = %transport.destination(), "mDNS socket ready");
    }
    Ok(Arc::new(transport))
}

pub fn preload_cache(client: &Client, path: &str) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading zone file {path}"))?;
    let records = parse_zone(&text).with_context(|| format!("parsing zone file {path}"))?;

    info!(path, records = records.len(), "Preloading cache");
    client.add_to_cache(records);
    Ok(())
}
