//! Ferrous mDNS Infrastructure Layer
pub mod mdns;
