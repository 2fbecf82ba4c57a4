//! Clients for a remote draft API.

pub mod http_store;
