//! Service Configuration
//!
//! Everything is settable from the command line or the environment, so the
//! same binary runs locally (no store, no API key) and deployed.

use std::net::SocketAddr;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "milepost-server", about = "Milepost tracker API service")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "MILEPOST_BIND", default_value = "127.0.0.1:8787")]
    pub bind: SocketAddr,

    /// REST key-value store endpoint (Upstash-compatible)
    #[arg(long, env = "KV_REST_API_URL")]
    pub kv_url: Option<String>,

    /// Bearer token for the key-value store
    #[arg(long, env = "KV_REST_API_TOKEN")]
    pub kv_token: Option<String>,

    /// API key for the language-model service
    #[arg(long, env = "ANTHROPIC_API_KEY")]
    pub anthropic_api_key: Option<String>,

    /// Model used for reflection summaries
    #[arg(long, env = "MILEPOST_SUMMARY_MODEL", default_value = "claude-sonnet-4-20250514")]
    pub summary_model: String,

    /// Timeout for upstream calls, in seconds
    #[arg(long, env = "MILEPOST_UPSTREAM_TIMEOUT", default_value_t = 30)]
    pub upstream_timeout_secs: u64,
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:0".parse().unwrap(),
            kv_url: None,
            kv_token: None,
            anthropic_api_key: None,
            summary_model: "claude-sonnet-4-20250514".into(),
            upstream_timeout_secs: 30,
        }
    }
}
