use std::time::Duration;

use crate::{common::errors::Result, configs::FetchConfig};

/// Build the shared `reqwest::Client` used for music and speech downloads:
///
/// - Separate connect vs. total timeout so a slow handshake does not eat the
///   entire request budget.
/// - `tcp_nodelay` disables Nagle's algorithm for small request bodies.
/// - `pool_idle_timeout` evicts idle connections before origins reset them.
pub fn create_client(config: &FetchConfig) -> Result<reqwest::Client> {
    let builder = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        // Total request timeout (headers + body).
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .tcp_nodelay(true)
        .pool_max_idle_per_host(8)
        .pool_idle_timeout(Duration::from_secs(70));

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_default_config() {
        assert!(create_client(&FetchConfig::default()).is_ok());
    }
}
