use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Maximum number of users notified concurrently within one hourly
    /// batch. Bounds the load on the data store, the composition service
    /// and the SMS gateway.
    pub batch_concurrency_limit: usize,
    /// Deadline in millis for one user's lookup + compose + dispatch.
    /// A slow downstream call is recorded as a failed notification
    /// instead of stalling the whole batch.
    pub notification_timeout_millis: u64,
    /// Endpoint of the outbound SMS gateway
    pub sms_gateway_url: String,
    /// API key sent to the SMS gateway
    pub sms_gateway_api_key: String,
    /// Endpoint of the message composition service
    pub composer_url: String,
}

fn get_env_usize(var: &str, default: usize) -> usize {
    let value = match std::env::var(var) {
        Ok(value) => value,
        Err(_) => return default,
    };
    match value.parse::<usize>() {
        Ok(value) => value,
        Err(_) => {
            warn!(
                "The given {}: {} is not valid, falling back to the default: {}.",
                var, value, default
            );
            default
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let sms_gateway_url = std::env::var("SMS_GATEWAY_URL").unwrap_or_else(|_| {
            info!("Did not find SMS_GATEWAY_URL environment variable. Falling back to localhost.");
            "http://localhost:9100/messages".into()
        });
        let sms_gateway_api_key = std::env::var("SMS_GATEWAY_API_KEY").unwrap_or_default();
        let composer_url = std::env::var("COMPOSER_URL").unwrap_or_else(|_| {
            info!("Did not find COMPOSER_URL environment variable. Falling back to localhost.");
            "http://localhost:9200/compose".into()
        });

        let batch_concurrency_limit = match get_env_usize("BATCH_CONCURRENCY_LIMIT", 10) {
            0 => {
                warn!("BATCH_CONCURRENCY_LIMIT must be at least 1, falling back to the default: 10.");
                10
            }
            limit => limit,
        };

        Self {
            port: get_env_usize("PORT", 5000),
            batch_concurrency_limit,
            notification_timeout_millis: get_env_usize("NOTIFICATION_TIMEOUT_MILLIS", 30 * 1000)
                as u64,
            sms_gateway_url,
            sms_gateway_api_key,
            composer_url,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_concurrency_limit_falls_back_to_the_default() {
        std::env::set_var("BATCH_CONCURRENCY_LIMIT", "0");
        let config = Config::new();
        std::env::remove_var("BATCH_CONCURRENCY_LIMIT");
        assert_eq!(config.batch_concurrency_limit, 10);
    }
}
