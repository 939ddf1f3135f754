mod composer;
mod sms;

pub use composer::{HttpMessageComposer, IMessageComposer, InMemoryMessageComposer};
pub use sms::{HttpSmsGateway, ISmsGateway, InMemorySmsGateway, OutboundSms};

use crate::config::Config;
use std::sync::Arc;

/// The notification pipeline's external collaborators
#[derive(Clone)]
pub struct Services {
    pub composer: Arc<dyn IMessageComposer>,
    pub sms: Arc<dyn ISmsGateway>,
}

impl Services {
    pub fn create_http(config: &Config) -> Self {
        Self {
            composer: Arc::new(HttpMessageComposer::new(&config.composer_url)),
            sms: Arc::new(HttpSmsGateway::new(
                &config.sms_gateway_url,
                &config.sms_gateway_api_key,
            )),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            composer: Arc::new(InMemoryMessageComposer::new()),
            sms: Arc::new(InMemorySmsGateway::new()),
        }
    }
}
