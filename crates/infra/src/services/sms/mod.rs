use serde::Serialize;
use std::collections::HashSet;
use std::sync::Mutex;

/// Outbound SMS gateway. Errors are terminal per-user failures for the
/// batch, the gateway itself handles carrier-level retries.
#[async_trait::async_trait]
pub trait ISmsGateway: Send + Sync {
    async fn send(&self, to: &str, body: &str) -> anyhow::Result<()>;
}

pub struct HttpSmsGateway {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl HttpSmsGateway {
    pub fn new(url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SendSmsRequest<'a> {
    to: &'a str,
    body: &'a str,
}

#[async_trait::async_trait]
impl ISmsGateway for HttpSmsGateway {
    async fn send(&self, to: &str, body: &str) -> anyhow::Result<()> {
        let res = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&SendSmsRequest { to, body })
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(anyhow::Error::msg(format!(
                "SMS gateway rejected message with status: {}",
                res.status()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundSms {
    pub to: String,
    pub body: String,
}

/// Records messages instead of sending them. Used by tests and local
/// development.
pub struct InMemorySmsGateway {
    pub sent: Mutex<Vec<OutboundSms>>,
    rejected_numbers: Mutex<HashSet<String>>,
}

impl InMemorySmsGateway {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            rejected_numbers: Mutex::new(HashSet::new()),
        }
    }

    /// Makes every send to the given number fail
    pub fn reject_number(&self, number: &str) {
        self.rejected_numbers
            .lock()
            .unwrap()
            .insert(number.to_string());
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl ISmsGateway for InMemorySmsGateway {
    async fn send(&self, to: &str, body: &str) -> anyhow::Result<()> {
        if self.rejected_numbers.lock().unwrap().contains(to) {
            return Err(anyhow::Error::msg(format!("Undeliverable number: {}", to)));
        }
        self.sent.lock().unwrap().push(OutboundSms {
            to: to.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
