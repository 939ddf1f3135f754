use fitping_domain::{User, WorkoutInstance};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Mutex;

/// Builds the SMS body for a user / workout pair. The production
/// implementation calls the LLM composition service, which may fail.
/// Composition failures are terminal for the user within a run.
#[async_trait::async_trait]
pub trait IMessageComposer: Send + Sync {
    async fn compose(&self, user: &User, workout: &WorkoutInstance) -> anyhow::Result<String>;
}

pub struct HttpMessageComposer {
    client: reqwest::Client,
    url: String,
}

impl HttpMessageComposer {
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ComposeRequest<'a> {
    user_name: &'a str,
    workout_title: &'a str,
    workout_focus: Option<&'a str>,
    exercise_count: usize,
}

#[derive(Debug, Deserialize)]
struct ComposeResponse {
    message: String,
}

#[async_trait::async_trait]
impl IMessageComposer for HttpMessageComposer {
    async fn compose(&self, user: &User, workout: &WorkoutInstance) -> anyhow::Result<String> {
        let res = self
            .client
            .post(&self.url)
            .json(&ComposeRequest {
                user_name: &user.name,
                workout_title: &workout.session.title,
                workout_focus: workout.session.focus.as_deref(),
                exercise_count: workout.session.exercises.len(),
            })
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(anyhow::Error::msg(format!(
                "Composer service responded with status: {}",
                res.status()
            )));
        }
        let body: ComposeResponse = res.json().await?;
        Ok(body.message)
    }
}

/// Plain template composer for tests and local development
pub struct InMemoryMessageComposer {
    failing_users: Mutex<HashSet<String>>,
}

impl InMemoryMessageComposer {
    pub fn new() -> Self {
        Self {
            failing_users: Mutex::new(HashSet::new()),
        }
    }

    /// Makes composition fail for the given user
    pub fn fail_for_user(&self, user: &User) {
        self.failing_users
            .lock()
            .unwrap()
            .insert(user.id.as_string());
    }
}

#[async_trait::async_trait]
impl IMessageComposer for InMemoryMessageComposer {
    async fn compose(&self, user: &User, workout: &WorkoutInstance) -> anyhow::Result<String> {
        if self
            .failing_users
            .lock()
            .unwrap()
            .contains(&user.id.as_string())
        {
            return Err(anyhow::Error::msg("Composition unavailable"));
        }
        Ok(format!(
            "Hi {}! Today's workout: {}. You've got this!",
            user.name, workout.session.title
        ))
    }
}
