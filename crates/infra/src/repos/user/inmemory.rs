use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use fitping_domain::{User, ID};
use std::sync::atomic::{AtomicBool, Ordering};

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
    failing: AtomicBool,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent query fail
    pub fn fail_queries(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        insert(user, &self.users);
        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        save(user, &self.users);
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        find(user_id, &self.users)
    }

    async fn find_all_active(&self) -> anyhow::Result<Vec<User>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(anyhow::Error::msg("User storage unavailable"));
        }
        Ok(find_by(&self.users, |u| u.active))
    }
}
