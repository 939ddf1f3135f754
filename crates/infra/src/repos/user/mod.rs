mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;

use fitping_domain::{User, ID};

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    /// Every user the scheduler may have to notify. Timezone resolution
    /// happens in the application, not the query.
    async fn find_all_active(&self) -> anyhow::Result<Vec<User>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::Repos;

    #[tokio::test]
    async fn active_user_query_skips_inactive_users() {
        let repos = Repos::create_inmemory();

        let mut active = User::new("Dana", "+15550100");
        active.set_timezone("America/New_York");
        let mut inactive = User::new("Sam", "+15550101");
        inactive.active = false;

        repos.users.insert(&active).await.expect("To insert user");
        repos.users.insert(&inactive).await.expect("To insert user");

        let found = repos.users.find_all_active().await.expect("To query users");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, active.id);
    }

    #[tokio::test]
    async fn save_updates_preferences() {
        let repos = Repos::create_inmemory();

        let mut user = User::new("Dana", "+15550100");
        repos.users.insert(&user).await.expect("To insert user");

        user.set_preferred_send_hour(6);
        repos.users.save(&user).await.expect("To save user");

        let found = repos.users.find(&user.id).await.expect("To find user");
        assert_eq!(found.preferred_send_hour, 6);
    }
}
