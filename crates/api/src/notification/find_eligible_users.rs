use crate::shared::usecase::UseCase;
use chrono::{DateTime, Utc};
use fitping_domain::{resolve_send_hour, truncate_to_hour, Day, User};
use fitping_infra::FitpingContext;

/// Finds every active user whose preferred local send hour maps to the
/// UTC hour being processed, excluding users that already have a
/// delivery record for their current local date.
#[derive(Debug)]
pub struct FindEligibleUsersUseCase {
    pub now_utc: DateTime<Utc>,
}

#[derive(Debug)]
pub struct EligibleUser {
    pub user: User,
    pub local_date: Day,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for FindEligibleUsersUseCase {
    type Response = Vec<EligibleUser>;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &FitpingContext) -> Result<Self::Response, Self::Errors> {
        let hour_start = truncate_to_hour(self.now_utc);
        let users = ctx
            .repos
            .users
            .find_all_active()
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        let mut eligible = Vec::new();
        for user in users {
            let resolution =
                resolve_send_hour(hour_start, &user.timezone, user.preferred_send_hour);
            if !resolution.fires {
                continue;
            }
            // The delivery-log exclusion is what keeps the second
            // occurrence of a fall-back hour and operator re-runs from
            // producing duplicate sends
            if ctx
                .repos
                .delivery_logs
                .find(&user.id, &resolution.local_date)
                .await
                .is_some()
            {
                continue;
            }
            eligible.push(EligibleUser {
                user,
                local_date: resolution.local_date,
            });
        }

        Ok(eligible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use chrono::TimeZone;
    use fitping_infra::{
        Config, FitpingContext, InMemoryDeliveryLogRepo, InMemoryUserRepo, InMemoryWorkoutRepo,
        RealSys, Repos, Services,
    };
    use std::sync::Arc;

    fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
            .single()
            .expect("Valid UTC datetime")
    }

    async fn insert_user(ctx: &FitpingContext, timezone: &str, hour: u32) -> User {
        let mut user = User::new("Dana", "+15550100");
        assert!(user.set_timezone(timezone));
        assert!(user.set_preferred_send_hour(hour));
        ctx.repos.users.insert(&user).await.expect("To insert user");
        user
    }

    #[tokio::test]
    async fn matches_users_on_their_local_hour() {
        let ctx = FitpingContext::create_inmemory();
        let user = insert_user(&ctx, "America/New_York", 8).await;

        // 13:00 UTC is 08:00 EST in January
        let eligible = execute(FindEligibleUsersUseCase { now_utc: utc(2021, 1, 15, 13) }, &ctx)
            .await
            .expect("To find eligible users");
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].user.id, user.id);
        assert_eq!(eligible[0].local_date, "2021-1-15".parse().unwrap());

        let eligible = execute(FindEligibleUsersUseCase { now_utc: utc(2021, 1, 15, 14) }, &ctx)
            .await
            .expect("To find eligible users");
        assert!(eligible.is_empty());
    }

    #[tokio::test]
    async fn evaluates_at_the_top_of_the_hour() {
        let ctx = FitpingContext::create_inmemory();
        insert_user(&ctx, "America/New_York", 8).await;

        // An operator re-run at 13:42 still processes the 13:00 hour
        let late_in_the_hour = Utc
            .with_ymd_and_hms(2021, 1, 15, 13, 42, 11)
            .single()
            .expect("Valid UTC datetime");
        let eligible = execute(FindEligibleUsersUseCase { now_utc: late_in_the_hour }, &ctx)
            .await
            .expect("To find eligible users");
        assert_eq!(eligible.len(), 1);
    }

    #[tokio::test]
    async fn excludes_users_with_a_delivery_record_for_the_local_date() {
        let ctx = FitpingContext::create_inmemory();
        let user = insert_user(&ctx, "America/New_York", 8).await;

        ctx.repos
            .delivery_logs
            .try_claim(&user.id, &"2021-1-15".parse().unwrap())
            .await
            .expect("To claim");

        let eligible = execute(FindEligibleUsersUseCase { now_utc: utc(2021, 1, 15, 13) }, &ctx)
            .await
            .expect("To find eligible users");
        assert!(eligible.is_empty());
    }

    #[tokio::test]
    async fn excludes_inactive_users() {
        let ctx = FitpingContext::create_inmemory();
        let mut user = User::new("Sam", "+15550101");
        user.set_timezone("America/New_York");
        user.active = false;
        ctx.repos.users.insert(&user).await.expect("To insert user");

        let eligible = execute(FindEligibleUsersUseCase { now_utc: utc(2021, 1, 15, 13) }, &ctx)
            .await
            .expect("To find eligible users");
        assert!(eligible.is_empty());
    }

    #[tokio::test]
    async fn user_query_failure_is_a_storage_error() {
        let users = Arc::new(InMemoryUserRepo::new());
        let ctx = FitpingContext {
            repos: Repos {
                users: users.clone(),
                workouts: Arc::new(InMemoryWorkoutRepo::new()),
                delivery_logs: Arc::new(InMemoryDeliveryLogRepo::new()),
            },
            services: Services::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        };
        insert_user(&ctx, "America/New_York", 8).await;
        users.fail_queries();

        let res = execute(FindEligibleUsersUseCase { now_utc: utc(2021, 1, 15, 13) }, &ctx).await;
        assert!(matches!(res, Err(UseCaseErrors::StorageError)));
    }
}
