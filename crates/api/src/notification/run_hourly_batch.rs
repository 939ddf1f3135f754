use super::find_eligible_users::{EligibleUser, FindEligibleUsersUseCase};
use crate::shared::usecase::{execute, UseCase};
use chrono::{DateTime, Utc};
use fitping_domain::{BatchSummary, Day, DeliveryOutcome, NotificationFailure, ID};
use fitping_infra::FitpingContext;
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{error, info};

/// The scheduler's entry point, invoked once per UTC hour. Fans the
/// eligible-user set out across a bounded pool, isolates per-user
/// failures and aggregates a result summary.
#[derive(Debug)]
pub struct RunHourlyBatchUseCase {
    pub now_utc: DateTime<Utc>,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    /// The eligible-user set could not be fetched, nothing was processed
    StorageError,
}

enum UserOutcome {
    Sent,
    /// The (user, local date) slot was claimed by an earlier run,
    /// nothing to do
    AlreadyNotified,
    Failed(NotificationFailure),
}

#[async_trait::async_trait(?Send)]
impl UseCase for RunHourlyBatchUseCase {
    type Response = BatchSummary;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &FitpingContext) -> Result<Self::Response, Self::Errors> {
        let eligible = execute(
            FindEligibleUsersUseCase {
                now_utc: self.now_utc,
            },
            ctx,
        )
        .await
        .map_err(|_| UseCaseErrors::StorageError)?;

        info!(
            "Hourly notification batch at {}: {} eligible users",
            self.now_utc,
            eligible.len()
        );

        let deadline = Duration::from_millis(ctx.config.notification_timeout_millis);
        let outcomes = stream::iter(eligible)
            .map(|eligible_user| notify_with_deadline(eligible_user, deadline, ctx))
            .buffer_unordered(ctx.config.batch_concurrency_limit)
            .collect::<Vec<_>>()
            .await;

        let mut summary = BatchSummary::default();
        for (user_id, outcome) in outcomes {
            match outcome {
                UserOutcome::Sent => summary.record_sent(),
                UserOutcome::AlreadyNotified => (),
                UserOutcome::Failed(reason) => summary.record_failure(user_id, reason),
            }
        }

        Ok(summary)
    }
}

async fn notify_with_deadline(
    eligible: EligibleUser,
    deadline: Duration,
    ctx: &FitpingContext,
) -> (ID, UserOutcome) {
    let user_id = eligible.user.id.clone();
    match tokio::time::timeout(deadline, notify_user(eligible, ctx)).await {
        Ok(outcome) => (user_id, outcome),
        Err(_) => {
            error!("Notification for user {} timed out", user_id);
            (user_id, UserOutcome::Failed(NotificationFailure::Timeout))
        }
    }
}

/// One user's notification pipeline. Terminal states only: a failed user
/// is reported in the summary and left for the next qualifying hour or
/// day, never retried within the run.
async fn notify_user(eligible: EligibleUser, ctx: &FitpingContext) -> UserOutcome {
    let EligibleUser { user, local_date } = eligible;

    // Claiming the slot before any downstream call is what bounds the
    // system to one attempted send per user per local calendar day
    let claimed = match ctx
        .repos
        .delivery_logs
        .try_claim(&user.id, &local_date)
        .await
    {
        Ok(claimed) => claimed,
        Err(e) => return UserOutcome::Failed(NotificationFailure::Storage(e.to_string())),
    };
    if !claimed {
        return UserOutcome::AlreadyNotified;
    }

    let workout = match ctx
        .repos
        .workouts
        .find_by_user_and_date(&user.id, &local_date)
        .await
    {
        Ok(Some(workout)) => workout,
        Ok(None) => {
            record_outcome(ctx, &user.id, &local_date, DeliveryOutcome::Skipped).await;
            return UserOutcome::Failed(NotificationFailure::NoWorkout);
        }
        Err(e) => {
            record_outcome(ctx, &user.id, &local_date, DeliveryOutcome::Failed).await;
            return UserOutcome::Failed(NotificationFailure::Storage(e.to_string()));
        }
    };

    let body = match ctx.services.composer.compose(&user, &workout).await {
        Ok(body) => body,
        Err(e) => {
            record_outcome(ctx, &user.id, &local_date, DeliveryOutcome::Failed).await;
            return UserOutcome::Failed(NotificationFailure::Compose(e.to_string()));
        }
    };

    if let Err(e) = ctx.services.sms.send(&user.phone_number, &body).await {
        record_outcome(ctx, &user.id, &local_date, DeliveryOutcome::Failed).await;
        return UserOutcome::Failed(NotificationFailure::Dispatch(e.to_string()));
    }

    record_outcome(ctx, &user.id, &local_date, DeliveryOutcome::Sent).await;
    UserOutcome::Sent
}

async fn record_outcome(ctx: &FitpingContext, user_id: &ID, date: &Day, outcome: DeliveryOutcome) {
    if let Err(e) = ctx
        .repos
        .delivery_logs
        .record_outcome(user_id, date, outcome)
        .await
    {
        error!(
            "Failed to record delivery outcome for user {}: {:?}",
            user_id, e
        );
    }
}
