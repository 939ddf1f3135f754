use crate::notification::run_hourly_batch::RunHourlyBatchUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep_until, Instant};
use fitping_infra::FitpingContext;
use std::time::Duration;
use tracing::{error, info};

/// Seconds from a millis timestamp until the next top of the UTC hour
pub fn get_start_delay(now_ts: usize) -> usize {
    3600 - (now_ts / 1000) % 3600
}

pub fn start_hourly_notification_job(ctx: FitpingContext) {
    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_utc_now().timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

        sleep_until(start).await;
        let mut hourly_interval = interval(Duration::from_secs(60 * 60));
        loop {
            hourly_interval.tick().await;
            let context = ctx.clone();
            actix_web::rt::spawn(run_notification_batch(context));
        }
    });
}

async fn run_notification_batch(context: FitpingContext) {
    let usecase = RunHourlyBatchUseCase {
        now_utc: context.sys.get_utc_now(),
    };
    match execute(usecase, &context).await {
        Ok(summary) => info!(
            "Hourly notification batch done. Processed: {}, failed: {}",
            summary.processed, summary.failed
        ),
        Err(e) => error!("Hourly notification batch failed: {:?}", e),
    }
}
