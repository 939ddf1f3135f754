pub mod find_eligible_users;
pub mod run_hourly_batch;

use crate::error::FitpingError;
use crate::shared::usecase::execute;
use actix_web::{web, HttpResponse};
use fitping_api_structs::trigger_hourly_batch::APIResponse;
use fitping_infra::FitpingContext;
use self::run_hourly_batch::RunHourlyBatchUseCase;

/// Operator re-run of the hourly batch. Safe to repeat, the delivery log
/// keeps already notified users from being messaged again.
async fn trigger_hourly_batch_controller(
    ctx: web::Data<FitpingContext>,
) -> Result<HttpResponse, FitpingError> {
    let usecase = RunHourlyBatchUseCase {
        now_utc: ctx.sys.get_utc_now(),
    };

    execute(usecase, &ctx)
        .await
        .map(|summary| HttpResponse::Ok().json(APIResponse::new(summary)))
        .map_err(|_| FitpingError::InternalError)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/notifications/trigger",
        web::post().to(trigger_hourly_batch_controller),
    );
}
