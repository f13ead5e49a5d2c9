use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::system::requests::UpdateSettingRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, AppStartTime};
use crate::services::SystemService;

// 懒加载的全局 SystemService 实例
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

/// 运行状态响应
#[derive(Debug, serde::Serialize, ts_rs::TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct PingResponse {
    pub version: String,
    pub uptime_seconds: i64,
}

// 存活探针，无需认证
pub async fn ping(start_time: web::Data<AppStartTime>) -> ActixResult<HttpResponse> {
    let uptime = chrono::Utc::now()
        .signed_duration_since(start_time.start_datetime)
        .num_seconds();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PingResponse {
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
        },
        "pong",
    )))
}

pub async fn list_settings(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.list_settings(&request).await
}

pub async fn get_setting(request: HttpRequest, path: web::Path<String>) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.get_setting(path.into_inner(), &request).await
}

pub async fn update_setting(
    request: HttpRequest,
    path: web::Path<String>,
    body: web::Json<UpdateSettingRequest>,
) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE
        .update_setting(path.into_inner(), body.into_inner(), &request)
        .await
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/ping", web::get().to(ping));

    cfg.service(
        web::scope("/api/v1/system")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .route("/settings", web::get().to(list_settings))
                    .route("/settings/{key}", web::get().to(get_setting))
                    .route("/settings/{key}", web::put().to(update_setting)),
            ),
    );
}
