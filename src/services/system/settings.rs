use std::str::FromStr;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SystemService;
use crate::middlewares::RequireJWT;
use crate::models::system::entities::{KnownSettingKey, SystemSetting};
use crate::models::system::requests::UpdateSettingRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_settings(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    let stored = match storage.list_settings().await {
        Ok(settings) => settings,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("获取配置列表失败: {e}"),
                )),
            );
        }
    };

    // 未入库的已知配置键以默认值补齐
    let mut settings = stored;
    for key in KnownSettingKey::all() {
        if !settings.iter().any(|s| s.key == key.as_str()) {
            let default_value = match key {
                KnownSettingKey::SystemName => config.app.system_name.clone(),
                _ => String::new(),
            };
            settings.push(SystemSetting {
                key: key.as_str().to_string(),
                value: default_value,
                updated_by: None,
                updated_at: chrono::Utc::now(),
            });
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(settings, "查询成功")))
}

pub async fn get_setting(
    service: &SystemService,
    key: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if KnownSettingKey::from_str(&key).is_err() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SettingNotFound,
            format!("未知的配置键: {key}"),
        )));
    }

    match storage.get_setting(&key).await {
        Ok(Some(setting)) => Ok(HttpResponse::Ok().json(ApiResponse::success(setting, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SettingNotFound,
            "该配置尚未设置",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("获取配置失败: {e}"),
            )),
        ),
    }
}

pub async fn update_setting(
    service: &SystemService,
    key: String,
    req: UpdateSettingRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取用户信息",
        )));
    };

    let Ok(known_key) = KnownSettingKey::from_str(&key) else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SettingNotFound,
            format!("未知的配置键: {key}"),
        )));
    };

    // 当前考核周期必须是合法的 YYYY-MM
    if known_key == KnownSettingKey::CurrentPeriod
        && crate::utils::validate::validate_period(&req.value).is_err()
    {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::PeriodFormatInvalid,
            "考核周期格式必须为 YYYY-MM",
        )));
    }

    match storage.upsert_setting(&key, &req.value, Some(user_id)).await {
        Ok(setting) => {
            tracing::info!("User {} updated setting {}", user_id, key);
            Ok(HttpResponse::Ok().json(ApiResponse::success(setting, "配置更新成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::StoreFailure,
                format!("更新配置失败: {e}"),
            )),
        ),
    }
}
