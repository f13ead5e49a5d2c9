use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::entities::UserRole;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginResponse, WechatLoginRequest},
};
use crate::utils::jwt;

use super::AuthService;

pub async fn handle_wechat_login(
    service: &AuthService,
    login_request: WechatLoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();
    let wechat = service.wechat_client();

    // 1. 用授权码换取企业微信成员 userid
    let wechat_userid = match wechat.get_userid_by_code(&login_request.code).await {
        Ok(userid) => userid,
        Err(e) => {
            tracing::warn!("Wechat code exchange failed: {}", e);
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                "企业微信授权失败，请重新扫码",
            )));
        }
    };

    // 2. 查找员工，首次登录时拉取详情自动建档
    let user = match storage.get_user_by_wechat_userid(&wechat_userid).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            let profile = match wechat.get_user_detail(&wechat_userid).await {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::error!("Failed to fetch wechat user detail: {}", e);
                    return Ok(HttpResponse::BadGateway().json(ApiResponse::error_empty(
                        ErrorCode::IdentityProviderError,
                        "获取企业微信成员信息失败",
                    )));
                }
            };
            match storage.create_user(profile, UserRole::Employee).await {
                Ok(user) => {
                    tracing::info!("Created user {} from wechat profile", user.wechat_userid);
                    user
                }
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("创建员工档案失败: {e}"),
                        ),
                    ));
                }
            }
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("登录失败: {e}"),
                )),
            );
        }
    };

    // 3. 停用的账号不允许登录
    if !user.is_active {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "账号已被停用，请联系管理员",
        )));
    }

    // 4. 生成令牌对
    match user.generate_token_pair() {
        Ok(token_pair) => {
            tracing::info!("User {} logged in via wechat", user.wechat_userid);

            let response = LoginResponse {
                access_token: token_pair.access_token,
                expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
                user,
                created_at: chrono::Utc::now(),
            };

            let refresh_cookie =
                jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);

            Ok(HttpResponse::Ok()
                .cookie(refresh_cookie)
                .json(ApiResponse::success(response, "登录成功")))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "登录失败，无法生成令牌",
                )),
            )
        }
    }
}
