pub mod login;
pub mod profile;
pub mod token;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::Storage;
use crate::utils::wechat::WechatClient;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
    // 客户端持有 access_token 缓存，随服务常驻
    wechat: WechatClient,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            wechat: WechatClient::new(),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub(crate) fn wechat_client(&self) -> &WechatClient {
        &self.wechat
    }

    // 企业微信扫码登录
    pub async fn wechat_login(
        &self,
        login_request: crate::models::auth::WechatLoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_wechat_login(self, login_request, request).await
    }

    // 刷新令牌
    pub async fn refresh_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_refresh_token(self, request).await
    }

    // 获取当前登录员工信息
    pub async fn get_user(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::handle_get_user(self, request).await
    }
}
