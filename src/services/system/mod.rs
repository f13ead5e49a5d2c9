pub mod settings;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::system::requests::UpdateSettingRequest;
use crate::storage::Storage;

pub struct SystemService {
    storage: Option<Arc<dyn Storage>>,
}

impl SystemService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
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

    // 全部系统设置（管理员）
    pub async fn list_settings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        settings::list_settings(self, request).await
    }

    // 单个系统设置
    pub async fn get_setting(
        &self,
        key: String,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        settings::get_setting(self, key, request).await
    }

    // 更新系统设置
    pub async fn update_setting(
        &self,
        key: String,
        req: UpdateSettingRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        settings::update_setting(self, key, req, request).await
    }
}
