//! 企业微信 API 客户端
//!
//! 负责 OAuth 授权码换取成员身份以及成员详情查询。
//! access_token 在进程内缓存，过期前 60 秒主动刷新。

use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::{CepmError, Result};
use crate::models::users::requests::WechatUserProfile;

const API_HOST: &str = "https://qyapi.weixin.qq.com/cgi-bin";

// 提前于官方过期时间刷新，避免边界上的 40014 错误
const TOKEN_EXPIRY_BUFFER_SECS: i64 = 60;

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    errcode: i32,
    errmsg: String,
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct UserIdentityResponse {
    errcode: i32,
    errmsg: String,
    #[serde(default)]
    userid: String,
}

#[derive(Debug, Deserialize)]
struct UserDetailResponse {
    errcode: i32,
    errmsg: String,
    #[serde(default)]
    userid: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    avatar: String,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: chrono::DateTime<chrono::Utc>,
}

/// 企业微信客户端
pub struct WechatClient {
    http: reqwest::Client,
    api_host: String,
    corp_id: String,
    corp_secret: String,
    token: Mutex<Option<CachedToken>>,
}

impl WechatClient {
    pub fn new() -> Self {
        let config = AppConfig::get();
        Self {
            http: reqwest::Client::new(),
            api_host: API_HOST.to_string(),
            corp_id: config.wechat.corp_id.clone(),
            corp_secret: config.wechat.corp_secret.clone(),
            token: Mutex::new(None),
        }
    }

    /// 获取 access_token，命中缓存且未过期时直接返回
    async fn get_access_token(&self) -> Result<String> {
        let mut guard = self.token.lock().await;

        if let Some(cached) = guard.as_ref()
            && chrono::Utc::now() < cached.expires_at
        {
            return Ok(cached.token.clone());
        }

        let url = format!(
            "{}/gettoken?corpid={}&corpsecret={}",
            self.api_host, self.corp_id, self.corp_secret
        );
        let resp: AccessTokenResponse = self.http.get(&url).send().await?.json().await?;

        if resp.errcode != 0 {
            return Err(CepmError::identity_provider(format!(
                "wechat work API error ({}): {}",
                resp.errcode, resp.errmsg
            )));
        }

        let expires_at = chrono::Utc::now()
            + chrono::Duration::seconds(resp.expires_in - TOKEN_EXPIRY_BUFFER_SECS);
        debug!("Refreshed wechat access token, valid until {}", expires_at);

        *guard = Some(CachedToken {
            token: resp.access_token.clone(),
            expires_at,
        });

        Ok(resp.access_token)
    }

    /// 用 OAuth 授权码换取企业微信成员 userid
    pub async fn get_userid_by_code(&self, code: &str) -> Result<String> {
        let access_token = self.get_access_token().await?;

        let url = format!(
            "{}/user/getuserinfo?access_token={}&code={}",
            self.api_host, access_token, code
        );
        let resp: UserIdentityResponse = self.http.get(&url).send().await?.json().await?;

        if resp.errcode != 0 {
            return Err(CepmError::identity_provider(format!(
                "wechat work API error ({}): {}",
                resp.errcode, resp.errmsg
            )));
        }
        if resp.userid.is_empty() {
            return Err(CepmError::identity_provider(
                "wechat user info response missing userid (not an internal member?)",
            ));
        }

        Ok(resp.userid)
    }

    /// 按 userid 拉取成员详情
    pub async fn get_user_detail(&self, userid: &str) -> Result<WechatUserProfile> {
        let access_token = self.get_access_token().await?;

        let url = format!(
            "{}/user/get?access_token={}&userid={}",
            self.api_host, access_token, userid
        );
        let resp: UserDetailResponse = self.http.get(&url).send().await?.json().await?;

        if resp.errcode != 0 {
            return Err(CepmError::identity_provider(format!(
                "wechat work API error ({}): {}",
                resp.errcode, resp.errmsg
            )));
        }

        Ok(WechatUserProfile {
            wechat_userid: resp.userid,
            name: resp.name,
            email: if resp.email.is_empty() {
                None
            } else {
                Some(resp.email)
            },
            avatar_url: if resp.avatar.is_empty() {
                None
            } else {
                Some(resp.avatar)
            },
        })
    }
}
