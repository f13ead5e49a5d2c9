use serde::Deserialize;
use ts_rs::TS;

// 企业微信扫码登录请求（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct WechatLoginRequest {
    /// OAuth 回调携带的临时授权码
    pub code: String,
}
