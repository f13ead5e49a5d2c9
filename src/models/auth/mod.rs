pub mod requests;
pub mod responses;

pub use requests::WechatLoginRequest;
pub use responses::{LoginResponse, RefreshTokenResponse, UserInfoResponse};
