//! # Google Sign-In 검증 서비스
//!
//! 클라이언트(웹/모바일)가 Google Sign-In 으로 받은 ID 토큰을
//! Google `tokeninfo` 엔드포인트로 검증합니다.
//!
//! ```text
//! ┌────────────┐  1. POST /auth/google_login {token}   ┌────────────┐
//! │ 클라이언트  ├──────────────────────────────────────►│  우리 서버  │
//! └────────────┘                                        └─────┬──────┘
//!                                                             │ 2. GET tokeninfo?id_token=...
//!                                                             ▼
//!                                                      ┌─────────────┐
//!                                                      │   Google    │
//!                                                      └─────────────┘
//!   3. aud == GOOGLE_CLIENT_ID, iss == accounts.google.com, email_verified
//!   4. 이메일로 계정 조회 → 로그인 또는 google 계정 생성 (AuthService)
//! ```
//!
//! 계정 조회/생성은 [`AuthService`](crate::services::auth::AuthService)의 몫이고,
//! 여기서는 토큰이 진짜인지만 판정합니다.

use async_trait::async_trait;

use crate::config::GoogleOAuthConfig;
use crate::domain::models::oauth::{GoogleIdentity, GoogleTokenInfo};
use crate::errors::{AppError, AppResult};

pub const MSG_INVALID_GOOGLE_TOKEN: &str = "유효하지 않은 Google 토큰입니다";

const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// 외부 신원 제공자 토큰 검증기
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// 토큰이 유효하면 검증된 신원을, 아니면 401 을 돌려줍니다.
    async fn verify(&self, id_token: &str) -> AppResult<GoogleIdentity>;
}

/// Google `tokeninfo` 기반 검증기
pub struct GoogleAuthService {
    http: reqwest::Client,
    client_id: Option<String>,
    tokeninfo_uri: String,
}

impl GoogleAuthService {
    pub fn new(client_id: Option<String>, tokeninfo_uri: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
            tokeninfo_uri: tokeninfo_uri.into(),
        }
    }

    /// `GOOGLE_CLIENT_ID`, `GOOGLE_TOKENINFO_URI`
    pub fn from_env() -> Self {
        let client_id = GoogleOAuthConfig::client_id();
        if client_id.is_none() {
            log::warn!("GOOGLE_CLIENT_ID 미설정: Google 로그인이 비활성화됩니다");
        }
        Self::new(client_id, GoogleOAuthConfig::tokeninfo_uri())
    }

    async fn fetch_token_info(&self, id_token: &str) -> AppResult<GoogleTokenInfo> {
        let response = self
            .http
            .get(&self.tokeninfo_uri)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 검증 요청 실패: {}", e)))?;

        // tokeninfo 는 위조/만료 토큰에 4xx 를 돌려줍니다.
        if response.status().is_client_error() {
            return Err(AppError::AuthenticationError(MSG_INVALID_GOOGLE_TOKEN.to_string()));
        }

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Google 토큰 검증 실패: HTTP {}",
                response.status()
            )));
        }

        response
            .json::<GoogleTokenInfo>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 응답 파싱 실패: {}", e)))
    }
}

/// `tokeninfo` 응답을 검증된 신원으로 바꿉니다.
///
/// 이름이 없으면 이메일의 로컬 파트를 이름으로 씁니다.
pub fn identity_from_token_info(info: GoogleTokenInfo, client_id: &str) -> AppResult<GoogleIdentity> {
    let invalid = || AppError::AuthenticationError(MSG_INVALID_GOOGLE_TOKEN.to_string());

    if info.aud != client_id {
        log::warn!("Google 토큰 aud 불일치: {}", info.aud);
        return Err(invalid());
    }

    if !GOOGLE_ISSUERS.contains(&info.iss.as_str()) {
        log::warn!("Google 토큰 iss 불일치: {}", info.iss);
        return Err(invalid());
    }

    if !info.is_email_verified() {
        return Err(invalid());
    }

    let email = info
        .email
        .as_deref()
        .map(str::trim)
        .filter(|email| !email.is_empty())
        .ok_or_else(invalid)?
        .to_lowercase();

    let name = info
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

    Ok(GoogleIdentity {
        subject: info.sub,
        email,
        name,
        picture: info.picture,
    })
}

#[async_trait]
impl IdentityVerifier for GoogleAuthService {
    async fn verify(&self, id_token: &str) -> AppResult<GoogleIdentity> {
        let client_id = self.client_id.as_deref().ok_or_else(|| {
            AppError::ExternalServiceError("Google 로그인이 설정되지 않았습니다".to_string())
        })?;

        let info = self.fetch_token_info(id_token).await?;
        identity_from_token_info(info, client_id)
    }
}
