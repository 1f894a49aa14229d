//! 세션 JWT 클레임
//!
//! RFC 7519 표준 클레임(`sub`, `iat`, `exp`)과 클라이언트 호환용 `userId`를 담습니다.
use serde::{Deserialize, Serialize};

/// JWT 토큰의 클레임(Payload) 구조체
///
/// 개인정보 보호를 위해 사용자 ID 외의 정보는 넣지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// 토큰의 주체 (사용자 ID)
    pub sub: String,
    /// 사용자 ID (sub와 동일)
    #[serde(rename = "userId")]
    pub user_id: String,
    /// 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
}
