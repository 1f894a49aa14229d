//! 인증 및 보안 서비스 모듈
//!
//! - [`PasswordService`] - bcrypt 해싱/검증
//! - [`TokenService`] - HS256 세션 JWT 발급/검증
//! - [`GoogleAuthService`] - Google ID 토큰 검증 ([`IdentityVerifier`] 구현)
//! - [`AuthService`] - 가입, 로그인, Google 로그인
//! - [`PasswordResetService`] - 재설정 토큰 발급/확인/소비

pub mod auth_service;
pub mod google_auth_service;
pub mod password_reset_service;
pub mod password_service;
pub mod token_service;

pub use auth_service::*;
pub use google_auth_service::*;
pub use password_reset_service::*;
pub use password_service::*;
pub use token_service::*;
