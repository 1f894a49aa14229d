//! # Domain Models
//!
//! 저장되지 않는 도메인 값 객체들입니다.
//!
//! - [`auth`] - 요청에 주입되는 인증된 사용자
//! - [`token`] - 세션 JWT 클레임
//! - [`oauth`] - Google ID 토큰 검증 결과

pub mod auth;
pub mod token;
pub mod oauth;
