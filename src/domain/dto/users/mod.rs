//! # User DTOs
//!
//! HTTP 요청/응답 본문 구조체입니다. JSON 필드명은 camelCase를 사용합니다.
//!
//! | 구조체 | 용도 |
//! |--------|------|
//! | [`request::LoginRequest`] | `POST /auth/login` |
//! | [`request::GoogleLoginRequest`] | `POST /auth/google_login` |
//! | [`request::ForgotPasswordRequest`] | `POST /auth/forgot-password` |
//! | [`request::VerifyResetTokenRequest`] | `POST /auth/verify-token` |
//! | [`request::ResetPasswordRequest`] | `POST /auth/reset-password` |
//! | [`request::ChangePasswordRequest`] | `PUT /profile/password` |
//! | [`response::AuthResponse`] | 가입/로그인 성공 |
//! | [`response::ProfileResponse`] | 프로필 조회 |

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
