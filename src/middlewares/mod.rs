//! HTTP 미들웨어 모듈
//!
//! - [`AuthMiddleware`] - Bearer 세션 토큰 검증 후 [`AuthenticatedUser`]를 요청에 주입
//!
//! ```rust,ignore
//! web::scope("/profile")
//!     .wrap(AuthMiddleware::required())
//!     .service(get_profile)
//! ```
//!
//! [`AuthenticatedUser`]: crate::domain::models::auth::AuthenticatedUser

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
