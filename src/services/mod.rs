//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 `main`에서 한 번 생성되어 `web::Data`로 핸들러에 주입됩니다.
//! 저장소, 메일 발송기, 신원 검증기는 모두 trait 객체로 받습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::AuthService;
//!
//! async fn login(auth: web::Data<AuthService>, body: web::Json<LoginRequest>) -> AppResult<HttpResponse> {
//!     let response = auth.login(&body.email, &body.password).await?;
//!     Ok(HttpResponse::Ok().json(response))
//! }
//! ```

pub mod audit;
pub mod auth;
pub mod email;
pub mod users;
