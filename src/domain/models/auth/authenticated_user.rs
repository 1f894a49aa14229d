//! 인증된 사용자 추출기
//!
//! [`AuthMiddleware`](crate::middlewares::AuthMiddleware)가 Bearer 토큰을 검증한 뒤
//! Request Extensions 에 넣어 둔 값을 핸들러 인자로 꺼내 줍니다.
//!
//! ```rust,ignore
//! #[get("")]
//! pub async fn get_profile(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
//!     // user.user_id 사용
//! }
//! ```

use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string(),
            )
            .into())),
        }
    }
}
