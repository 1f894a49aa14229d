//! 인증 미들웨어
//!
//! `Authorization: Bearer <jwt>` 헤더를 검증합니다. 실패 시 다음 서비스를 호출하지 않고
//! 401 을 돌려주며, 헤더 없음/형식 오류/만료/위조 각각 메시지가 다릅니다.
//!
//! [`TokenService`](crate::services::auth::TokenService)는 앱 데이터(`web::Data`)에서 꺼냅니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 보호된 스코프에 붙이는 인증 미들웨어 팩토리
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// 유효한 세션 토큰이 없으면 401
    pub fn required() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
