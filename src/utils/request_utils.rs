//! 요청 메타데이터 유틸리티

use actix_web::HttpRequest;

/// 감사 로그용 클라이언트 IP
///
/// 프록시 헤더(`Forwarded`, `X-Forwarded-For`)가 있으면 그 값을, 없으면 피어 주소를 씁니다.
pub fn client_ip(req: &HttpRequest) -> Option<String> {
    req.connection_info()
        .realip_remote_addr()
        .map(|addr| addr.to_string())
}
