//! # Data Transfer Objects
//!
//! HTTP 계층과 서비스 계층 사이에서 오가는 요청/응답 구조체를 정의합니다.
//! 엔티티를 그대로 노출하지 않고, 비밀번호 해시 같은 내부 필드를 걸러낸 응답만 반환합니다.

pub mod users;

pub use users::*;
