//! 요청 DTO
//!
//! 회원가입과 프로필 수정 본문은 검증 체인이 필드 단위로 직접 검사하므로
//! 타입 DTO 없이 JSON 객체(`FieldMap`)로 받습니다.

pub mod auth_request;
pub mod profile_request;

pub use auth_request::*;
pub use profile_request::*;
