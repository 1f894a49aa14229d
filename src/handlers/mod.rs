//! HTTP 핸들러 모듈
//!
//! 핸들러는 요청을 DTO 로 풀고, 서비스를 호출하고, 감사 로그를 남긴 뒤
//! 응답을 만듭니다. 실패는 모두 [`AppError`](crate::errors::AppError)로 돌려줍니다.
//!
//! - [`auth`] - 가입, 로그인, Google 로그인
//! - [`password_reset`] - 재설정 요청/확인/소비
//! - [`profile`] - 프로필 조회/수정, 비밀번호 변경, 사진 업로드

pub mod auth;
pub mod password_reset;
pub mod profile;
