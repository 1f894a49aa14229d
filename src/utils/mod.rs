//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`request_utils`] - 요청 메타데이터(클라이언트 IP 등) 추출
//! - [`display_terminal`] - 서버 시작 시 터미널 출력 포맷팅

pub mod display_terminal;
pub mod request_utils;
