//! 사용자 프로필 서비스 모듈
//!
//! - [`ProfileService`] - 프로필 조회/수정, 비밀번호 변경, 사진 교체
//! - [`UploadService`] - 업로드 이미지 검사/변환/저장

pub mod profile_service;
pub mod upload_service;

pub use profile_service::ProfileService;
pub use upload_service::UploadService;
