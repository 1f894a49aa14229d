//! # Domain Layer
//!
//! 계정 서비스의 도메인 모델을 정의하는 계층입니다.
//!
//! ```text
//! domain/
//! ├── entities/   ← MongoDB 문서 (User, PasswordResetToken)
//! ├── dto/        ← HTTP 요청/응답 본문
//! └── models/     ← 인증 컨텍스트, JWT 클레임, 외부 ID 검증 결과
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
