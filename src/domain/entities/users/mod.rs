//! Users Entity Module
//!
//! 사용자 도메인의 핵심 엔티티를 정의합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::{User, ProfileChanges};
//!
//! let user = User::new_local("Ana Perez".to_string(), "ana@example.com", hashed_password);
//!
//! let changes = ProfileChanges {
//!     full_name: Some("Ana Maria Perez".to_string()),
//!     ..Default::default()
//! };
//! ```

pub mod user;

pub use user::{Gender, ProfileChanges, User};
