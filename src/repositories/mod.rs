//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 저장소는 trait 으로 정의되고, `main`에서 MongoDB 구현체를 만들어
//! `Arc<dyn ...>` 형태로 서비스와 검증 체인에 넘겨줍니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::repositories::{users::MongoUserRepository, UserStore};
//!
//! let users: Arc<dyn UserStore> = Arc::new(MongoUserRepository::new(&database));
//! let user = users.find_by_email("user@example.com").await?;
//! ```

pub mod users;
pub mod tokens;

#[cfg(test)]
pub mod memory;

pub use tokens::ResetTokenStore;
pub use users::UserStore;
