//! 사용자 저장소
//!
//! 서비스와 검증 체인은 [`UserStore`] trait 에만 의존합니다.
//! 운영 환경에서는 [`MongoUserRepository`], 테스트에서는 메모리 구현을 주입합니다.

pub mod user_repo;

use async_trait::async_trait;

use crate::domain::entities::users::{ProfileChanges, User};
use crate::errors::AppResult;

pub use user_repo::MongoUserRepository;

/// 사용자 문서 저장소 계약
///
/// - 이메일은 호출자가 소문자로 정규화해서 넘깁니다.
/// - 이메일/사용자명 unique 제약 위반은 `AppError::ConflictError` 로 보고합니다.
/// - 형식이 잘못된 ID 는 `AppError::ValidationError` 입니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// 새 사용자를 저장하고 ID가 채워진 엔티티를 돌려줍니다.
    async fn insert(&self, user: User) -> AppResult<User>;

    /// 프로필 변경을 원자적으로 반영하고 갱신된 문서를 돌려줍니다.
    ///
    /// 사용자가 없으면 `Ok(None)`.
    async fn apply_changes(&self, id: &str, changes: &ProfileChanges) -> AppResult<Option<User>>;

    /// 비밀번호 해시 교체. 사용자가 없으면 `Ok(false)`.
    async fn update_password(&self, id: &str, password_hash: &str) -> AppResult<bool>;
}
