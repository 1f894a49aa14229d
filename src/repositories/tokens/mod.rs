//! 비밀번호 재설정 토큰 저장소

pub mod reset_token_repo;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};

use crate::domain::entities::tokens::PasswordResetToken;
use crate::errors::AppResult;

pub use reset_token_repo::MongoResetTokenRepository;

/// 재설정 토큰 저장소 계약
///
/// 만료된 문서의 물리 삭제는 저장소(TTL 인덱스)의 몫이므로 여기에는 없습니다.
#[async_trait]
pub trait ResetTokenStore: Send + Sync {
    async fn insert(&self, token: PasswordResetToken) -> AppResult<PasswordResetToken>;

    /// `now` 시점에 유효한(`used == false`, 미만료) 토큰을 해시로 찾습니다.
    async fn find_valid_by_hash(
        &self,
        token_hash: &str,
        now: DateTime,
    ) -> AppResult<Option<PasswordResetToken>>;

    /// `used == false` 인 경우에만 `used = true` 로 바꿉니다.
    ///
    /// 실제로 바꿨으면 `true`, 이미 사용된 토큰이면 `false`.
    async fn mark_used(&self, token_id: &ObjectId) -> AppResult<bool>;

    /// 사용자의 유효한 토큰을 모두 `used = true` 로 바꾸고 개수를 돌려줍니다.
    async fn invalidate_for_user(&self, user_id: &ObjectId, now: DateTime) -> AppResult<u64>;
}
