//! `password_reset_tokens` 컬렉션 MongoDB 구현

use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    options::IndexOptions,
    Collection, IndexModel,
};
use std::time::Duration;

use crate::db::Database;
use crate::domain::entities::tokens::PasswordResetToken;
use crate::errors::{AppError, AppResult};
use crate::repositories::tokens::ResetTokenStore;

const COLLECTION: &str = "password_reset_tokens";

#[derive(Clone)]
pub struct MongoResetTokenRepository {
    collection: Collection<PasswordResetToken>,
}

impl MongoResetTokenRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database
                .get_database()
                .collection::<PasswordResetToken>(COLLECTION),
        }
    }

    /// TTL 인덱스(`expires_at`, 0초)와 조회용 인덱스를 생성합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let ttl_index = IndexModel::builder()
            .keys(doc! { "expires_at": 1 })
            .options(
                IndexOptions::builder()
                    .expire_after(Duration::from_secs(0))
                    .name("expires_at_ttl".to_string())
                    .build(),
            )
            .build();

        let hash_index = IndexModel::builder()
            .keys(doc! { "token_hash": 1 })
            .options(IndexOptions::builder().name("token_hash_idx".to_string()).build())
            .build();

        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "used": 1 })
            .options(IndexOptions::builder().name("user_used_idx".to_string()).build())
            .build();

        self.collection
            .create_indexes([ttl_index, hash_index, user_index])
            .await?;

        log::info!("✅ password_reset_tokens 컬렉션 인덱스 준비 완료");
        Ok(())
    }
}

#[async_trait]
impl ResetTokenStore for MongoResetTokenRepository {
    async fn insert(&self, mut token: PasswordResetToken) -> AppResult<PasswordResetToken> {
        let result = self.collection.insert_one(&token).await?;

        token.id = Some(result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError("삽입된 토큰의 ID를 확인할 수 없습니다".to_string())
        })?);

        Ok(token)
    }

    async fn find_valid_by_hash(
        &self,
        token_hash: &str,
        now: DateTime,
    ) -> AppResult<Option<PasswordResetToken>> {
        let token = self
            .collection
            .find_one(doc! {
                "token_hash": token_hash,
                "used": false,
                "expires_at": { "$gt": now },
            })
            .await?;

        Ok(token)
    }

    async fn mark_used(&self, token_id: &ObjectId) -> AppResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": *token_id, "used": false },
                doc! { "$set": { "used": true } },
            )
            .await?;

        Ok(result.modified_count == 1)
    }

    async fn invalidate_for_user(&self, user_id: &ObjectId, now: DateTime) -> AppResult<u64> {
        let result = self
            .collection
            .update_many(
                doc! {
                    "user_id": *user_id,
                    "used": false,
                    "expires_at": { "$gt": now },
                },
                doc! { "$set": { "used": true } },
            )
            .await?;

        Ok(result.modified_count)
    }
}
