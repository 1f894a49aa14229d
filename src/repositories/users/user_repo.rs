//! # 사용자 리포지토리 구현
//!
//! `users` 컬렉션에 대한 MongoDB 구현체입니다.
//!
//! ## 인덱스
//!
//! | 이름 | 키 | 옵션 |
//! |------|----|------|
//! | `email_unique` | `email` | unique |
//! | `username_unique` | `username` | unique, sparse |
//! | `created_at_desc` | `created_at` | - |
//!
//! 중복 여부는 서비스 계층에서 먼저 확인하지만, 확인과 쓰기 사이의 경쟁은
//! 인덱스가 최종적으로 막고 `ConflictError` 로 변환됩니다.

use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::db::Database;
use crate::domain::entities::users::{ProfileChanges, User};
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserStore;
use crate::validation::rules::{MSG_EMAIL_REGISTERED, MSG_USERNAME_TAKEN};

const COLLECTION: &str = "users";
const EMAIL_INDEX: &str = "email_unique";
const USERNAME_INDEX: &str = "username_unique";

/// 사용자 데이터 액세스 리포지토리
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.get_database().collection::<User>(COLLECTION),
        }
    }

    /// 컬렉션 인덱스를 생성합니다. 서버 시작 시 한 번 호출됩니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(EMAIL_INDEX.to_string())
                    .build(),
            )
            .build();

        // 사용자명을 설정하지 않은 문서는 인덱스에서 제외
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .sparse(true)
                    .name(USERNAME_INDEX.to_string())
                    .build(),
            )
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder().name("created_at_desc".to_string()).build())
            .build();

        self.collection
            .create_indexes([email_index, username_index, created_at_index])
            .await?;

        log::info!("✅ users 컬렉션 인덱스 준비 완료");
        Ok(())
    }
}

fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))
}

/// E11000 duplicate key 여부
pub(crate) fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}

fn conflict_from(error: &mongodb::error::Error) -> AppError {
    conflict_for_message(&error.to_string())
}

/// 충돌한 인덱스 이름으로 메시지를 고릅니다.
///
/// 서버 메시지 예: `E11000 duplicate key error collection: db.users index: username_unique dup key: {...}`
fn conflict_for_message(message: &str) -> AppError {
    if message.contains(&format!("index: {}", USERNAME_INDEX)) {
        AppError::ConflictError(MSG_USERNAME_TAKEN.to_string())
    } else {
        AppError::ConflictError(MSG_EMAIL_REGISTERED.to_string())
    }
}

#[async_trait]
impl UserStore for MongoUserRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let object_id = parse_object_id(id)?;

        Ok(self.collection.find_one(doc! { "_id": object_id }).await?)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "username": username }).await?)
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        let result = self.collection.insert_one(&user).await.map_err(|e| {
            if is_duplicate_key(&e) {
                conflict_from(&e)
            } else {
                AppError::DatabaseError(e.to_string())
            }
        })?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError("삽입된 문서의 ID를 확인할 수 없습니다".to_string())
        })?;
        user.id = Some(id);

        Ok(user)
    }

    async fn apply_changes(&self, id: &str, changes: &ProfileChanges) -> AppResult<Option<User>> {
        let object_id = parse_object_id(id)?;

        self.collection
            .find_one_and_update(
                doc! { "_id": object_id },
                changes.to_update_document(DateTime::now()),
            )
            .with_options(
                FindOneAndUpdateOptions::builder()
                    .return_document(ReturnDocument::After)
                    .build(),
            )
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    conflict_from(&e)
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> AppResult<bool> {
        let object_id = parse_object_id(id)?;

        let result = self
            .collection
            .update_one(
                doc! { "_id": object_id },
                doc! { "$set": { "password_hash": password_hash, "updated_at": DateTime::now() } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }
}
