//! 테스트용 메모리 저장소
//!
//! MongoDB 인덱스와 같은 규칙(이메일 unique, 사용자명 sparse unique,
//! 조건부 `used` 갱신)을 `Mutex<Vec<_>>` 위에서 흉내냅니다.

use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};

use crate::domain::entities::tokens::PasswordResetToken;
use crate::domain::entities::users::{ProfileChanges, User};
use crate::errors::{AppError, AppResult};
use crate::repositories::tokens::ResetTokenStore;
use crate::repositories::users::UserStore;
use crate::validation::rules::{MSG_EMAIL_REGISTERED, MSG_USERNAME_TAKEN};

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn get(&self, id: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id_string().as_deref() == Some(id))
            .cloned()
    }

    fn conflicts(users: &[User], candidate: &User) -> Option<AppError> {
        for other in users.iter().filter(|u| u.id != candidate.id) {
            if other.email == candidate.email {
                return Some(AppError::ConflictError(MSG_EMAIL_REGISTERED.to_string()));
            }
            if candidate.username.is_some() && other.username == candidate.username {
                return Some(AppError::ConflictError(MSG_USERNAME_TAKEN.to_string()));
            }
        }
        None
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username.as_deref() == Some(username))
            .cloned())
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        user.id = Some(ObjectId::new());

        if let Some(conflict) = Self::conflicts(&users, &user) {
            return Err(conflict);
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn apply_changes(&self, id: &str, changes: &ProfileChanges) -> AppResult<Option<User>> {
        let mut users = self.users.lock().unwrap();
        let Some(index) = users.iter().position(|u| u.id_string().as_deref() == Some(id)) else {
            return Ok(None);
        };

        let mut updated = users[index].clone();
        changes.apply_to(&mut updated, DateTime::now());

        if let Some(conflict) = Self::conflicts(&users, &updated) {
            return Err(conflict);
        }

        users[index] = updated.clone();
        Ok(Some(updated))
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> AppResult<bool> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id_string().as_deref() == Some(id)) {
            Some(user) => {
                user.password_hash = Some(password_hash.to_string());
                user.updated_at = DateTime::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct InMemoryResetTokenStore {
    tokens: Mutex<Vec<PasswordResetToken>>,
}

impl InMemoryResetTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<PasswordResetToken> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResetTokenStore for InMemoryResetTokenStore {
    async fn insert(&self, mut token: PasswordResetToken) -> AppResult<PasswordResetToken> {
        token.id = Some(ObjectId::new());
        self.tokens.lock().unwrap().push(token.clone());
        Ok(token)
    }

    async fn find_valid_by_hash(
        &self,
        token_hash: &str,
        now: DateTime,
    ) -> AppResult<Option<PasswordResetToken>> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token_hash == token_hash && t.is_valid_at(now))
            .cloned())
    }

    async fn mark_used(&self, token_id: &ObjectId) -> AppResult<bool> {
        let mut tokens = self.tokens.lock().unwrap();
        match tokens.iter_mut().find(|t| t.id.as_ref() == Some(token_id) && !t.used) {
            Some(token) => {
                token.used = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn invalidate_for_user(&self, user_id: &ObjectId, now: DateTime) -> AppResult<u64> {
        let mut tokens = self.tokens.lock().unwrap();
        let mut count = 0;
        for token in tokens
            .iter_mut()
            .filter(|t| &t.user_id == user_id && t.is_valid_at(now))
        {
            token.used = true;
            count += 1;
        }
        Ok(count)
    }
}

/// 이메일 조회는 항상 비어 있다고 답하고 저장은 unique 규칙을 지키는 저장소
///
/// 중복 확인과 저장 사이에 다른 요청이 같은 이메일을 먼저 저장한 상황을 재현합니다.
#[derive(Default)]
pub struct RacingUserStore {
    pub inner: InMemoryUserStore,
}

#[async_trait]
impl UserStore for RacingUserStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_email(&self, _email: &str) -> AppResult<Option<User>> {
        Ok(None)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.inner.find_by_username(username).await
    }

    async fn insert(&self, user: User) -> AppResult<User> {
        self.inner.insert(user).await
    }

    async fn apply_changes(&self, id: &str, changes: &ProfileChanges) -> AppResult<Option<User>> {
        self.inner.apply_changes(id, changes).await
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> AppResult<bool> {
        self.inner.update_password(id, password_hash).await
    }
}

/// 조회가 항상 실패하는 저장소 (저장소 장애 경로 검증용)
pub struct FailingUserStore;

#[async_trait]
impl UserStore for FailingUserStore {
    async fn find_by_id(&self, _id: &str) -> AppResult<Option<User>> {
        Err(AppError::DatabaseError("connection refused".to_string()))
    }

    async fn find_by_email(&self, _email: &str) -> AppResult<Option<User>> {
        Err(AppError::DatabaseError("connection refused".to_string()))
    }

    async fn find_by_username(&self, _username: &str) -> AppResult<Option<User>> {
        Err(AppError::DatabaseError("connection refused".to_string()))
    }

    async fn insert(&self, _user: User) -> AppResult<User> {
        Err(AppError::DatabaseError("connection refused".to_string()))
    }

    async fn apply_changes(&self, _id: &str, _changes: &ProfileChanges) -> AppResult<Option<User>> {
        Err(AppError::DatabaseError("connection refused".to_string()))
    }

    async fn update_password(&self, _id: &str, _password_hash: &str) -> AppResult<bool> {
        Err(AppError::DatabaseError("connection refused".to_string()))
    }
}
