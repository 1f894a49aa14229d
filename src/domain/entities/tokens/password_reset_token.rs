//! 비밀번호 재설정 토큰 엔티티
//!
//! 평문 비밀값은 이메일로만 전달되고, 저장소에는 SHA-256 해시만 남습니다.
//!
//! ```text
//!   발급 ──► ISSUED ──(재설정 성공)──► used = true
//!              │  └──(새 토큰 발급)──► used = true
//!              └──(1시간 경과)──► EXPIRED ──► TTL 인덱스가 삭제
//! ```

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 토큰 유효 기간 (1시간)
pub const RESET_TOKEN_TTL_MS: i64 = 60 * 60 * 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetToken {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    /// 비밀값의 SHA-256 (소문자 hex)
    pub token_hash: String,
    pub expires_at: DateTime,
    pub used: bool,
    pub created_at: DateTime,
}

/// 특정 시점에서 본 토큰 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetTokenState {
    Issued,
    Used,
    Expired,
}

impl PasswordResetToken {
    pub fn issue(user_id: ObjectId, token_hash: String, now: DateTime) -> Self {
        Self {
            id: None,
            user_id,
            token_hash,
            expires_at: DateTime::from_millis(now.timestamp_millis() + RESET_TOKEN_TTL_MS),
            used: false,
            created_at: now,
        }
    }

    pub fn state_at(&self, now: DateTime) -> ResetTokenState {
        if self.used {
            ResetTokenState::Used
        } else if now >= self.expires_at {
            ResetTokenState::Expired
        } else {
            ResetTokenState::Issued
        }
    }

    /// `used == false AND now < expires_at`
    pub fn is_valid_at(&self, now: DateTime) -> bool {
        self.state_at(now) == ResetTokenState::Issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_expires_in_one_hour() {
        let now = DateTime::now();
        let token = PasswordResetToken::issue(ObjectId::new(), "abc".to_string(), now);

        assert!(!token.used);
        assert_eq!(
            token.expires_at.timestamp_millis() - now.timestamp_millis(),
            RESET_TOKEN_TTL_MS
        );
        assert_eq!(token.state_at(now), ResetTokenState::Issued);
    }

    #[test]
    fn test_state_transitions() {
        let now = DateTime::now();
        let mut token = PasswordResetToken::issue(ObjectId::new(), "abc".to_string(), now);

        let later = DateTime::from_millis(now.timestamp_millis() + RESET_TOKEN_TTL_MS);
        assert_eq!(token.state_at(later), ResetTokenState::Expired);
        assert!(!token.is_valid_at(later));

        token.used = true;
        assert_eq!(token.state_at(now), ResetTokenState::Used);
        assert!(!token.is_valid_at(now));
    }
}
