//! 비밀번호 해싱/검증 서비스
//!
//! bcrypt 를 사용합니다. cost 는 환경별 기본값([`PasswordConfig`])을 따르며
//! 테스트에서는 최소 cost 로 생성합니다.

use crate::config::PasswordConfig;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct PasswordService {
    cost: u32,
}

impl PasswordService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// `BCRYPT_COST` 또는 환경별 기본 cost
    pub fn from_env() -> Self {
        Self::new(PasswordConfig::bcrypt_cost())
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, password: &str) -> AppResult<String> {
        let start_time = std::time::Instant::now();

        let password_hash = bcrypt::hash(password, self.cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        log::debug!("Password hashing took: {:?}", start_time.elapsed());
        Ok(password_hash)
    }

    /// 평문이 해시와 일치하는지 확인합니다.
    ///
    /// 해시 문자열 자체가 손상된 경우는 불일치가 아니라 500 입니다.
    pub fn verify(&self, password: &str, password_hash: &str) -> AppResult<bool> {
        let start_time = std::time::Instant::now();

        let is_valid = bcrypt::verify(password, password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        log::debug!("Password verification took: {:?}", start_time.elapsed());
        Ok(is_valid)
    }
}
