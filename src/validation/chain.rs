//! 검증 체인 엔진
//!
//! 검증기(`Validator`)는 요청 컨텍스트를 보고 [`Verdict`] 하나를 돌려줍니다.
//! 체인은 서버 시작 시 순서가 고정되며, 앞에서부터 하나씩 실행하다가
//! 처음 거부된 지점에서 멈춥니다. 모든 검증기가 통과하면 `Accepted` 입니다.
//!
//! ```text
//! ctx ─► [required] ─► [name] ─► [email] ─► ... ─► Accepted
//!            │            │
//!            └─ Rejected ─┴─► 첫 번째 거부가 최종 응답
//! ```
//!
//! 검증기는 읽기 전용 저장소 조회만 할 수 있고, 쓰기는 체인 통과 후
//! 호출자(서비스)가 수행합니다.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::{AppError, AppResult};

/// 검증 결과
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Accepted,
    /// 거부 사유. 상태 코드는 `AppError` 변형이 결정합니다.
    Rejected(AppError),
}

impl Verdict {
    /// 400 검증 실패
    pub fn reject(message: impl Into<String>) -> Self {
        Verdict::Rejected(AppError::ValidationError(message.into()))
    }

    pub fn from_result(result: AppResult<()>) -> Self {
        match result {
            Ok(()) => Verdict::Accepted,
            Err(error) => Verdict::Rejected(error),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn into_result(self) -> AppResult<()> {
        match self {
            Verdict::Accepted => Ok(()),
            Verdict::Rejected(error) => Err(error),
        }
    }
}

/// 체인의 한 고리
#[async_trait]
pub trait Validator<C: Sync>: Send + Sync {
    /// 로그용 이름
    fn name(&self) -> &'static str;

    async fn check(&self, ctx: &C) -> Verdict;
}

/// 순서가 고정된 검증기 목록
pub struct ValidationChain<C> {
    links: Vec<Box<dyn Validator<C>>>,
}

impl<C: Sync> Default for ValidationChain<C> {
    fn default() -> Self {
        Self { links: Vec::new() }
    }
}

impl<C: Sync> ValidationChain<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 체인 끝에 검증기를 붙입니다.
    pub fn link(mut self, validator: impl Validator<C> + 'static) -> Self {
        self.links.push(Box::new(validator));
        self
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.links.iter().map(|link| link.name()).collect()
    }

    /// 순서대로 실행하고 첫 번째 거부에서 멈춥니다.
    pub async fn run(&self, ctx: &C) -> Verdict {
        for link in &self.links {
            if let Verdict::Rejected(error) = link.check(ctx).await {
                log::debug!("검증 거부 [{}]: {}", link.name(), error);
                return Verdict::Rejected(error);
            }
        }
        Verdict::Accepted
    }
}

/// 요청 본문을 평평한 필드 맵으로 다루는 래퍼
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap(Map<String, Value>);

impl FieldMap {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// 문자열 값. 키가 없거나 문자열이 아니면 `None`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// 공백 제거 후 비어 있지 않은 문자열
    pub fn non_blank(&self, key: &str) -> Option<&str> {
        self.text(key).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for FieldMap {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
