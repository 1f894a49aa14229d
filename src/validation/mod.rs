//! 요청 검증 모듈
//!
//! 책임 연쇄(chain of responsibility) 방식의 검증 엔진과
//! 회원가입 / 프로필 수정용 체인 조립 함수를 제공합니다.
//!
//! 체인은 `main`에서 한 번 조립되어 서비스에 주입되며,
//! 요청마다 [`ValidationChain::run`]으로 실행됩니다.

pub mod chain;
pub mod profile;
pub mod registration;
pub mod rules;

pub use chain::{FieldMap, ValidationChain, Validator, Verdict};
pub use profile::{profile_chain, ProfileContext};
pub use registration::{registration_chain, Registration};
