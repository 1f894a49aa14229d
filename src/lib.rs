//! 계정 서비스 백엔드
//!
//! 이메일/비밀번호 가입과 로그인, Google 로그인, 메일 기반 비밀번호 재설정,
//! 프로필 조회/수정과 사진 업로드를 제공하는 Actix-web 서비스입니다.
//!
//! # Features
//!
//! - **검증 체인**: 가입/프로필 수정 요청을 순서가 고정된 검증기 목록으로 검사
//! - **JWT 인증**: HS256 세션 토큰 (기본 30일)
//! - **Google Sign-In**: ID 토큰을 tokeninfo 엔드포인트로 검증
//! - **비밀번호 재설정**: 해시로만 저장되는 1회용 토큰 (60분)
//! - **MongoDB**: 사용자와 재설정 토큰 저장
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + 인증 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, 감사 로그
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 + 검증 체인
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserStore / ResetTokenStore
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     MongoDB     │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! 서비스는 시작 시 한 번 생성되어 [`state::AppState`]를 통해
//! `web::Data`로 주입됩니다.

pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod validation;
pub mod services;
pub mod state;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;

#[cfg(test)]
pub mod testing;
