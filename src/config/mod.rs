//! # Configuration Module
//!
//! 백엔드 서비스의 설정 관리를 담당하는 모듈입니다.
//! 모든 설정은 환경 변수에서 읽으며, `main`에서 `PROFILE`에 따라
//! `.env.dev` / `.env.prod` 파일을 먼저 로드합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버 바인딩, MongoDB, bcrypt cost
//! - [`auth_config`] - JWT, Google Sign-In, 인증 프로바이더
//! - [`mail_config`] - SMTP 발송 설정
//! - [`upload_config`] - 프로필 사진 저장 경로와 제한값
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # 저장소
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="account_service"
//!
//! # 인증
//! export JWT_SECRET="your-super-secret-key"
//! export GOOGLE_CLIENT_ID="your-client-id"
//!
//! # 메일 (없으면 콘솔 출력으로 대체)
//! export SMTP_SERVER="smtp.gmail.com"
//! export SMTP_PORT="587"
//! export SMTP_USERNAME="noreply@example.com"
//! export SMTP_PASSWORD="app-password"
//! export FROM_EMAIL="noreply@example.com"
//!
//! # 기타
//! export ENVIRONMENT="production"  # development, test, staging, production
//! export BCRYPT_COST="12"          # 4-15 범위
//! export RATE_LIMIT_PER_SECOND="20"
//! export RATE_LIMIT_BURST_SIZE="40"
//! ```

pub mod data_config;
pub mod auth_config;
pub mod mail_config;
pub mod upload_config;

pub use data_config::*;
pub use auth_config::*;
pub use mail_config::*;
pub use upload_config::*;
