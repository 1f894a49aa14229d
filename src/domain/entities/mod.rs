//! # Domain Entities
//!
//! MongoDB 컬렉션에 그대로 저장되는 문서 모델입니다.
//!
//! | 엔티티 | 컬렉션 | 제약 |
//! |--------|--------|------|
//! | [`users::User`] | `users` | email unique, username sparse unique |
//! | [`tokens::PasswordResetToken`] | `password_reset_tokens` | `expires_at` TTL |

pub mod users;
pub mod tokens;
