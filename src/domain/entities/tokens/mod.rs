pub mod password_reset_token;

pub use password_reset_token::{PasswordResetToken, ResetTokenState, RESET_TOKEN_TTL_MS};
