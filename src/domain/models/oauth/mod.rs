pub mod google_identity;

pub use google_identity::{GoogleIdentity, GoogleTokenInfo};
