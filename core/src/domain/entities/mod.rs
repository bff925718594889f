//! Domain entities representing core business objects.

pub mod user;
pub mod verification_token;

// Re-export commonly used types
pub use user::User;
pub use verification_token::{
    generate_token, NewVerificationToken, VerificationToken, TOKEN_BYTES, TOKEN_LENGTH,
};
