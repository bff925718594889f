//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    CleanupResult, Clock, DeliveryHandle, Mailer, ManualClock, SystemClock, TokenHandle,
    VerificationCleanupService, VerificationEmail, VerificationService,
    VerificationServiceConfig, VerifiedEmail,
};
