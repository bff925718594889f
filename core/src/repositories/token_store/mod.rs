pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub use r#trait::{token_not_found, TokenStore};

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockTokenStore;
