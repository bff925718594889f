//! In-memory adapters
//!
//! Process-local stores for development setups without a database and for
//! integration tests. State is lost on restart.

pub mod token_store;
pub mod user_directory;

pub use token_store::InMemoryTokenStore;
pub use user_directory::InMemoryUserDirectory;
