pub mod token_store;
pub mod user_directory;

pub use token_store::TokenStore;
pub use user_directory::UserDirectory;

#[cfg(test)]
pub use token_store::MockTokenStore;
#[cfg(test)]
pub use user_directory::MockUserDirectory;
