//! MySQL implementations of the core storage contracts

pub mod token_store_impl;
pub mod user_directory_impl;

pub use token_store_impl::MySqlTokenStore;
pub use user_directory_impl::MySqlUserDirectory;
