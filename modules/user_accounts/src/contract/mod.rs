pub mod client;
pub mod error;
pub mod model;

pub use client::UserAccountsApi;
pub use error::UserAccountsError;
pub use model::{ClientAddr, Credentials, NewAccount, ProfileUpdate, Registration, UserAccount};
