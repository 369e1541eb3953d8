pub mod client;
pub mod list_shares;

pub use client::{Share, ShareClient, ShareListing, ShareRights, TcpShareClient};
pub use list_shares::{ListSharesInput, ListSharesModule};
