//! In-memory adapters for tests and local runs.

mod authority;
mod credentials;

pub use authority::{AuthorityOperation, InMemoryTaskAuthority};
pub use credentials::{FailingCredentialProvider, StaticCredentialProvider};
