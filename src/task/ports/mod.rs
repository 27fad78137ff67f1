//! Port contracts for the task store's external collaborators.
//!
//! Ports define infrastructure-agnostic interfaces: the remote task authority
//! that owns task data, and the credential provider that supplies the bearer
//! token attached to every authority call.

pub mod authority;
pub mod credentials;

pub use authority::{TaskAuthority, TaskAuthorityError, TaskAuthorityResult};
pub use credentials::{BearerToken, CredentialError, CredentialProvider};
