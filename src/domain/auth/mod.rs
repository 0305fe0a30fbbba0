//! Auth-adapter record types.

mod records;

pub use records::{Account, AccountKey, NewUser, Session, UserPatch, VerificationToken};
