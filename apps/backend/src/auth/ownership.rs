//! Owner-only write authorization.
//!
//! Reads are open to any authenticated caller. Update and delete go through
//! [`authorize`] with the owner id loaded inside the same transaction as the
//! mutation.

use crate::auth::error::AuthError;

/// A stored resource with exactly one owner.
pub trait Owned {
    type OwnerId: PartialEq;

    fn owner_id(&self) -> Option<&Self::OwnerId>;
}

/// Allow only when both ids are present and equal.
pub fn authorize<T>(caller: Option<&T>, owner: Option<&T>) -> Result<(), AuthError>
where
    T: PartialEq + ?Sized,
{
    match (caller, owner) {
        (Some(caller), Some(owner)) if caller == owner => Ok(()),
        _ => Err(AuthError::PermissionDenied),
    }
}

pub fn ensure_owner<R: Owned>(caller: &R::OwnerId, resource: &R) -> Result<(), AuthError> {
    authorize(Some(caller), resource.owner_id())
}
