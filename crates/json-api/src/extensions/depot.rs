//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use expresskart_app::{auth::Principal, domain::users::records::UserUuid};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the caller resolved by the auth middleware.
    fn insert_principal(&mut self, principal: Principal);

    fn principal_or_401(&self) -> Result<Principal, StatusError>;

    /// Shorthand for the caller's user uuid.
    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.principal_or_401().map(|principal| principal.user_uuid)
    }
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }

    fn principal_or_401(&self) -> Result<Principal, StatusError> {
        self.obtain::<Principal>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Not authorized"))
    }
}
