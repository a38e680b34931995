//! Vendor Handlers

pub(crate) mod admin_index;
pub(crate) mod create_profile;
pub(crate) mod dashboard;
pub(crate) mod delete;
pub(crate) mod delivery;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod products;
pub(crate) mod profile;
pub(crate) mod status;
pub(crate) mod update_profile;
pub(crate) mod verify;
