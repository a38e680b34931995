//! Admin User Handlers

pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod role;
pub(crate) mod status;
pub(crate) mod update;
