//! Upload Handlers

pub(crate) mod create;
pub(crate) mod create_many;
pub(crate) mod delete;
