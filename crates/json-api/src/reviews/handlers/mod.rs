//! Review Handlers

pub(crate) mod admin_index;
pub(crate) mod create;
pub(crate) mod create_for_product;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod mine;
pub(crate) mod moderate;
pub(crate) mod product;
pub(crate) mod update;
pub(crate) mod vendor;
