//! Order Handlers

pub(crate) mod admin_index;
pub(crate) mod admin_status;
pub(crate) mod cancel;
pub(crate) mod checkout;
pub(crate) mod get;
pub(crate) mod mine;
pub(crate) mod vendor_index;
pub(crate) mod vendor_status;
