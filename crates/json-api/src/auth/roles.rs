//! Role guards.
//!
//! Mounted after the auth middleware. A principal without the required role
//! gets 403.

use salvo::prelude::*;

use expresskart_app::domain::users::records::Role;

use crate::extensions::*;

async fn require(
    allowed: &[Role],
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let principal = match depot.principal_or_401() {
        Ok(principal) => principal,
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    if !allowed.contains(&principal.role) {
        res.render(StatusError::forbidden().brief(format!(
            "User role {} is not authorized to access this route",
            principal.role
        )));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn vendor(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    require(&[Role::Vendor], req, depot, res, ctrl).await;
}

#[salvo::handler]
pub(crate) async fn admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    require(&[Role::Admin], req, depot, res, ctrl).await;
}

/// Vendors and admins, for uploads.
#[salvo::handler]
pub(crate) async fn staff(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    require(&[Role::Vendor, Role::Admin], req, depot, res, ctrl).await;
}
