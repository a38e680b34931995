//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use expresskart_app::{
    auth::{MockAuthService, Principal, SessionUuid},
    context::AppContext,
    domain::{
        carts::MockCartsService,
        dashboard::MockDashboardService,
        enquiries::MockEnquiriesService,
        orders::MockOrdersService,
        products::MockProductsService,
        reviews::MockReviewsService,
        users::{
            MockUsersService,
            records::{Role, UserUuid},
        },
        vendors::MockVendorsService,
    },
    uploads::MockUploadsService,
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(0x1));
pub(crate) const TEST_VENDOR_OWNER_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(0x2));
pub(crate) const TEST_ADMIN_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(0x3));
pub(crate) const TEST_SESSION_UUID: SessionUuid = SessionUuid::from_uuid(Uuid::from_u128(0x10));

/// The principal the test hoops inject for `role`.
pub(crate) fn principal(role: Role) -> Principal {
    let user_uuid = match role {
        Role::User => TEST_USER_UUID,
        Role::Vendor => TEST_VENDOR_OWNER_UUID,
        Role::Admin => TEST_ADMIN_UUID,
    };

    Principal {
        user_uuid,
        role,
        session_uuid: TEST_SESSION_UUID,
    }
}

/// Every service as a mock. Unconfigured mocks fail the test when called.
#[derive(Default)]
pub(crate) struct Mocks {
    pub auth: MockAuthService,
    pub users: MockUsersService,
    pub vendors: MockVendorsService,
    pub products: MockProductsService,
    pub carts: MockCartsService,
    pub orders: MockOrdersService,
    pub reviews: MockReviewsService,
    pub enquiries: MockEnquiriesService,
    pub dashboard: MockDashboardService,
    pub uploads: MockUploadsService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            auth: Arc::new(self.auth),
            users: Arc::new(self.users),
            vendors: Arc::new(self.vendors),
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            reviews: Arc::new(self.reviews),
            enquiries: Arc::new(self.enquiries),
            dashboard: Arc::new(self.dashboard),
            uploads: Arc::new(self.uploads),
        })
    }
}

struct InjectPrincipal(Principal);

#[salvo::handler]
impl InjectPrincipal {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_principal(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

/// A service for `route` with the caller signed in as `role`.
pub(crate) fn service_as(role: Role, mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(InjectPrincipal(principal(role)))
            .push(route),
    )
}

/// A service for `route` with no signed-in caller.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .push(route),
    )
}
