//! App Router
//!
//! Routes that need a signed-in caller are pushed ahead of the public ones
//! so that a shared path such as `products/{product}` resolves `PUT` to the
//! guarded handler and `GET` to the public one. Literal segments are pushed
//! before `{param}` siblings.

use std::path::PathBuf;

use salvo::{Router, serve_static::StaticDir};

use crate::{
    auth::{self, roles},
    carts, dashboard, enquiries, orders, products, reviews, uploads, users, vendors,
};

/// Everything under `/api`.
pub(crate) fn api_router() -> Router {
    Router::with_path("api")
        .push(authenticated_router())
        .push(public_router())
}

/// Stored images, served read-only.
pub(crate) fn uploads_router(dir: PathBuf) -> Router {
    Router::with_path("uploads/{**file}").get(StaticDir::new([dir]))
}

fn public_router() -> Router {
    Router::new()
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::register::handler))
                .push(Router::with_path("login").post(auth::login::handler))
                .push(Router::with_path("refresh-token").post(auth::refresh::handler))
                .push(Router::with_path("create-admin").post(auth::create_admin::handler))
                .push(Router::with_path("admin-exists").get(auth::admin_exists::handler)),
        )
        .push(
            Router::with_path("vendors")
                .get(vendors::index::handler)
                .push(
                    Router::with_path("{vendor}")
                        .get(vendors::get::handler)
                        .push(Router::with_path("products").get(vendors::products::handler))
                        .push(Router::with_path("reviews").get(reviews::vendor::handler)),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("categories").get(products::categories::handler))
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .push(Router::with_path("related").get(products::related::handler))
                        .push(Router::with_path("reviews").get(reviews::product::handler)),
                ),
        )
        .push(
            Router::with_path("reviews")
                .push(Router::with_path("product/{product}").get(reviews::product::handler))
                .push(Router::with_path("vendor/{vendor}").get(reviews::vendor::handler))
                .push(Router::with_path("{review}").get(reviews::get::handler)),
        )
        .push(Router::with_path("enquiries").post(enquiries::create::handler))
}

fn authenticated_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("auth")
                .push(Router::with_path("logout").post(auth::logout::handler))
                .push(
                    Router::with_path("me")
                        .get(auth::me::handler)
                        .put(auth::update_me::handler),
                )
                .push(Router::with_path("change-password").post(auth::change_password::handler)),
        )
        .push(vendor_router())
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .push(Router::with_path("add").post(carts::add::handler))
                .push(Router::with_path("update/{product}").put(carts::update::handler))
                .push(Router::with_path("remove/{product}").delete(carts::remove::handler))
                .push(Router::with_path("clear").delete(carts::clear::handler)),
        )
        .push(
            Router::with_path("orders")
                .post(orders::checkout::handler)
                .push(Router::with_path("my").get(orders::mine::handler))
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .delete(orders::cancel::handler),
                ),
        )
        .push(
            Router::with_path("reviews")
                .post(reviews::create::handler)
                .push(Router::with_path("user/me").get(reviews::mine::handler))
                .push(
                    Router::with_path("{review}")
                        .put(reviews::update::handler)
                        .delete(reviews::delete::handler),
                ),
        )
        .push(
            Router::with_path("products/{product}/reviews")
                .post(reviews::create_for_product::handler),
        )
        .push(
            Router::with_path("upload")
                .hoop(roles::staff)
                .post(uploads::create::handler)
                .push(Router::with_path("multiple").post(uploads::create_many::handler))
                .push(Router::with_path("{id}").delete(uploads::delete::handler)),
        )
        .push(
            Router::with_path("enquiries")
                .hoop(roles::admin)
                .get(enquiries::index::handler)
                .push(
                    Router::with_path("{enquiry}")
                        .put(enquiries::status::handler)
                        .delete(enquiries::delete::handler),
                ),
        )
        .push(admin_router())
}

/// Routes for the vendor role.
fn vendor_router() -> Router {
    Router::new()
        .hoop(roles::vendor)
        .push(
            Router::with_path("vendors")
                .push(
                    Router::with_path("profile")
                        .get(vendors::profile::handler)
                        .post(vendors::create_profile::handler)
                        .put(vendors::update_profile::handler),
                )
                .push(Router::with_path("delivery-settings").put(vendors::delivery::handler))
                .push(Router::with_path("dashboard").get(vendors::dashboard::handler)),
        )
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(Router::with_path("vendor/me").get(products::mine::handler))
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .push(Router::with_path("vendor").get(orders::vendor_index::handler))
                .push(Router::with_path("{order}/status").put(orders::vendor_status::handler)),
        )
}

fn admin_router() -> Router {
    Router::with_path("admin")
        .hoop(roles::admin)
        .push(Router::with_path("dashboard/stats").get(dashboard::stats::handler))
        .push(
            Router::with_path("users").get(users::index::handler).push(
                Router::with_path("{user}")
                    .get(users::get::handler)
                    .put(users::update::handler)
                    .delete(users::delete::handler)
                    .push(Router::with_path("status").patch(users::status::handler))
                    .push(Router::with_path("role").patch(users::role::handler)),
            ),
        )
        .push(
            Router::with_path("vendors")
                .get(vendors::admin_index::handler)
                .push(
                    Router::with_path("{vendor}")
                        .delete(vendors::delete::handler)
                        .push(Router::with_path("verify").patch(vendors::verify::handler))
                        .push(Router::with_path("status").patch(vendors::status::handler)),
                ),
        )
        .push(
            Router::with_path("products")
                .get(products::admin_index::handler)
                .push(
                    Router::with_path("{product}")
                        .delete(products::remove::handler)
                        .push(Router::with_path("status").patch(products::status::handler)),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::admin_index::handler)
                .push(Router::with_path("{order}/status").patch(orders::admin_status::handler)),
        )
        .push(
            Router::with_path("reviews")
                .get(reviews::admin_index::handler)
                .push(Router::with_path("{review}/moderate").patch(reviews::moderate::handler)),
        )
}
