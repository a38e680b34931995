//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, TokenSettings},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        dashboard::{DashboardService, PgDashboardService},
        enquiries::{EnquiriesService, PgEnquiriesService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        reviews::{PgReviewsService, ReviewsService},
        users::{PgUsersService, UsersService},
        vendors::{PgVendorsService, VendorsService},
    },
    uploads::{FsUploadsService, UploadSettings, UploadsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Settings needed to build an [`AppContext`].
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub max_connections: u32,
    pub tokens: TokenSettings,
    pub uploads: UploadSettings,
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UsersService>,
    pub vendors: Arc<dyn VendorsService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub enquiries: Arc<dyn EnquiriesService>,
    pub dashboard: Arc<dyn DashboardService>,
    pub uploads: Arc<dyn UploadsService>,
}

impl AppContext {
    /// Connect to the database and build every service on top of the pool.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_settings(settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(&settings.database_url, settings.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(
            &Db::new(pool),
            settings.tokens,
            settings.uploads,
        ))
    }

    #[must_use]
    pub fn from_db(db: &Db, tokens: TokenSettings, uploads: UploadSettings) -> Self {
        Self {
            auth: Arc::new(PgAuthService::new(db.clone(), tokens)),
            users: Arc::new(PgUsersService::new(db.clone())),
            vendors: Arc::new(PgVendorsService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            reviews: Arc::new(PgReviewsService::new(db.clone())),
            enquiries: Arc::new(PgEnquiriesService::new(db.clone())),
            dashboard: Arc::new(PgDashboardService::new(db.clone())),
            uploads: Arc::new(FsUploadsService::new(uploads)),
        }
    }
}
