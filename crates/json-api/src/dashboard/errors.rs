//! Dashboard Errors

use salvo::http::StatusError;
use tracing::error;

use expresskart_app::domain::dashboard::DashboardServiceError;

pub(crate) fn into_status_error(error: DashboardServiceError) -> StatusError {
    match error {
        DashboardServiceError::Sql(source) => {
            error!("dashboard storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
