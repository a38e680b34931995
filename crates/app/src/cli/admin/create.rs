use clap::Args;
use expresskart_app::{
    auth::{AuthService, AuthServiceError, NewAdmin, PgAuthService, TokenSettings},
    database::{self, Db},
};

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    /// Admin display name
    #[arg(long)]
    name: String,

    /// Admin login email
    #[arg(long)]
    email: String,

    /// Admin password
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    password: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url, 1)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(Db::new(pool), TokenSettings::default());

    let created = service
        .create_admin(NewAdmin {
            name: args.name,
            email: args.email,
            password: args.password,
        })
        .await
        .map_err(|error| match error {
            AuthServiceError::AdminExists => "an admin account already exists".to_string(),
            other => format!("failed to create admin: {other}"),
        })?;

    println!("admin_uuid: {}", created.user.uuid);
    println!("admin_email: {}", created.user.email);

    Ok(())
}
