//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    auth::{
        AuthServiceError, AuthenticatedUser, IssuedSession, NewAdmin, Principal, Registration,
        SessionUuid, TokenKind, TokenSecret, TokenSettings, format_token,
        passwords::{MIN_PASSWORD_LENGTH, hash_password, verify_password},
        parse_token,
        repository::{NewUserRow, PgAuthRepository, SessionHashes},
    },
    database::Db,
    domain::{
        optional, required,
        users::records::{Role, UserRecord, UserUuid},
    },
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
    settings: TokenSettings,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, settings: TokenSettings) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
            settings,
        }
    }

    /// Mint a fresh pair of secrets and their stored digests.
    fn mint(
        &self,
        session: SessionUuid,
    ) -> Result<(IssuedSession, SessionHashes), AuthServiceError> {
        let now = Timestamp::now();

        let access_expires_at = now
            .checked_add(self.settings.access_ttl)
            .map_err(AuthServiceError::Expiry)?;
        let refresh_expires_at = now
            .checked_add(self.settings.refresh_ttl)
            .map_err(AuthServiceError::Expiry)?;

        let access = TokenSecret::generate();
        let refresh = TokenSecret::generate();

        let issued = IssuedSession {
            session_uuid: session,
            access_token: format_token(TokenKind::Access, session.into_uuid(), &access),
            refresh_token: format_token(TokenKind::Refresh, session.into_uuid(), &refresh),
            access_expires_at,
            refresh_expires_at,
        };

        let hashes = SessionHashes {
            access_hash: access.digest(),
            refresh_hash: refresh.digest(),
            access_expires_at,
            refresh_expires_at,
        };

        Ok((issued, hashes))
    }

    async fn create_account(
        &self,
        name: &str,
        email: &str,
        password: &str,
        phone: Option<String>,
        role: Role,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let name = required(name).ok_or(AuthServiceError::Validation("name is required"))?;
        let email = normalise_email(email)?;
        let phone = optional(phone);

        check_password_strength(password)?;

        let password_hash = hash_password(password)?;

        let mut tx = self.db.begin().await?;

        if role == Role::Admin {
            self.repository.lock_admin_bootstrap(&mut tx).await?;

            if self.repository.admin_exists(&mut tx).await? {
                return Err(AuthServiceError::AdminExists);
            }
        }

        let user = self
            .repository
            .create_user(
                &mut tx,
                NewUserRow {
                    uuid: UserUuid::new(),
                    name: &name,
                    email: &email,
                    password_hash: &password_hash,
                    role,
                    phone: phone.as_deref(),
                },
            )
            .await?;

        let session_uuid = SessionUuid::new();
        let (session, hashes) = self.mint(session_uuid)?;

        self.repository
            .create_session(&mut tx, session_uuid, user.uuid, &hashes)
            .await?;

        tx.commit().await?;

        info!(user_uuid = %user.uuid, role = %user.role, "account created");

        Ok(AuthenticatedUser { user, session })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    #[tracing::instrument(name = "auth.register", skip_all, fields(role = %registration.role), err)]
    async fn register(
        &self,
        registration: Registration,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        if registration.role == Role::Admin {
            return Err(AuthServiceError::Validation(
                "admin accounts cannot self-register",
            ));
        }

        self.create_account(
            &registration.name,
            &registration.email,
            &registration.password,
            registration.phone,
            registration.role,
        )
        .await
    }

    #[tracing::instrument(name = "auth.login", skip_all, err)]
    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let email = email.trim().to_lowercase();

        let mut tx = self.db.begin().await?;

        let credentials = self
            .repository
            .find_credentials_by_email(&mut tx, &email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !verify_password(&credentials.password_hash, password)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        if !credentials.user.is_active {
            return Err(AuthServiceError::AccountDisabled);
        }

        let session_uuid = SessionUuid::new();
        let (session, hashes) = self.mint(session_uuid)?;

        self.repository
            .create_session(&mut tx, session_uuid, credentials.user.uuid, &hashes)
            .await?;

        tx.commit().await?;

        Ok(AuthenticatedUser {
            user: credentials.user,
            session,
        })
    }

    #[tracing::instrument(name = "auth.refresh", skip_all, err)]
    async fn refresh(&self, refresh_token: &str) -> Result<IssuedSession, AuthServiceError> {
        let parsed = parse_token(refresh_token).map_err(|_| AuthServiceError::InvalidToken)?;

        if parsed.kind != TokenKind::Refresh {
            return Err(AuthServiceError::InvalidToken);
        }

        let session_uuid = SessionUuid::from_uuid(parsed.session_uuid);
        let presented_hash = parsed.secret.digest();

        let mut tx = self.db.begin().await?;

        let session = self
            .repository
            .find_session(&mut tx, session_uuid)
            .await?
            .ok_or(AuthServiceError::InvalidToken)?;

        if session.revoked_at.is_some()
            || session.refresh_expires_at <= Timestamp::now()
            || session.refresh_hash != presented_hash
            || !session.user_is_active
        {
            return Err(AuthServiceError::InvalidToken);
        }

        let (issued, hashes) = self.mint(session_uuid)?;

        let rotated = self
            .repository
            .rotate_session(&mut tx, session_uuid, &presented_hash, &hashes)
            .await?;

        if rotated == 0 {
            return Err(AuthServiceError::InvalidToken);
        }

        tx.commit().await?;

        Ok(issued)
    }

    async fn logout(&self, session: SessionUuid) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.revoke_session(&mut tx, session).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        let parsed = parse_token(bearer_token).map_err(|_| AuthServiceError::InvalidToken)?;

        if parsed.kind != TokenKind::Access {
            return Err(AuthServiceError::InvalidToken);
        }

        let mut tx = self.db.begin().await?;

        let session = self
            .repository
            .find_session(&mut tx, SessionUuid::from_uuid(parsed.session_uuid))
            .await?
            .ok_or(AuthServiceError::InvalidToken)?;

        tx.commit().await?;

        if session.revoked_at.is_some()
            || session.access_expires_at <= Timestamp::now()
            || session.access_hash != parsed.secret.digest()
        {
            return Err(AuthServiceError::InvalidToken);
        }

        if !session.user_is_active {
            return Err(AuthServiceError::AccountDisabled);
        }

        Ok(Principal {
            user_uuid: session.user_uuid,
            role: session.role,
            session_uuid: session.uuid,
        })
    }

    #[tracing::instrument(
        name = "auth.change_password",
        skip_all,
        fields(user_uuid = %principal.user_uuid),
        err
    )]
    async fn change_password(
        &self,
        principal: Principal,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthServiceError> {
        check_password_strength(new_password)?;

        let mut tx = self.db.begin().await?;

        let credentials = self
            .repository
            .find_credentials_by_uuid(&mut tx, principal.user_uuid)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => AuthServiceError::InvalidToken,
                other => AuthServiceError::from(other),
            })?;

        if !verify_password(&credentials.password_hash, current_password)? {
            return Err(AuthServiceError::IncorrectPassword);
        }

        let password_hash = hash_password(new_password)?;

        self.repository
            .update_password_hash(&mut tx, principal.user_uuid, &password_hash)
            .await?;

        self.repository
            .revoke_other_sessions(&mut tx, principal.user_uuid, principal.session_uuid)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(name = "auth.create_admin", skip_all, err)]
    async fn create_admin(&self, admin: NewAdmin) -> Result<AuthenticatedUser, AuthServiceError> {
        self.create_account(
            &admin.name,
            &admin.email,
            &admin.password,
            None,
            Role::Admin,
        )
        .await
    }

    async fn admin_exists(&self) -> Result<bool, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let exists = self.repository.admin_exists(&mut tx).await?;

        tx.commit().await?;

        Ok(exists)
    }
}

fn normalise_email(email: &str) -> Result<String, AuthServiceError> {
    let email = email.trim().to_lowercase();

    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));

    if !valid {
        return Err(AuthServiceError::Validation("a valid email is required"));
    }

    Ok(email)
}

fn check_password_strength(password: &str) -> Result<(), AuthServiceError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthServiceError::Validation(
            "password must be at least 6 characters",
        ));
    }

    Ok(())
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a customer or vendor account and sign it in.
    async fn register(
        &self,
        registration: Registration,
    ) -> Result<AuthenticatedUser, AuthServiceError>;

    /// Exchange an email and password for a new session.
    async fn login(&self, email: &str, password: &str)
    -> Result<AuthenticatedUser, AuthServiceError>;

    /// Rotate a session using its refresh token.
    async fn refresh(&self, refresh_token: &str) -> Result<IssuedSession, AuthServiceError>;

    /// Revoke a session.
    async fn logout(&self, session: SessionUuid) -> Result<(), AuthServiceError>;

    /// Resolve an access token to the caller behind it.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError>;

    /// Change the caller's password and sign out their other sessions.
    async fn change_password(
        &self,
        principal: Principal,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthServiceError>;

    /// Create the first admin account.
    async fn create_admin(&self, admin: NewAdmin) -> Result<AuthenticatedUser, AuthServiceError>;

    /// Whether any admin account exists yet.
    async fn admin_exists(&self) -> Result<bool, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::users::UsersService, test::TestContext};

    use super::*;

    fn registration(email: &str) -> Registration {
        Registration {
            name: "Priya Shah".to_string(),
            email: email.to_string(),
            password: "correct-horse".to_string(),
            phone: Some("9876543210".to_string()),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn register_normalises_email_and_issues_session() -> TestResult {
        let ctx = TestContext::new().await;

        let registered = ctx
            .auth
            .register(registration("  Priya@Example.COM "))
            .await?;

        assert_eq!(registered.user.email, "priya@example.com");
        assert_eq!(registered.user.role, Role::User);
        assert!(registered.session.access_token.starts_with("eka_v1_"));
        assert!(registered.session.refresh_token.starts_with("ekr_v1_"));

        let principal = ctx
            .auth
            .authenticate_bearer(&registered.session.access_token)
            .await?;

        assert_eq!(principal.user_uuid, registered.user.uuid);
        assert_eq!(principal.role, Role::User);

        Ok(())
    }

    #[tokio::test]
    async fn register_duplicate_email_returns_email_taken() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth.register(registration("dup@example.com")).await?;

        let result = ctx.auth.register(registration("DUP@example.com")).await;

        assert!(
            matches!(result, Err(AuthServiceError::EmailTaken)),
            "expected EmailTaken, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_admin_role_and_short_password() {
        let ctx = TestContext::new().await;

        let mut admin = registration("admin@example.com");
        admin.role = Role::Admin;

        let mut short = registration("short@example.com");
        short.password = "12345".to_string();

        assert!(matches!(
            ctx.auth.register(admin).await,
            Err(AuthServiceError::Validation(_))
        ));
        assert!(matches!(
            ctx.auth.register(short).await,
            Err(AuthServiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_invalid_credentials() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth.register(registration("login@example.com")).await?;

        let wrong = ctx.auth.login("login@example.com", "nope-nope").await;
        let unknown = ctx.auth.login("ghost@example.com", "correct-horse").await;

        assert!(matches!(wrong, Err(AuthServiceError::InvalidCredentials)));
        assert!(matches!(unknown, Err(AuthServiceError::InvalidCredentials)));

        let ok = ctx.auth.login("LOGIN@example.com", "correct-horse").await?;

        assert_eq!(ok.user.email, "login@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn login_to_deactivated_account_is_refused() -> TestResult {
        let ctx = TestContext::new().await;

        let registered = ctx.auth.register(registration("off@example.com")).await?;

        ctx.users.set_active(registered.user.uuid, false).await?;

        let result = ctx.auth.login("off@example.com", "correct-horse").await;

        assert!(
            matches!(result, Err(AuthServiceError::AccountDisabled)),
            "expected AccountDisabled, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn refresh_rotates_tokens_and_old_ones_stop_working() -> TestResult {
        let ctx = TestContext::new().await;

        let registered = ctx.auth.register(registration("rotate@example.com")).await?;
        let old = registered.session;

        let fresh = ctx.auth.refresh(&old.refresh_token).await?;

        assert_eq!(fresh.session_uuid, old.session_uuid);
        assert_ne!(fresh.access_token, old.access_token);

        let replay = ctx.auth.refresh(&old.refresh_token).await;
        let stale_access = ctx.auth.authenticate_bearer(&old.access_token).await;

        assert!(matches!(replay, Err(AuthServiceError::InvalidToken)));
        assert!(matches!(stale_access, Err(AuthServiceError::InvalidToken)));

        ctx.auth.authenticate_bearer(&fresh.access_token).await?;

        Ok(())
    }

    #[tokio::test]
    async fn access_token_cannot_be_used_to_refresh() -> TestResult {
        let ctx = TestContext::new().await;

        let registered = ctx.auth.register(registration("kind@example.com")).await?;

        let result = ctx.auth.refresh(&registered.session.access_token).await;

        assert!(matches!(result, Err(AuthServiceError::InvalidToken)));

        Ok(())
    }

    #[tokio::test]
    async fn logout_revokes_the_session() -> TestResult {
        let ctx = TestContext::new().await;

        let registered = ctx.auth.register(registration("bye@example.com")).await?;

        ctx.auth.logout(registered.session.session_uuid).await?;

        let result = ctx
            .auth
            .authenticate_bearer(&registered.session.access_token)
            .await;

        assert!(matches!(result, Err(AuthServiceError::InvalidToken)));

        Ok(())
    }

    #[tokio::test]
    async fn change_password_checks_current_and_revokes_other_sessions() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.auth.register(registration("pw@example.com")).await?;
        let second = ctx.auth.login("pw@example.com", "correct-horse").await?;

        let principal = ctx
            .auth
            .authenticate_bearer(&first.session.access_token)
            .await?;

        let wrong = ctx
            .auth
            .change_password(principal, "not-it", "battery-staple")
            .await;

        assert!(matches!(wrong, Err(AuthServiceError::IncorrectPassword)));

        ctx.auth
            .change_password(principal, "correct-horse", "battery-staple")
            .await?;

        ctx.auth
            .authenticate_bearer(&first.session.access_token)
            .await?;

        let other = ctx
            .auth
            .authenticate_bearer(&second.session.access_token)
            .await;

        assert!(matches!(other, Err(AuthServiceError::InvalidToken)));

        ctx.auth.login("pw@example.com", "battery-staple").await?;

        Ok(())
    }

    #[tokio::test]
    async fn create_admin_only_once() -> TestResult {
        let ctx = TestContext::new().await;

        assert!(!ctx.auth.admin_exists().await?);

        let admin = ctx
            .auth
            .create_admin(NewAdmin {
                name: "Root".to_string(),
                email: "root@example.com".to_string(),
                password: "admin-pass".to_string(),
            })
            .await?;

        assert_eq!(admin.user.role, Role::Admin);
        assert!(ctx.auth.admin_exists().await?);

        let again = ctx
            .auth
            .create_admin(NewAdmin {
                name: "Second".to_string(),
                email: "second@example.com".to_string(),
                password: "admin-pass".to_string(),
            })
            .await;

        assert!(matches!(again, Err(AuthServiceError::AdminExists)));

        Ok(())
    }

    #[test]
    fn normalise_email_rejects_garbage() {
        assert!(normalise_email("not-an-email").is_err());
        assert!(normalise_email("@example.com").is_err());
        assert_eq!(
            normalise_email(" A@B.IN ").ok(),
            Some("a@b.in".to_string())
        );
    }
}
