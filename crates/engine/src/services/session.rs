//! Session state: login, registration, restore, and logout.
//!
//! There is no real auth backend. Login compares the candidate credentials
//! against a single reference record fetched from the catalog (plus a fixed
//! test password); registration simply trusts its form. Both persist the
//! resulting profile locally as the single current user.

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use cartwheel_core::{Email, EmailError, SessionFlags, User};

use crate::catalog::ReferenceUser;
use crate::storage::{JsonStore, StorageError, keys};

/// The fixed password accepted for the reference user.
pub const TEST_PASSWORD: &str = "test123";

/// Minimum password length accepted by the forms.
const MIN_PASSWORD_LENGTH: usize = 6;
/// Minimum full-name length accepted at registration.
const MIN_FULL_NAME_LENGTH: usize = 3;
/// Minimum address length accepted at registration.
const MIN_ADDRESS_LENGTH: usize = 5;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The candidate credentials do not match the reference record.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The candidate email is not structurally valid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The password does not meet the minimum requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// The registration password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// A non-credential form field failed validation.
    #[error("invalid {field}: {message}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable constraint description.
        message: String,
    },

    /// Persisting or reading session state failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Login form data.
#[derive(Debug, Clone)]
pub struct LoginForm {
    /// Candidate email address.
    pub email: String,
    /// Candidate password.
    pub password: String,
    /// Whether to stay signed in across restarts.
    pub remember_me: bool,
}

/// Registration form data.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    /// Display name, at least 3 characters.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Password, at least 6 characters.
    pub password: String,
    /// Must equal `password`.
    pub confirm_password: String,
    /// Postal address, at least 5 characters.
    pub address: String,
    /// Optional profile image URI.
    pub image_uri: Option<String>,
}

impl RegisterForm {
    /// Validate the form and return the parsed email.
    ///
    /// # Errors
    ///
    /// Returns the first failing constraint, mirroring the declarative form
    /// rules of the app's registration screen.
    fn validate(&self) -> Result<Email, AuthError> {
        if self.full_name.trim().len() < MIN_FULL_NAME_LENGTH {
            return Err(AuthError::InvalidField {
                field: "full name",
                message: format!("must be at least {MIN_FULL_NAME_LENGTH} characters"),
            });
        }

        let email = Email::parse(&self.email)?;
        validate_password(&self.password)?;

        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        if self.address.trim().len() < MIN_ADDRESS_LENGTH {
            return Err(AuthError::InvalidField {
                field: "address",
                message: format!("must be at least {MIN_ADDRESS_LENGTH} characters"),
            });
        }

        Ok(email)
    }
}

/// Gates access to the main application and holds the current user profile.
///
/// Two states: authenticated (a user record is held and the logged-in flag is
/// set) and unauthenticated. [`restore`](Self::restore) decides the initial
/// state at process start; [`login`](Self::login)/[`register`](Self::register)
/// and [`logout`](Self::logout) transition between them.
///
/// The service is the sole writer of the user and session-flag storage keys.
pub struct SessionService {
    store: JsonStore,
    user: Option<User>,
    flags: SessionFlags,
}

impl SessionService {
    /// Create a session service over `store`, initially unauthenticated.
    ///
    /// Call [`restore`](Self::restore) to pick up persisted session state.
    #[must_use]
    pub const fn new(store: JsonStore) -> Self {
        Self {
            store,
            user: None,
            flags: SessionFlags {
                is_logged_in: false,
                remember_me: false,
            },
        }
    }

    /// True if a user is currently authenticated.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.flags.is_logged_in && self.user.is_some()
    }

    /// The current user profile, if authenticated.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The current session flags.
    #[must_use]
    pub const fn flags(&self) -> SessionFlags {
        self.flags
    }

    /// Load persisted session state to decide initial routing.
    ///
    /// Absent or malformed values fall back to the unauthenticated state; no
    /// credentials are re-entered on restart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Read` if device storage cannot be read.
    pub async fn restore(&mut self) -> Result<(), StorageError> {
        self.user = self.store.get(keys::USER).await?;
        self.flags = SessionFlags {
            is_logged_in: self
                .store
                .get(keys::IS_LOGGED_IN)
                .await?
                .unwrap_or(false),
            remember_me: self.store.get(keys::REMEMBER_ME).await?.unwrap_or(false),
        };

        debug!(
            authenticated = self.is_authenticated(),
            "session state restored"
        );
        Ok(())
    }

    /// Attempt a login against the fetched reference record.
    ///
    /// On an exact match of email and the fixed test password, synthesizes a
    /// [`User`] from the reference record, persists it together with the
    /// session flags, and becomes authenticated.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on a mismatch; neither memory
    /// nor storage changes in that case. There is no lockout or retry
    /// counting.
    #[instrument(skip(self, reference, form))]
    pub async fn login(
        &mut self,
        reference: &ReferenceUser,
        form: &LoginForm,
    ) -> Result<&User, AuthError> {
        let email = Email::parse(&form.email)?;
        validate_password(&form.password)?;

        if email.as_str() != reference.email || form.password != TEST_PASSWORD {
            warn!("login rejected: credentials do not match the reference record");
            return Err(AuthError::InvalidCredentials);
        }

        let user = User {
            id: reference.id.to_string(),
            full_name: reference.full_name(),
            email,
            address: reference.postal_address(),
            image_uri: None,
            created_at: Utc::now(),
        };

        self.store.set(keys::USER, &user).await?;
        self.store.set(keys::IS_LOGGED_IN, &true).await?;
        self.store
            .set(keys::REMEMBER_ME, &form.remember_me)
            .await?;

        self.flags = SessionFlags {
            is_logged_in: true,
            remember_me: form.remember_me,
        };

        info!(user_id = %user.id, "login successful");
        Ok(self.user.insert(user))
    }

    /// Register a new user from the form.
    ///
    /// There is no uniqueness check - the new profile simply becomes the
    /// single current user, and the session becomes authenticated.
    ///
    /// # Errors
    ///
    /// Returns an `AuthError` describing the first failing form constraint,
    /// or a storage error if persisting fails.
    #[instrument(skip(self, form))]
    pub async fn register(&mut self, form: &RegisterForm) -> Result<&User, AuthError> {
        let email = form.validate()?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            full_name: form.full_name.trim().to_owned(),
            email,
            address: form.address.trim().to_owned(),
            image_uri: form.image_uri.clone(),
            created_at: Utc::now(),
        };

        self.store.set(keys::USER, &user).await?;
        self.store.set(keys::IS_LOGGED_IN, &true).await?;

        self.flags = SessionFlags {
            is_logged_in: true,
            remember_me: false,
        };

        info!(user_id = %user.id, "registration successful");
        Ok(self.user.insert(user))
    }

    /// Log out: remove the user record and session flags from storage.
    ///
    /// The caller is responsible for also clearing the cart (the cart is
    /// scoped to the session); [`crate::ShopApp::logout`] does both.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the keys cannot be removed.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) -> Result<(), StorageError> {
        self.store
            .remove_many(&[keys::USER, keys::IS_LOGGED_IN, keys::REMEMBER_ME])
            .await?;

        self.user = None;
        self.flags = SessionFlags::default();

        info!("logged out");
        Ok(())
    }
}

/// Validate a candidate password against the form's minimum length.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{ReferenceAddress, ReferenceName};

    fn reference_user() -> ReferenceUser {
        ReferenceUser {
            id: 1,
            email: "john@gmail.com".to_string(),
            name: ReferenceName {
                firstname: "john".to_string(),
                lastname: "doe".to_string(),
            },
            address: ReferenceAddress {
                street: "new road".to_string(),
                city: "kilcoole".to_string(),
            },
        }
    }

    fn login_form(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
            remember_me: true,
        }
    }

    fn register_form() -> RegisterForm {
        RegisterForm {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "hunter42".to_string(),
            confirm_password: "hunter42".to_string(),
            address: "7 Elm Street".to_string(),
            image_uri: None,
        }
    }

    async fn service() -> (tempfile::TempDir, JsonStore, SessionService) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).await.unwrap();
        let session = SessionService::new(store.clone());
        (dir, store, session)
    }

    #[tokio::test]
    async fn test_login_success_persists_state() {
        let (_dir, store, mut session) = service().await;

        let user = session
            .login(&reference_user(), &login_form("john@gmail.com", TEST_PASSWORD))
            .await
            .unwrap();
        assert_eq!(user.full_name, "john doe");
        assert_eq!(user.address, "new road, kilcoole");
        assert!(session.is_authenticated());
        assert!(session.flags().remember_me);

        // A fresh service restored from the same store is authenticated too.
        let mut restored = SessionService::new(store);
        restored.restore().await.unwrap();
        assert!(restored.is_authenticated());
        assert_eq!(restored.current_user().unwrap().id, "1");
    }

    #[tokio::test]
    async fn test_login_wrong_password_rejected() {
        let (_dir, store, mut session) = service().await;

        let err = session
            .login(&reference_user(), &login_form("john@gmail.com", "letmein"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(!session.is_authenticated());

        // Nothing was persisted.
        let logged_in: Option<bool> = store.get(keys::IS_LOGGED_IN).await.unwrap();
        assert_eq!(logged_in, None);
    }

    #[tokio::test]
    async fn test_login_wrong_email_rejected() {
        let (_dir, _store, mut session) = service().await;

        let err = session
            .login(&reference_user(), &login_form("mallory@example.com", TEST_PASSWORD))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_short_password_fails_validation() {
        let (_dir, _store, mut session) = service().await;

        let err = session
            .login(&reference_user(), &login_form("john@gmail.com", "abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword(_)));
    }

    #[tokio::test]
    async fn test_login_malformed_email_fails_validation() {
        let (_dir, _store, mut session) = service().await;

        let err = session
            .login(&reference_user(), &login_form("not-an-email", TEST_PASSWORD))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidEmail(_)));
    }

    #[tokio::test]
    async fn test_register_success() {
        let (_dir, store, mut session) = service().await;

        let user = session.register(&register_form()).await.unwrap();
        assert_eq!(user.full_name, "Jane Doe");
        assert!(session.is_authenticated());
        assert!(!session.flags().remember_me);

        let persisted: Option<User> = store.get(keys::USER).await.unwrap();
        assert_eq!(persisted.unwrap().full_name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_register_password_mismatch() {
        let (_dir, _store, mut session) = service().await;

        let mut form = register_form();
        form.confirm_password = "different".to_string();

        let err = session.register(&form).await.unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_short_name_rejected() {
        let (_dir, _store, mut session) = service().await;

        let mut form = register_form();
        form.full_name = "Jo".to_string();

        let err = session.register(&form).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidField { field: "full name", .. }));
    }

    #[tokio::test]
    async fn test_register_short_address_rejected() {
        let (_dir, _store, mut session) = service().await;

        let mut form = register_form();
        form.address = "n/a".to_string();

        let err = session.register(&form).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidField { field: "address", .. }));
    }

    #[tokio::test]
    async fn test_logout_removes_persisted_state() {
        let (_dir, store, mut session) = service().await;
        session.register(&register_form()).await.unwrap();

        session.logout().await.unwrap();
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());

        let user: Option<User> = store.get(keys::USER).await.unwrap();
        let logged_in: Option<bool> = store.get(keys::IS_LOGGED_IN).await.unwrap();
        assert_eq!(user, None);
        assert_eq!(logged_in, None);
    }

    #[tokio::test]
    async fn test_restore_defaults_to_unauthenticated() {
        let (_dir, _store, mut session) = service().await;
        session.restore().await.unwrap();
        assert!(!session.is_authenticated());
    }
}
