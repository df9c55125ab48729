//! Account and API token service.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Number of random bytes in a raw token.
const TOKEN_BYTES: usize = 32;

/// Number of random bytes in a password salt.
const SALT_BYTES: usize = 16;

/// Token name recorded for tokens issued by register/login.
pub const SESSION_TOKEN_NAME: &str = "session";

/// A freshly issued token together with its owner.
///
/// The raw token is only available here; storage keeps its hash.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub user: User,
    pub token: String,
}

/// Service for registering users and authenticating API requests.
///
/// Passwords are hashed with Argon2. Tokens are hashed with HMAC-SHA256
/// (keyed by `signing_secret`) before storage and comparison, so read-only
/// database access is not enough to forge or verify a token.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenRepository>,
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// `signing_secret` must match the value used when existing tokens were issued.
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenRepository>,
        signing_secret: String,
    ) -> Self {
        Self {
            users,
            tokens,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    pub fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Creates an account and issues its first token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username is taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<IssuedToken, AppError> {
        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        let token = self.issue_token(user.id, SESSION_TOKEN_NAME).await?;
        Ok(IssuedToken { user, token })
    }

    /// Verifies credentials and issues a new token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown user or wrong password.
    /// Both cases produce the same error.
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AppError> {
        let invalid = || {
            AppError::unauthorized(
                "Invalid credentials",
                json!({ "reason": "Unknown username or wrong password" }),
            )
        };

        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &user.password_hash) {
            tracing::debug!(username, "Login rejected");
            return Err(invalid());
        }

        let token = self.issue_token(user.id, SESSION_TOKEN_NAME).await?;
        tracing::info!(user_id = user.id, "User logged in");
        Ok(IssuedToken { user, token })
    }

    /// Generates a random token for a user and stores its hash.
    ///
    /// Returns the raw token, which cannot be recovered later.
    pub async fn issue_token(&self, user_id: i64, name: &str) -> Result<String, AppError> {
        let token = generate_token();
        let token_hash = self.hash_token(&token);

        self.tokens.create_token(user_id, name, &token_hash).await?;

        Ok(token)
    }

    /// Authenticates a raw token and returns the owning user id.
    ///
    /// On success the token's `last_used_at` is refreshed; a failure there is
    /// logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked.
    pub async fn authenticate(&self, token: &str) -> Result<i64, AppError> {
        let token_hash = self.hash_token(token);

        let user_id = self
            .tokens
            .find_user_id(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Unauthorized", json!({"reason": "Invalid or revoked token"}))
            })?;

        if let Err(e) = self.tokens.update_last_used(&token_hash).await {
            tracing::warn!(error = %e, user_id, "Failed to update token last_used_at");
        }

        Ok(user_id)
    }

    /// Revokes the presented token.
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        let token_hash = self.hash_token(token);
        self.tokens.revoke_by_hash(&token_hash).await?;
        Ok(())
    }

    /// Finds a user by username.
    pub async fn find_user(&self, username: &str) -> Result<Option<User>, AppError> {
        self.users.find_by_username(username).await
    }

    /// Finds a user by id.
    pub async fn find_user_by_id(&self, user_id: i64) -> Result<Option<User>, AppError> {
        self.users.find_by_id(user_id).await
    }

    /// Lists all users.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }
}

/// Generates a URL-safe random token.
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Hashes a password into an Argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let mut salt_bytes = [0u8; SALT_BYTES];
    rand::rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| {
        tracing::error!(error = %e, "Salt encoding failed");
        AppError::internal("Password hashing failed", json!({}))
    })?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            AppError::internal("Password hashing failed", json!({}))
        })
}

/// Checks a password against a stored PHC string.
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockTokenRepository, MockUserRepository};
    use chrono::Utc;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn compute_expected_hash(token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(test_secret().as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn service(users: MockUserRepository, tokens: MockTokenRepository) -> AuthService {
        AuthService::new(Arc::new(users), Arc::new(tokens), test_secret())
    }

    fn test_user(password: &str) -> User {
        User {
            id: 7,
            username: "alice".to_string(),
            password_hash: hash_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_find_user_by_id() {
        let mut mock_users = MockUserRepository::new();
        let user = test_user("correct horse battery");
        let expected = user.clone();

        mock_users
            .expect_find_by_id()
            .withf(|id| *id == 7)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let svc = service(mock_users, MockTokenRepository::new());
        assert_eq!(svc.find_user_by_id(7).await.unwrap(), Some(expected));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut mock_tokens = MockTokenRepository::new();

        let token = "valid-token";
        let expected_hash = compute_expected_hash(token);

        mock_tokens
            .expect_find_user_id()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|_| Ok(Some(7)));

        mock_tokens
            .expect_update_last_used()
            .times(1)
            .returning(|_| Ok(()));

        let service = service(MockUserRepository::new(), mock_tokens);

        assert_eq!(service.authenticate(token).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut mock_tokens = MockTokenRepository::new();

        mock_tokens
            .expect_find_user_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(MockUserRepository::new(), mock_tokens);

        let result = service.authenticate("invalid-token").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_ignores_last_used_failure() {
        let mut mock_tokens = MockTokenRepository::new();
        mock_tokens
            .expect_find_user_id()
            .returning(|_| Ok(Some(3)));
        mock_tokens
            .expect_update_last_used()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = service(MockUserRepository::new(), mock_tokens);

        assert_eq!(service.authenticate("t").await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_login_success_issues_token() {
        let mut mock_users = MockUserRepository::new();
        let mut mock_tokens = MockTokenRepository::new();

        let user = test_user("correct horse");
        mock_users
            .expect_find_by_username()
            .withf(|name| name == "alice")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        mock_tokens
            .expect_create_token()
            .withf(|user_id, name, hash| {
                *user_id == 7 && name == SESSION_TOKEN_NAME && hash.len() == 64
            })
            .times(1)
            .returning(|user_id, name, hash| {
                Ok(crate::domain::repositories::ApiToken {
                    id: 1,
                    user_id,
                    name: name.to_string(),
                    token_hash: hash.to_string(),
                    created_at: Utc::now(),
                    last_used_at: None,
                    revoked_at: None,
                })
            });

        let service = service(mock_users, mock_tokens);

        let issued = service.login("alice", "correct horse").await.unwrap();

        assert_eq!(issued.user.id, 7);
        assert!(!issued.token.is_empty());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut mock_users = MockUserRepository::new();
        let mut mock_tokens = MockTokenRepository::new();

        let user = test_user("correct horse");
        mock_users
            .expect_find_by_username()
            .returning(move |_| Ok(Some(user.clone())));
        mock_tokens.expect_create_token().times(0);

        let service = service(mock_users, mock_tokens);

        let result = service.login("alice", "battery staple").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let mut mock_users = MockUserRepository::new();
        mock_users
            .expect_find_by_username()
            .returning(|_| Ok(None));

        let service = service(mock_users, MockTokenRepository::new());

        let result = service.login("nobody", "whatever1").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut mock_users = MockUserRepository::new();
        let mut mock_tokens = MockTokenRepository::new();

        mock_users
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Username already taken", json!({}))));
        mock_tokens.expect_create_token().times(0);

        let service = service(mock_users, mock_tokens);

        let result = service.register("alice", "password123").await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[test]
    fn test_hash_token_consistency() {
        let service = service(MockUserRepository::new(), MockTokenRepository::new());

        let hash1 = service.hash_token("test-token");
        let hash2 = service.hash_token("test-token");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
        assert_ne!(hash1, service.hash_token("other-token"));
    }

    #[test]
    fn test_hash_token_secret_matters() {
        let svc1 = AuthService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockTokenRepository::new()),
            "secret-a".to_string(),
        );
        let svc2 = AuthService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockTokenRepository::new()),
            "secret-b".to_string(),
        );

        assert_ne!(svc1.hash_token("token"), svc2.hash_token("token"));
    }

    #[test]
    fn test_generate_token_shape() {
        let a = generate_token();
        let b = generate_token();

        assert_ne!(a, b);
        // 32 bytes -> 43 base64 characters without padding
        assert_eq!(a.len(), 43);
        assert!(!a.contains('='));
    }

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("s3cret-pass").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret-pass", &hash));
        assert!(!verify_password("wrong-pass", &hash));
        assert!(!verify_password("s3cret-pass", "not-a-phc-string"));
    }
}
