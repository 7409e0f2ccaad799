//! Credential checks and token issuance.

use std::sync::Arc;

use roster_database::MemberRepository;
use tracing::{info, warn};

use super::repository::MemberRepo;
use crate::types::{AuthError, AuthResult};
use crate::utils::{Claims, IssuedToken, PasswordHasher, TokenIssuer, TokenSubject};

pub struct AuthenticationService<R = MemberRepository> {
    repository: R,
    hasher: Arc<PasswordHasher>,
    tokens: Arc<TokenIssuer>,
}

impl<R> AuthenticationService<R>
where
    R: MemberRepo,
{
    pub fn new(repository: R, hasher: Arc<PasswordHasher>, tokens: Arc<TokenIssuer>) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }

    /// Check an identifier/password pair and issue a bearer token.
    ///
    /// An unknown identifier still pays for one password verification against a decoy
    /// digest, so response time does not reveal which identifiers exist.
    pub async fn login(&self, identifier: i64, password: &str) -> AuthResult<IssuedToken> {
        let Some(member) = self.repository.find_by_identifier(identifier).await? else {
            self.hasher.verify_decoy_blocking(password).await;
            warn!(identifier, reason = "unknown identifier", "login rejected");
            return Err(AuthError::MemberNotFound);
        };

        if !self.hasher.verify_blocking(password, &member.password_hash).await {
            warn!(identifier, reason = "password mismatch", "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.tokens.issue(&TokenSubject {
            identifier: member.identifier,
            display_name: member.display_name,
        })?;

        info!(identifier, "member logged in");
        Ok(issued)
    }

    /// Verify a bearer token previously issued by [`Self::login`].
    pub fn authenticate(&self, token: &str) -> AuthResult<Claims> {
        Ok(self.tokens.verify(token)?)
    }
}
