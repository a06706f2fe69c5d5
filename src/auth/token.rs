//! Issues and verifies the signed tokens that identify a logged-in account.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{
    Error,
    models::{Account, AccountId, Role},
};

/// How long an issued token stays valid.
pub const TOKEN_DURATION: Duration = Duration::days(7);

/// The contents of an auth token.
///
/// The token is the source of truth for the request's duration: the embedded
/// role is trusted without a database re-check, so a role change or account
/// removal only takes effect once outstanding tokens expire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// The ID of the account the token was issued to.
    pub sub: AccountId,
    /// The account's username at the time of issue.
    pub username: String,
    /// The account's role at the time of issue.
    pub role: Role,
    /// The time the token was issued, as a unix timestamp.
    pub iat: usize,
    /// The expiry time of the token, as a unix timestamp.
    pub exp: usize,
}

impl Claims {
    /// Check that the token holder has the admin role.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Forbidden] for any other role.
    pub fn require_admin(&self) -> Result<(), Error> {
        match self.role {
            Role::Admin => Ok(()),
            Role::User => Err(Error::Forbidden),
        }
    }
}

/// Issue a signed token for `account`, valid for [TOKEN_DURATION].
///
/// # Errors
///
/// Returns an [Error::TokenCreation] if signing fails.
pub fn encode_token(account: &Account, encoding_key: &EncodingKey) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        sub: account.id,
        username: account.username.clone(),
        role: account.role,
        iat: now.unix_timestamp() as usize,
        exp: (now + TOKEN_DURATION).unix_timestamp() as usize,
    };

    encode(&Header::default(), &claims, encoding_key)
        .map_err(|error| Error::TokenCreation(error.to_string()))
}

/// Verify `token` and return the identity embedded in it.
///
/// # Errors
///
/// Returns an [Error::InvalidToken] if the signature is invalid, the token is
/// malformed, or it has expired.
pub fn decode_token(token: &str, decoding_key: &DecodingKey) -> Result<Claims, Error> {
    decode::<Claims>(token, decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| Error::InvalidToken)
}

#[cfg(test)]
mod token_tests {
    use jsonwebtoken::{Header, encode};
    use time::{Duration, OffsetDateTime};

    use crate::{
        Error,
        auth::token::{Claims, decode_token, encode_token},
        models::{Account, AccountId, PasswordHash, Role},
        state::JwtKeys,
    };

    fn test_account() -> Account {
        Account {
            id: AccountId::new(7),
            username: "bendahara".to_string(),
            password_hash: PasswordHash::new_unchecked("notahash"),
            role: Role::Admin,
        }
    }

    #[test]
    fn decode_returns_the_identity_that_was_encoded() {
        let keys = JwtKeys::from_secret("42");
        let account = test_account();

        let token = encode_token(&account, &keys.encoding).unwrap();
        let claims = decode_token(&token, &keys.decoding).unwrap();

        assert_eq!(claims.sub, account.id);
        assert_eq!(claims.username, account.username);
        assert_eq!(claims.role, account.role);
    }

    #[test]
    fn decode_fails_with_the_wrong_secret() {
        let keys = JwtKeys::from_secret("42");
        let other_keys = JwtKeys::from_secret("not 42");

        let token = encode_token(&test_account(), &keys.encoding).unwrap();
        let result = decode_token(&token, &other_keys.decoding);

        assert_eq!(result, Err(Error::InvalidToken));
    }

    #[test]
    fn decode_fails_on_garbage() {
        let keys = JwtKeys::from_secret("42");

        assert_eq!(
            decode_token("definitely.not.ajwt", &keys.decoding),
            Err(Error::InvalidToken)
        );
    }

    #[test]
    fn decode_fails_on_expired_token() {
        let keys = JwtKeys::from_secret("42");
        let issued = OffsetDateTime::now_utc() - Duration::days(8);
        let claims = Claims {
            sub: AccountId::new(7),
            username: "bendahara".to_string(),
            role: Role::Admin,
            iat: issued.unix_timestamp() as usize,
            exp: (issued + Duration::days(7)).unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).unwrap();

        assert_eq!(
            decode_token(&token, &keys.decoding),
            Err(Error::InvalidToken)
        );
    }

    #[test]
    fn require_admin_rejects_regular_accounts() {
        let account = Account {
            role: Role::User,
            ..test_account()
        };
        let keys = JwtKeys::from_secret("42");
        let token = encode_token(&account, &keys.encoding).unwrap();
        let claims = decode_token(&token, &keys.decoding).unwrap();

        assert_eq!(claims.require_admin(), Err(Error::Forbidden));
    }
}
