use std::time::Duration;
use std::time::Instant;

use async_trait::async_trait;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::jwk::Jwk;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::sync::RwLock;

use crate::domain::user::errors::IdentityError;
use crate::domain::user::models::VerifiedIdentity;
use crate::domain::user::ports::IdentityVerifier;

/// Issuers Google uses in ID tokens.
pub const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Default minimum gap between two key fetches.
pub const DEFAULT_MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Claims read from a Google ID token.
#[derive(Debug, Deserialize)]
struct GoogleClaims {
    sub: String,
    email: Option<String>,
    email_verified: Option<EmailVerified>,
    name: Option<String>,
    picture: Option<String>,
}

/// Google has sent `email_verified` both as a boolean and as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmailVerified {
    Flag(bool),
    Text(String),
}

impl EmailVerified {
    fn is_verified(&self) -> bool {
        match self {
            EmailVerified::Flag(flag) => *flag,
            EmailVerified::Text(text) => text.eq_ignore_ascii_case("true"),
        }
    }
}

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
}

/// Verifies Google ID tokens against Google's published signing keys.
///
/// Keys are cached for `cache_ttl`. A token signed with a key id that is not
/// in the cache triggers a refresh, which covers Google rotating its keys.
/// Fetches are serialized and at most one happens per `min_refresh_interval`,
/// so tokens with made-up key ids cannot drive traffic to Google. When a
/// refresh fails, a stale cached key is still used.
pub struct GoogleIdentityVerifier {
    client: reqwest::Client,
    client_id: String,
    jwks_url: String,
    cache_ttl: Duration,
    min_refresh_interval: Duration,
    cache: RwLock<Option<CachedKeys>>,
    /// Time of the last fetch attempt; held while fetching
    last_fetch: Mutex<Option<Instant>>,
}

impl GoogleIdentityVerifier {
    /// Create a verifier for tokens issued to `client_id`.
    ///
    /// # Arguments
    /// * `client_id` - OAuth client id the tokens must be issued for
    /// * `jwks_url` - Location of the provider's JSON Web Key Set
    /// * `cache_ttl` - How long fetched keys are reused
    /// * `http_timeout` - Timeout for each key fetch
    ///
    /// # Errors
    /// * `Upstream` - HTTP client could not be built
    pub fn new(
        client_id: impl Into<String>,
        jwks_url: impl Into<String>,
        cache_ttl: Duration,
        http_timeout: Duration,
    ) -> Result<Self, IdentityError> {
        let client = reqwest::Client::builder()
            .timeout(http_timeout)
            .build()
            .map_err(|e| IdentityError::Upstream(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            client_id: client_id.into(),
            jwks_url: jwks_url.into(),
            cache_ttl,
            min_refresh_interval: DEFAULT_MIN_REFRESH_INTERVAL,
            cache: RwLock::new(None),
            last_fetch: Mutex::new(None),
        })
    }

    /// Override the minimum gap between two key fetches.
    pub fn with_min_refresh_interval(mut self, interval: Duration) -> Self {
        self.min_refresh_interval = interval;
        self
    }

    async fn fetch_keys(&self) -> Result<JwkSet, IdentityError> {
        tracing::debug!(url = %self.jwks_url, "Fetching identity provider keys");

        self.client
            .get(&self.jwks_url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| IdentityError::Upstream(format!("Key fetch failed: {}", e)))?
            .json::<JwkSet>()
            .await
            .map_err(|e| IdentityError::Upstream(format!("Key set unreadable: {}", e)))
    }

    /// Key for `kid` from the cache. Stale entries are returned only when
    /// `allow_stale` is set.
    async fn cached_key(&self, kid: &str, allow_stale: bool) -> Option<Jwk> {
        let cache = self.cache.read().await;
        let cached = cache.as_ref()?;

        if !allow_stale && cached.fetched_at.elapsed() >= self.cache_ttl {
            return None;
        }
        cached.keys.find(kid).cloned()
    }

    /// Decoding key for `kid`, refreshing the key set when stale or when the
    /// key id is unknown.
    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, IdentityError> {
        if let Some(jwk) = self.cached_key(kid, false).await {
            return to_decoding_key(&jwk);
        }

        let mut last_fetch = self.last_fetch.lock().await;

        // Another request may have refreshed while this one waited
        if let Some(jwk) = self.cached_key(kid, false).await {
            return to_decoding_key(&jwk);
        }

        let stale = self.cached_key(kid, true).await;

        if last_fetch.is_some_and(|at| at.elapsed() < self.min_refresh_interval) {
            if let Some(jwk) = stale {
                return to_decoding_key(&jwk);
            }
            if self.cache.read().await.is_none() {
                return Err(IdentityError::Upstream(
                    "Signing keys unavailable, last fetch failed".to_string(),
                ));
            }

            tracing::debug!(kid = %kid, "Unknown signing key, refresh rate limited");
            return Err(IdentityError::InvalidToken(format!(
                "Unknown signing key: {}",
                kid
            )));
        }

        *last_fetch = Some(Instant::now());

        let keys = match self.fetch_keys().await {
            Ok(keys) => keys,
            Err(e) => {
                return match stale {
                    Some(jwk) => {
                        tracing::warn!(error = %e, "Key refresh failed, using cached key");
                        to_decoding_key(&jwk)
                    }
                    None => Err(e),
                };
            }
        };

        let key = keys
            .find(kid)
            .ok_or_else(|| IdentityError::InvalidToken(format!("Unknown signing key: {}", kid)))
            .and_then(to_decoding_key);

        *self.cache.write().await = Some(CachedKeys {
            keys,
            fetched_at: Instant::now(),
        });

        key
    }
}

fn to_decoding_key(jwk: &Jwk) -> Result<DecodingKey, IdentityError> {
    DecodingKey::from_jwk(jwk).map_err(|e| IdentityError::InvalidToken(e.to_string()))
}

#[async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity, IdentityError> {
        let header =
            decode_header(id_token).map_err(|e| IdentityError::InvalidToken(e.to_string()))?;

        if header.alg != Algorithm::RS256 {
            return Err(IdentityError::InvalidToken(format!(
                "Unexpected algorithm: {:?}",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| IdentityError::InvalidToken("Missing key id".to_string()))?;

        let key = self.decoding_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.client_id.as_str()]);
        validation.set_issuer(&GOOGLE_ISSUERS);
        validation.set_required_spec_claims(&["exp", "aud", "iss", "sub"]);

        let claims = decode::<GoogleClaims>(id_token, &key, &validation)
            .map_err(|e| IdentityError::InvalidToken(e.to_string()))?
            .claims;

        if claims
            .email_verified
            .as_ref()
            .is_some_and(|verified| !verified.is_verified())
        {
            return Err(IdentityError::InvalidToken(
                "Email address is not verified".to_string(),
            ));
        }

        let email = claims
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| IdentityError::InvalidToken("Missing email claim".to_string()))?;

        Ok(VerifiedIdentity {
            subject: claims.sub,
            email,
            name: claims.name,
            picture: claims.picture,
        })
    }
}
