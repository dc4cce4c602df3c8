//! HS256 signing and verification of token claims.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode,
};
use serde::{Serialize, de::DeserializeOwned};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Key pair derived from the shared secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn encode<T>(&self, body: &T) -> jsonwebtoken::errors::Result<String>
    where
        T: Serialize,
    {
        encode(&Header::new(ALGORITHM), body, &self.encoding)
    }

    /// Verifies signature, algorithm and expiry before returning the claims.
    pub fn decode<T>(&self, token: &str) -> jsonwebtoken::errors::Result<TokenData<T>>
    where
        T: DeserializeOwned,
    {
        decode(token, &self.decoding, &Validation::new(ALGORITHM))
    }
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JwtKeys(REDACTED)")
    }
}
