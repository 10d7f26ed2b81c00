//! OAuth 1.0a request signing (HMAC-SHA1).
//!
//! Only what the X API needs for user-context requests with a JSON body: the
//! body is not part of the signature base string, query parameters would be.

use crate::config::XCredentials;
use crate::errors::PublishError;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::collections::BTreeMap;

type HmacSha1 = Hmac<Sha1>;

/// Percent-encodes per RFC 3986 (unreserved characters are kept).
fn encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Computes the `oauth_signature` value.
///
/// `params` holds every oauth_* parameter (except the signature itself) and any
/// query or form parameters of the request, unencoded.
pub fn signature(
    method: &str,
    url: &str,
    params: &BTreeMap<String, String>,
    consumer_secret: &str,
    token_secret: &str,
) -> Result<String, PublishError> {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .collect();
    encoded.sort();

    let parameter_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let base_string = format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(url),
        encode(&parameter_string)
    );
    let signing_key = format!("{}&{}", encode(consumer_secret), encode(token_secret));

    let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes())
        .map_err(|e| PublishError::Signing(e.to_string()))?;
    mac.update(base_string.as_bytes());
    let digest = mac.finalize().into_bytes();

    Ok(base64::engine::general_purpose::STANDARD.encode(digest))
}

/// Builds the `Authorization` header value for a request.
///
/// `nonce` and `timestamp` are taken as arguments so callers control them.
pub fn authorization_header(
    credentials: &XCredentials,
    method: &str,
    url: &str,
    nonce: &str,
    timestamp: i64,
) -> Result<String, PublishError> {
    let mut params = BTreeMap::new();
    params.insert("oauth_consumer_key".to_string(), credentials.api_key.clone());
    params.insert("oauth_nonce".to_string(), nonce.to_string());
    params.insert("oauth_signature_method".to_string(), "HMAC-SHA1".to_string());
    params.insert("oauth_timestamp".to_string(), timestamp.to_string());
    params.insert("oauth_token".to_string(), credentials.access_token.clone());
    params.insert("oauth_version".to_string(), "1.0".to_string());

    let signature = signature(
        method,
        url,
        &params,
        &credentials.api_secret,
        &credentials.access_secret,
    )?;
    params.insert("oauth_signature".to_string(), signature);

    let fields = params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!("OAuth {}", fields))
}
