//! Webhook signature verification for Square callbacks.
//!
//! Square signs each webhook delivery with HMAC-SHA1 over the notification
//! URL concatenated with the raw request body, keyed by the per-environment
//! webhook signing secret. The signature travels base64-encoded in a
//! header:
//!
//! ```text
//! x-square-signature: base64(hmac_sha1(secret, url + body))
//! ```
//!
//! Verification recomputes the digest from the exact URL and body bytes the
//! host received; any mutation of either invalidates the signature.

use fast32::base64::RFC4648;
use ring::hmac;

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "x-square-signature";

fn digest(secret: &str, url: &str, body: &[u8]) -> hmac::Tag {
    let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, secret.as_bytes());
    let mut context = hmac::Context::with_key(&key);
    context.update(url.as_bytes());
    context.update(body);
    context.sign()
}

/// Compute the signature Square would send for `url` + `body`.
pub fn compute_signature(secret: &str, url: &str, body: &[u8]) -> String {
    RFC4648.encode(digest(secret, url, body).as_ref())
}

/// Verify a claimed webhook signature.
///
/// Returns `false` for an empty or non-base64 claim. The digest comparison
/// runs in constant time.
pub fn verify_signature(secret: &str, url: &str, body: &[u8], claimed: &str) -> bool {
    if claimed.is_empty() {
        return false;
    }
    let Ok(claimed) = RFC4648.decode_str(claimed) else {
        return false;
    };
    let expected = digest(secret, url, body);
    ring::constant_time::verify_slices_are_equal(expected.as_ref(), &claimed).is_ok()
}
