//! Payment callback signature scheme.
//!
//! The processor signs `"{order_id}|{payment_id}"` with HMAC-SHA256 keyed by
//! the merchant secret and sends the lowercase hex digest. Verification
//! decodes the hex and compares in constant time via [`Mac::verify_slice`].

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Build the message the processor signs for a completed payment.
pub fn signature_payload(order_id: &str, payment_id: &str) -> String {
    format!("{order_id}|{payment_id}")
}

fn mac_for(secret: &str, order_id: &str, payment_id: &str) -> HmacSha256 {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(signature_payload(order_id, payment_id).as_bytes());
    mac
}

/// Compute the hex signature for an order/payment pair.
pub fn compute_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    hex::encode(mac_for(secret, order_id, payment_id).finalize().into_bytes())
}

/// Check a hex signature received from the processor.
///
/// Malformed hex is treated as a mismatch.
pub fn verify_signature(secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    let Ok(expected) = hex::decode(signature.trim()) else {
        return false;
    };
    mac_for(secret, order_id, payment_id)
        .verify_slice(&expected)
        .is_ok()
}
