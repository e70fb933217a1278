//! # Verification URL
//!
//! Builds the fixed-format lookup URL a third party scans to confirm an
//! invoice against the authority's own record. The URL embeds just enough
//! to identify the invoice (issuer, number, date, amount, hash prefix)
//! without transmitting its content.

use crate::domain::config::LedgerConfig;
use shared_types::{Hash, InvoiceDraft};

/// Hex characters of the content hash embedded in the URL.
const HASH_PREFIX_HEX_LEN: usize = 16;

/// Build the verification URL for a chained invoice.
///
/// Pure function of its inputs; identical inputs yield the identical URL.
pub fn build_verification_url(draft: &InvoiceDraft, content_hash: &Hash, config: &LedgerConfig) -> String {
    let mut hash_prefix = hex::encode(content_hash);
    hash_prefix.truncate(HASH_PREFIX_HEX_LEN);

    format!(
        "{}?nif={}&numserie={}&fecha={}&importe={}&huella={}&sw={}",
        config.verification_base_url.trim_end_matches('/'),
        encode_query_value(&draft.issuer.tax_id),
        encode_query_value(&draft.invoice_number),
        encode_query_value(&draft.issue_date),
        encode_query_value(&format!("{:.2}", draft.totals.total)),
        hash_prefix,
        encode_query_value(&config.software.id),
    )
}

/// Percent-encode a query value (RFC 3986 unreserved characters pass
/// through, everything else is `%XX`-escaped, byte-wise).
fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char);
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{byte:02X}"));
            }
        }
    }
    out
}
