//! # Draft Canonicalization
//!
//! Converts an invoice draft into a deterministic, order-stable byte
//! representation prior to hashing. Two semantically equal drafts always
//! canonicalize to identical bytes; any accepted byte stream corresponds
//! to exactly one draft (tagged, length-prefixed framing).
//!
//! Monetary amounts render with fixed precision so the encoding does not
//! depend on float formatting quirks upstream.

use crate::domain::errors::LedgerError;
use shared_types::InvoiceDraft;

/// Canonicalize a draft, validating it first.
///
/// Fails with [`LedgerError::MalformedDraft`] when required fields are
/// missing or the upstream-computed totals disagree with the line items
/// beyond `epsilon`. Totals are validated, never recomputed.
pub fn canonicalize(draft: &InvoiceDraft, epsilon: f64) -> Result<Vec<u8>, LedgerError> {
    validate(draft, epsilon)?;

    let mut buf = Vec::with_capacity(256);
    put_field(&mut buf, "invoice_id", draft.invoice_id.as_str());
    put_field(&mut buf, "invoice_number", &draft.invoice_number);
    put_field(&mut buf, "issuer_tax_id", &draft.issuer.tax_id);
    put_field(&mut buf, "issuer_name", &draft.issuer.name);
    match &draft.receiver {
        Some(receiver) => {
            put_field(&mut buf, "receiver_tax_id", &receiver.tax_id);
            put_field(&mut buf, "receiver_name", &receiver.name);
        }
        None => put_field(&mut buf, "receiver", ""),
    }
    put_field(&mut buf, "line_count", &draft.lines.len().to_string());
    for (index, line) in draft.lines.iter().enumerate() {
        let tag = format!("line_{index}");
        let value = format!(
            "{}|{}|{}|{}",
            line.description,
            format_quantity(line.quantity),
            format_amount(line.unit_price),
            format_rate(line.tax_rate),
        );
        put_field(&mut buf, &tag, &value);
    }
    put_field(&mut buf, "taxable_base", &format_amount(draft.totals.taxable_base));
    put_field(&mut buf, "tax_amount", &format_amount(draft.totals.tax_amount));
    put_field(&mut buf, "total", &format_amount(draft.totals.total));
    put_field(&mut buf, "issue_date", &draft.issue_date);
    put_field(&mut buf, "issued_at", &draft.issued_at.to_string());
    put_field(
        &mut buf,
        "external_reference",
        draft.external_reference.as_deref().unwrap_or(""),
    );

    Ok(buf)
}

/// Length-prefixed tag/value framing: `[tag_len u32 BE][tag][val_len u32 BE][val]`.
fn put_field(buf: &mut Vec<u8>, tag: &str, value: &str) {
    buf.extend_from_slice(&(tag.len() as u32).to_be_bytes());
    buf.extend_from_slice(tag.as_bytes());
    buf.extend_from_slice(&(value.len() as u32).to_be_bytes());
    buf.extend_from_slice(value.as_bytes());
}

/// Two decimals, negative zero normalized.
fn format_amount(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.2}")
}

/// Quantities carry up to four decimals (weights, fractions of units).
fn format_quantity(value: f64) -> String {
    format!("{value:.4}")
}

fn format_rate(value: f64) -> String {
    format!("{value:.2}")
}

fn validate(draft: &InvoiceDraft, epsilon: f64) -> Result<(), LedgerError> {
    let fail = |reason: &str| {
        Err(LedgerError::MalformedDraft {
            reason: reason.to_string(),
        })
    };

    if draft.invoice_id.as_str().is_empty() {
        return fail("invoice_id is empty");
    }
    if draft.invoice_number.is_empty() {
        return fail("invoice_number is empty");
    }
    if draft.issuer.tax_id.is_empty() {
        return fail("issuer tax_id is empty");
    }
    if !is_calendar_date(&draft.issue_date) {
        return fail("issue_date is not a YYYY-MM-DD date");
    }
    if draft.lines.is_empty() {
        return fail("invoice has no line items");
    }
    for (index, line) in draft.lines.iter().enumerate() {
        if line.description.is_empty() {
            return Err(LedgerError::MalformedDraft {
                reason: format!("line {index} has an empty description"),
            });
        }
        if !line.quantity.is_finite() || line.quantity <= 0.0 {
            return Err(LedgerError::MalformedDraft {
                reason: format!("line {index} has a non-positive quantity"),
            });
        }
        if !line.unit_price.is_finite() {
            return Err(LedgerError::MalformedDraft {
                reason: format!("line {index} has a non-finite unit price"),
            });
        }
        if !line.tax_rate.is_finite() || !(0.0..=100.0).contains(&line.tax_rate) {
            return Err(LedgerError::MalformedDraft {
                reason: format!("line {index} has a tax rate outside 0..=100"),
            });
        }
    }

    let totals = &draft.totals;
    if !totals.taxable_base.is_finite() || !totals.tax_amount.is_finite() || !totals.total.is_finite()
    {
        return fail("totals contain non-finite values");
    }

    let expected_base: f64 = draft.lines.iter().map(|l| l.base_amount()).sum();
    let expected_tax: f64 = draft.lines.iter().map(|l| l.tax_amount()).sum();
    if (totals.taxable_base - expected_base).abs() > epsilon {
        return Err(LedgerError::MalformedDraft {
            reason: format!(
                "taxable_base {} inconsistent with lines (expected {:.2})",
                format_amount(totals.taxable_base),
                expected_base
            ),
        });
    }
    if (totals.tax_amount - expected_tax).abs() > epsilon {
        return Err(LedgerError::MalformedDraft {
            reason: format!(
                "tax_amount {} inconsistent with lines (expected {:.2})",
                format_amount(totals.tax_amount),
                expected_tax
            ),
        });
    }
    if (totals.total - (totals.taxable_base + totals.tax_amount)).abs() > epsilon {
        return fail("total does not equal taxable_base + tax_amount");
    }

    Ok(())
}

/// Basic YYYY-MM-DD shape check; full calendar validation is upstream's
/// concern.
fn is_calendar_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit())
}
