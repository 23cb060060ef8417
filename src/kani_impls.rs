//! Kani Arbitrary implementations and proof harnesses for the URI character
//! classes.
//!
//! # Usage
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::{UriContext, is_pchar, is_unreserved};

impl kani::Arbitrary for UriContext {
    fn any() -> Self {
        if kani::any() {
            Self::PathSegment
        } else {
            Self::QueryParameter
        }
    }
}

/// Generate any printable ASCII character
fn arbitrary_ascii_char() -> char {
    let byte: u8 = kani::any();
    kani::assume((0x20..0x7f).contains(&byte));
    char::from(byte)
}

/// Proof: `=` and `&` are never allowed unescaped in a query value
#[kani::proof]
fn proof_query_rejects_pair_delimiters() {
    assert!(!UriContext::QueryParameter.is_allowed('='));
    assert!(!UriContext::QueryParameter.is_allowed('&'));
}

/// Proof: every `pchar` except the pair delimiters is allowed in both contexts
#[kani::proof]
fn proof_pchar_allowed_in_both_contexts() {
    let c = arbitrary_ascii_char();
    kani::assume(is_pchar(c) && c != '=' && c != '&');
    assert!(UriContext::PathSegment.is_allowed(c));
    assert!(UriContext::QueryParameter.is_allowed(c));
}

/// Proof: `/` separates segments, so only the query context allows it
#[kani::proof]
fn proof_slash_only_in_query() {
    assert!(!UriContext::PathSegment.is_allowed('/'));
    assert!(UriContext::QueryParameter.is_allowed('/'));
}

/// Proof: encoding a character always yields text the context allows
#[kani::proof]
#[kani::unwind(8)]
fn proof_encode_output_is_allowed() {
    let context: UriContext = kani::any();
    let c = arbitrary_ascii_char();
    let input = c.to_string();
    let encoded = context.encode(&input);
    assert!(context.is_allowed_str(&encoded));
}

/// Proof: unreserved characters pass through encoding unchanged
#[kani::proof]
#[kani::unwind(8)]
fn proof_unreserved_is_not_escaped() {
    let context: UriContext = kani::any();
    let c = arbitrary_ascii_char();
    kani::assume(is_unreserved(c));
    let input = c.to_string();
    assert_eq!(context.encode(&input), input.as_str());
}
