//! Offset-based pagination tokens
//!
//! A token is the decimal offset of the next page. Offsets are resolved
//! against the live ledger on every call, so a decision inserted between
//! two page fetches shifts later rows by one: a row can show up on two
//! adjacent pages or on neither. Callers that need a stable snapshot
//! should restart from the first page.

use crate::core::explore::ExploreError;

/// Decode a caller-supplied token into a store offset
///
/// An absent or empty token starts at zero. Anything else must be a
/// non-negative integer. Range is not checked; offsets past the end
/// simply produce empty pages.
pub fn decode_token(token: Option<&str>) -> Result<usize, ExploreError> {
    match token {
        None | Some("") => Ok(0),
        Some(raw) => {
            if !raw.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ExploreError::InvalidPaginationToken(raw.to_string()));
            }
            raw.parse::<usize>()
                .map_err(|_| ExploreError::InvalidPaginationToken(raw.to_string()))
        }
    }
}

/// Token for the page after `offset`, if the current page came back full
///
/// A short page means the listing is exhausted. A full page always gets a
/// token, even when it happened to hold the last rows; the following page
/// is then empty.
pub fn next_token(page_len: usize, offset: usize, page_size: usize) -> Option<String> {
    if page_size == 0 || page_len < page_size {
        return None;
    }
    offset.checked_add(page_size).map(|next| next.to_string())
}

/// Clamp a requested page size into `1..=max_page_size`
pub fn effective_page_size(requested: Option<usize>, max_page_size: usize) -> usize {
    let max_page_size = max_page_size.max(1);
    match requested {
        Some(size) if size > 0 => size.min(max_page_size),
        _ => max_page_size,
    }
}
