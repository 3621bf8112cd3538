//! Query-string decoding for the delete path.
//!
//! Some clients percent-encode the dataset name before putting it into a URL
//! that is itself percent-encoded, so a space arrives as `%2520`. The router
//! strips one layer; [`decode_twice`] strips the remaining two.

use percent_encoding::percent_decode_str;

/// Percent-decode `raw` twice, replacing invalid UTF-8 sequences with U+FFFD.
///
/// Plain text passes through unchanged, so decoding an already-decoded name
/// is harmless unless the name itself contains a literal `%XX` sequence.
// TODO: drop the second pass once the web client stops double-encoding names.
pub fn decode_twice(raw: &str) -> String {
    let once = percent_decode_str(raw).decode_utf8_lossy();
    percent_decode_str(&once).decode_utf8_lossy().into_owned()
}
