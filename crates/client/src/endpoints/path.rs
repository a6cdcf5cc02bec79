//! Path segment encoding for resource names interpolated into API URLs.
//!
//! Model, explore and connection names are user-controlled; a `/` or `?` in
//! one must not change which endpoint is hit.

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encode one URL path segment.
pub fn encode_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), SEGMENT).to_string()
}
