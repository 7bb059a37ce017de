//! Export request contract tests
//!
//! These tests pin the shape of the `options` object per export kind and
//! format, as produced from the panel's form.
