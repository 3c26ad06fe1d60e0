use std::ops::Range;

/// A delimiter-bound PEM block and where it sits in the source file.
#[derive(Debug)]
pub struct PemBlock {
    pub range: Range<usize>,
    pub item: rustls_pemfile::Item,
}
