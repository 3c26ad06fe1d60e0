/// Set of enabled TLS protocol versions. Empty means stack defaults.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ProtocolSet {
    pub(crate) bits: u8,
}
