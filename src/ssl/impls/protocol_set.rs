use crate::ssl::enums::tls_protocol::TlsProtocol;
use crate::ssl::structs::protocol_set::ProtocolSet;
use std::ops::{BitOr, BitOrAssign};

impl ProtocolSet {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub fn insert(&mut self, protocol: TlsProtocol) {
        self.bits |= protocol.bit();
    }

    pub fn contains(&self, protocol: TlsProtocol) -> bool {
        self.bits & protocol.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = TlsProtocol> + '_ {
        TlsProtocol::ALL.into_iter().filter(move |protocol| self.contains(*protocol))
    }
}

impl From<TlsProtocol> for ProtocolSet {
    fn from(protocol: TlsProtocol) -> Self {
        Self { bits: protocol.bit() }
    }
}

impl BitOr for ProtocolSet {
    type Output = ProtocolSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self { bits: self.bits | rhs.bits }
    }
}

impl BitOr<TlsProtocol> for ProtocolSet {
    type Output = ProtocolSet;

    fn bitor(self, rhs: TlsProtocol) -> Self::Output {
        Self { bits: self.bits | rhs.bit() }
    }
}

impl BitOrAssign<TlsProtocol> for ProtocolSet {
    fn bitor_assign(&mut self, rhs: TlsProtocol) {
        self.insert(rhs);
    }
}

impl FromIterator<TlsProtocol> for ProtocolSet {
    fn from_iter<T: IntoIterator<Item = TlsProtocol>>(iter: T) -> Self {
        iter.into_iter().fold(ProtocolSet::empty(), |set, protocol| set | protocol)
    }
}

impl std::fmt::Debug for ProtocolSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
