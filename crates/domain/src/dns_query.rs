use super::RecordType;
use std::ops::{BitOr, BitOrAssign};
use std::sync::Arc;

/// Response size class suitable for UDP (RFC 9715 safe payload).
pub const QUERY_MAX_RESPONSE_SIZE_UDP: u16 = 1232;

/// Response size class for stream transports. Also the DoH body ceiling.
pub const QUERY_MAX_RESPONSE_SIZE_TCP: u16 = 65535;

/// Query options carried through EDNS0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct QueryFlags(u8);

impl QueryFlags {
    /// Set the EDNS0 DO bit.
    pub const DNSSEC: QueryFlags = QueryFlags(1 << 0);

    /// Pad the query to a block length (RFC 8467), asking for padded responses.
    pub const BLOCK_LENGTH_PADDING: QueryFlags = QueryFlags(1 << 1);

    pub const fn empty() -> Self {
        QueryFlags(0)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn contains(&self, other: QueryFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for QueryFlags {
    type Output = QueryFlags;

    fn bitor(self, rhs: QueryFlags) -> QueryFlags {
        QueryFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for QueryFlags {
    fn bitor_assign(&mut self, rhs: QueryFlags) {
        self.0 |= rhs.0;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub flags: QueryFlags,
    pub id: u16,
    /// Largest response the client is willing to receive, advertised via EDNS0.
    pub max_size: u16,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
            flags: QueryFlags::empty(),
            id: fastrand::u16(..),
            max_size: QUERY_MAX_RESPONSE_SIZE_UDP,
        }
    }

    pub fn with_flags(mut self, flags: QueryFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn with_max_size(mut self, max_size: u16) -> Self {
        self.max_size = max_size;
        self
    }
}
