//! SNMP version enumeration.

/// SNMP protocol version spoken by the session's engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum Version {
    /// SNMPv1 (RFC 1157). No GETBULK.
    V1,
    /// SNMPv2c (RFC 1901)
    #[default]
    V2c,
    /// SNMPv3 (RFC 3411-3418)
    V3,
}

impl Version {
    /// Whether GETBULK is available.
    ///
    /// Walks fall back to one GETNEXT per round when it is not.
    pub const fn supports_bulk(self) -> bool {
        !matches!(self, Version::V1)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Version::V1 => write!(f, "SNMPv1"),
            Version::V2c => write!(f, "SNMPv2c"),
            Version::V3 => write!(f, "SNMPv3"),
        }
    }
}
