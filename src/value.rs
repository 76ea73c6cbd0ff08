//! SNMP value types.
//!
//! The `Value` enum represents all SNMP data types including exceptions.
//! [`ValueType`] is the protocol type tag reported alongside a value.

use bytes::Bytes;

/// SNMP value.
///
/// Represents all SNMP data types including SMIv2 types and exception values.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Value {
    /// INTEGER (ASN.1 primitive, signed 32-bit)
    Integer(i32),

    /// OCTET STRING (arbitrary bytes).
    OctetString(Bytes),

    /// NULL
    Null,

    /// OBJECT IDENTIFIER, rendered the way the engine rendered it
    /// (symbolic or dotted-numeric, depending on the request mode).
    ObjectIdentifier(String),

    /// IpAddress (4 bytes, big-endian)
    IpAddress([u8; 4]),

    /// Counter32 (unsigned 32-bit, wrapping)
    Counter32(u32),

    /// Gauge32 / Unsigned32 (unsigned 32-bit, non-wrapping)
    Gauge32(u32),

    /// TimeTicks (hundredths of seconds since epoch)
    TimeTicks(u32),

    /// Opaque (legacy, arbitrary bytes)
    Opaque(Bytes),

    /// Counter64 (unsigned 64-bit, wrapping). SNMPv2c/v3 only.
    Counter64(u64),

    /// noSuchObject exception - the object type is not implemented by the agent.
    NoSuchObject,

    /// noSuchInstance exception - the object exists but this instance does not.
    NoSuchInstance,

    /// endOfMibView exception - nothing lexicographically follows the request.
    ///
    /// This is the normal termination signal for GETNEXT/GETBULK traversal.
    EndOfMibView,
}

impl Value {
    /// Try to get as i32.
    ///
    /// Returns `Some(i32)` for [`Value::Integer`], `None` otherwise.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u32.
    ///
    /// Returns `Some(u32)` for [`Value::Counter32`], [`Value::Gauge32`],
    /// [`Value::TimeTicks`], or non-negative [`Value::Integer`].
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => Some(*v),
            Value::Integer(v) if *v >= 0 => Some(*v as u32),
            _ => None,
        }
    }

    /// Try to get as u64.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Counter64(v) => Some(*v),
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => Some(*v as u64),
            Value::Integer(v) if *v >= 0 => Some(*v as u64),
            _ => None,
        }
    }

    /// Try to get as bytes.
    ///
    /// Returns `Some(&[u8])` for [`Value::OctetString`] or [`Value::Opaque`].
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::OctetString(v) | Value::Opaque(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as a UTF-8 string.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Try to get as an IPv4 address.
    pub fn as_ip(&self) -> Option<std::net::Ipv4Addr> {
        match self {
            Value::IpAddress(addr) => Some(std::net::Ipv4Addr::from(*addr)),
            _ => None,
        }
    }

    /// Check if this is an exception value (NoSuchObject, NoSuchInstance,
    /// EndOfMibView).
    pub fn is_exception(&self) -> bool {
        matches!(
            self,
            Value::NoSuchObject | Value::NoSuchInstance | Value::EndOfMibView
        )
    }

    /// The protocol type tag of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Integer(_) => ValueType::Integer,
            Value::OctetString(_) => ValueType::OctetString,
            Value::Null => ValueType::Null,
            Value::ObjectIdentifier(_) => ValueType::ObjectIdentifier,
            Value::IpAddress(_) => ValueType::IpAddress,
            Value::Counter32(_) => ValueType::Counter32,
            Value::Gauge32(_) => ValueType::Gauge32,
            Value::TimeTicks(_) => ValueType::TimeTicks,
            Value::Opaque(_) => ValueType::Opaque,
            Value::Counter64(_) => ValueType::Counter64,
            Value::NoSuchObject => ValueType::NoSuchObject,
            Value::NoSuchInstance => ValueType::NoSuchInstance,
            Value::EndOfMibView => ValueType::EndOfMibView,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::OctetString(data) => {
                // Try to display as string if it's valid UTF-8
                if let Ok(s) = std::str::from_utf8(data) {
                    write!(f, "{}", s)
                } else {
                    write!(f, "0x")?;
                    data.iter().try_for_each(|b| write!(f, "{:02x}", b))
                }
            }
            Value::Null => write!(f, "NULL"),
            Value::ObjectIdentifier(oid) => write!(f, "{}", oid),
            Value::IpAddress(addr) => {
                write!(f, "{}.{}.{}.{}", addr[0], addr[1], addr[2], addr[3])
            }
            Value::Counter32(v) => write!(f, "{}", v),
            Value::Gauge32(v) => write!(f, "{}", v),
            Value::TimeTicks(v) => write!(f, "{}", v),
            Value::Opaque(data) => {
                write!(f, "Opaque(0x")?;
                data.iter().try_for_each(|b| write!(f, "{:02x}", b))?;
                write!(f, ")")
            }
            Value::Counter64(v) => write!(f, "{}", v),
            Value::NoSuchObject => write!(f, "noSuchObject"),
            Value::NoSuchInstance => write!(f, "noSuchInstance"),
            Value::EndOfMibView => write!(f, "endOfMibView"),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::OctetString(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::OctetString(Bytes::from(s))
    }
}

impl From<&[u8]> for Value {
    fn from(data: &[u8]) -> Self {
        Value::OctetString(Bytes::copy_from_slice(data))
    }
}

impl From<Bytes> for Value {
    fn from(data: Bytes) -> Self {
        Value::OctetString(data)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Counter64(v)
    }
}

impl From<std::net::Ipv4Addr> for Value {
    fn from(addr: std::net::Ipv4Addr) -> Self {
        Value::IpAddress(addr.octets())
    }
}

impl From<[u8; 4]> for Value {
    fn from(addr: [u8; 4]) -> Self {
        Value::IpAddress(addr)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Integer(v) => serializer.serialize_i32(*v),
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => {
                serializer.serialize_u32(*v)
            }
            Value::Counter64(v) => serializer.serialize_u64(*v),
            Value::Null => serializer.serialize_unit(),
            other => serializer.collect_str(other),
        }
    }
}

/// Protocol type tag of a value, named the way net-snmp style engines
/// report it (`INTEGER`, `OCTETSTR`, `NOSUCHOBJECT`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[non_exhaustive]
pub enum ValueType {
    Integer,
    OctetString,
    Null,
    ObjectIdentifier,
    IpAddress,
    Counter32,
    Gauge32,
    TimeTicks,
    Opaque,
    Counter64,
    NoSuchObject,
    NoSuchInstance,
    EndOfMibView,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Integer => "INTEGER",
            Self::OctetString => "OCTETSTR",
            Self::Null => "NULL",
            Self::ObjectIdentifier => "OBJECTID",
            Self::IpAddress => "IPADDR",
            Self::Counter32 => "COUNTER",
            Self::Gauge32 => "GAUGE",
            Self::TimeTicks => "TICKS",
            Self::Opaque => "OPAQUE",
            Self::Counter64 => "COUNTER64",
            Self::NoSuchObject => "NOSUCHOBJECT",
            Self::NoSuchInstance => "NOSUCHINSTANCE",
            Self::EndOfMibView => "ENDOFMIBVIEW",
        };
        f.write_str(name)
    }
}
