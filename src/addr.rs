use std::error::Error;
use std::fmt;
use std::net::Ipv4Addr;
use std::num::ParseIntError;
use std::ops::{BitAnd, BitOr, BitXor};
use std::str::FromStr;

use crate::bit_manip::bytes_to_binary;


/// An IPv4 address.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ipv4Address {
    addr_value: u32,
}

pub const IPV4_ZERO: Ipv4Address = Ipv4Address { addr_value: 0 };
pub const IPV4_BROADCAST: Ipv4Address = Ipv4Address { addr_value: 0xFFFF_FFFF };

/// The legacy address class, determined by the leading bits of the address.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AddressClass {
    /// Leading bit `0`.
    A,
    /// Leading bits `10`.
    B,
    /// Leading bits `110`.
    C,
    /// Leading bits `1110` (multicast).
    D,
    /// Leading bits `1111` (reserved).
    E,
}
impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressClass::A => write!(f, "Class A"),
            AddressClass::B => write!(f, "Class B"),
            AddressClass::C => write!(f, "Class C"),
            AddressClass::D => write!(f, "Class D (multicast)"),
            AddressClass::E => write!(f, "Class E (reserved)"),
        }
    }
}

/// The kind of address space an address belongs to.
///
/// When ranges overlap, the earlier variant wins (a loopback address is never reported as
/// reserved).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AddressKind {
    Loopback,
    Private,
    Multicast,
    Reserved,
    LinkLocal,
    Public,
}
impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressKind::Loopback => write!(f, "loopback"),
            AddressKind::Private => write!(f, "private"),
            AddressKind::Multicast => write!(f, "multicast"),
            AddressKind::Reserved => write!(f, "reserved"),
            AddressKind::LinkLocal => write!(f, "link-local"),
            AddressKind::Public => write!(f, "public"),
        }
    }
}

impl Ipv4Address {
    /// Constructs a new IPv4 address from its 32-bit representation, where the leftmost byte in the
    /// canonical string representation is the most significant byte (i.e. `"1.2.3.4"` ->
    /// `0x01020304`).
    pub const fn new(
        addr_value: u32,
    ) -> Ipv4Address {
        Ipv4Address {
            addr_value,
        }
    }

    /// Returns the 32-bit representation of this address.
    pub const fn value(&self) -> u32 { self.addr_value }

    pub fn count_ones(&self) -> u32 { self.addr_value.count_ones() }
    pub fn count_zeros(&self) -> u32 { self.addr_value.count_zeros() }
    pub fn leading_ones(&self) -> u32 { self.addr_value.leading_ones() }
    pub fn trailing_zeros(&self) -> u32 { self.addr_value.trailing_zeros() }

    /// Serializes this IP address into its canonical byte-sequence representation.
    pub fn to_bytes(&self) -> [u8; 4] {
        self.addr_value.to_be_bytes()
    }

    /// Attempts to deserialize an IP address from its canonical byte-sequence representation.
    ///
    /// Returns `None` if the byte sequence does not have exactly four bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Ipv4Address> {
        let array: [u8; 4] = bytes.try_into().ok()?;
        Some(Ipv4Address::new(u32::from_be_bytes(array)))
    }

    /// Returns this IP address with each bit negated.
    pub fn bitwise_negate(&self) -> Ipv4Address {
        Ipv4Address::new(!self.addr_value)
    }

    /// Returns the sum of this IP address and an offset. Returns `None` if the result leaves the
    /// IPv4 address space in either direction.
    pub fn add_offset(&self, offset: i64) -> Option<Ipv4Address> {
        let sum = i64::from(self.addr_value).checked_add(offset)?;
        u32::try_from(sum).ok().map(Ipv4Address::new)
    }

    pub fn is_unspecified(&self) -> bool {
        self.addr_value == 0
    }

    pub fn is_broadcast(&self) -> bool {
        self.addr_value == 0xFFFF_FFFF
    }

    /// 127.0.0.0/8
    pub fn is_loopback(&self) -> bool {
        self.addr_value >> 24 == 127
    }

    /// The RFC 1918 ranges 10.0.0.0/8, 172.16.0.0/12 and 192.168.0.0/16.
    pub fn is_private(&self) -> bool {
        let [a, b, _, _] = self.to_bytes();
        a == 10
            || (a == 172 && (16..=31).contains(&b))
            || (a == 192 && b == 168)
    }

    /// 224.0.0.0/4
    pub fn is_multicast(&self) -> bool {
        self.addr_value >> 28 == 0b1110
    }

    /// 169.254.0.0/16
    pub fn is_link_local(&self) -> bool {
        self.addr_value >> 16 == 0xA9FE
    }

    /// 240.0.0.0/4, except the limited broadcast address.
    pub fn is_reserved(&self) -> bool {
        self.addr_value >> 28 == 0b1111 && !self.is_broadcast()
    }

    /// Returns the legacy class of this address by its leading bits.
    pub fn class(&self) -> AddressClass {
        match self.leading_ones() {
            0 => AddressClass::A,
            1 => AddressClass::B,
            2 => AddressClass::C,
            3 => AddressClass::D,
            _ => AddressClass::E,
        }
    }

    pub fn kind(&self) -> AddressKind {
        if self.is_loopback() {
            AddressKind::Loopback
        } else if self.is_private() {
            AddressKind::Private
        } else if self.is_multicast() {
            AddressKind::Multicast
        } else if self.is_reserved() {
            AddressKind::Reserved
        } else if self.is_link_local() {
            AddressKind::LinkLocal
        } else {
            AddressKind::Public
        }
    }

    /// Outputs the address as four dot-separated groups of eight bits.
    pub fn to_binary_string(&self) -> String {
        let bytes = self.to_bytes();
        let groups: Vec<String> = bytes.iter()
            .map(|b| bytes_to_binary(&[*b]))
            .collect();
        groups.join(".")
    }

    /// Outputs the address as eight uppercase hexadecimal digits.
    pub fn to_hex_string(&self) -> String {
        format!("{:08X}", self.addr_value)
    }
}

impl From<u32> for Ipv4Address {
    fn from(value: u32) -> Self { Ipv4Address::new(value) }
}
impl From<Ipv4Address> for u32 {
    fn from(addr: Ipv4Address) -> Self { addr.addr_value }
}
impl From<Ipv4Addr> for Ipv4Address {
    fn from(addr: Ipv4Addr) -> Self { Ipv4Address::new(u32::from(addr)) }
}
impl From<Ipv4Address> for Ipv4Addr {
    fn from(addr: Ipv4Address) -> Self { Ipv4Addr::from(addr.addr_value) }
}

impl FromStr for Ipv4Address {
    type Err = IpAddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chunks: Vec<&str> = s.split('.').collect();
        if chunks.len() != 4 {
            return Err(IpAddressParseError::IncorrectChunkCount(chunks.len(), 4));
        }

        let mut addr_val: u32 = 0;
        for (i, chunk) in chunks.iter().enumerate() {
            if chunk.is_empty() {
                return Err(IpAddressParseError::EmptyChunk(i));
            }
            if !chunk.bytes().all(|b| b.is_ascii_digit()) {
                // u32::from_str would let a leading '+' through
                return Err(IpAddressParseError::NonDigitChunk(i, String::from(*chunk)));
            }

            let chunk_val: u32 = chunk.parse()
                .map_err(|e| IpAddressParseError::ChunkParseError(i, String::from(*chunk), e))?;
            if chunk_val > 255 {
                return Err(IpAddressParseError::ChunkOutOfRange(i, chunk_val, 0, 255));
            }

            addr_val = (addr_val << 8) | chunk_val;
        }

        Ok(Ipv4Address::new(addr_val))
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.to_bytes();
        write!(f, "{}.{}.{}.{}", bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

impl BitAnd for Ipv4Address {
    type Output = Ipv4Address;

    fn bitand(self, rhs: Self) -> Self::Output {
        Ipv4Address::new(self.addr_value & rhs.addr_value)
    }
}

impl BitOr for Ipv4Address {
    type Output = Ipv4Address;

    fn bitor(self, rhs: Self) -> Self::Output {
        Ipv4Address::new(self.addr_value | rhs.addr_value)
    }
}

impl BitXor for Ipv4Address {
    type Output = Ipv4Address;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Ipv4Address::new(self.addr_value ^ rhs.addr_value)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IpAddressParseError {
    IncorrectChunkCount(usize, usize),
    EmptyChunk(usize),
    NonDigitChunk(usize, String),
    ChunkParseError(usize, String, ParseIntError),
    ChunkOutOfRange(usize, u32, u32, u32),
}
impl fmt::Display for IpAddressParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpAddressParseError::IncorrectChunkCount(got, expected)
                => write!(f, "IP address has {} chunk(s); expected {}", got, expected),
            IpAddressParseError::EmptyChunk(chunk_idx)
                => write!(f, "IP address chunk with index {} is empty", chunk_idx),
            IpAddressParseError::NonDigitChunk(chunk_idx, chunk)
                => write!(f, "IP address chunk with index {} ({:?}) contains non-digit characters", chunk_idx, chunk),
            IpAddressParseError::ChunkParseError(chunk_idx, chunk, error)
                => write!(f, "failed to parse IP address chunk with index {} ({:?}): {}", chunk_idx, chunk, error),
            IpAddressParseError::ChunkOutOfRange(chunk_idx, got, min, max)
                => write!(f, "IP address chunk with index {} ({}) is out of range {} <= n <= {}", chunk_idx, got, min, max),
        }
    }
}
impl Error for IpAddressParseError {
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ipv4_format() {
        assert_eq!("0.0.0.0", Ipv4Address::new(0x00000000).to_string());
        assert_eq!("255.255.255.255", Ipv4Address::new(0xFFFFFFFF).to_string());
        assert_eq!("18.52.86.120", Ipv4Address::new(0x12345678).to_string());
        assert_eq!("127.0.0.1", Ipv4Address::new(0x7F000001).to_string());
    }

    fn parse_ipv4(s: &str) -> Result<Ipv4Address, IpAddressParseError> {
        s.parse()
    }

    #[test]
    fn test_ipv4_parse() {
        assert_eq!(Ok(Ipv4Address::new(0x00000000)), parse_ipv4("0.0.0.0"));
        assert_eq!(Ok(Ipv4Address::new(0x00000000)), parse_ipv4("00.000.00000.0"));
        assert_eq!(Ok(Ipv4Address::new(0x01020304)), parse_ipv4("1.2.3.4"));
        assert_eq!(Ok(Ipv4Address::new(0xFFFFFFFF)), parse_ipv4("255.255.255.255"));
        assert_eq!(Ok(Ipv4Address::new(0xC0A80001)), parse_ipv4("192.168.0.1"));

        assert_eq!(Err(IpAddressParseError::IncorrectChunkCount(2, 4)), parse_ipv4("."));
        assert_eq!(Err(IpAddressParseError::IncorrectChunkCount(3, 4)), parse_ipv4("1.2.3"));
        assert_eq!(Err(IpAddressParseError::IncorrectChunkCount(5, 4)), parse_ipv4("1.2.3.4.5"));
        assert_eq!(Err(IpAddressParseError::EmptyChunk(1)), parse_ipv4("1..3.4"));
        assert_eq!(Err(IpAddressParseError::NonDigitChunk(2, String::from("-3"))), parse_ipv4("1.2.-3.4"));
        assert_eq!(Err(IpAddressParseError::NonDigitChunk(2, String::from("+3"))), parse_ipv4("1.2.+3.4"));
        assert_eq!(Err(IpAddressParseError::NonDigitChunk(0, String::from("0xFF"))), parse_ipv4("0xFF.1.1.1"));
        assert_eq!(Err(IpAddressParseError::ChunkOutOfRange(1, 256, 0, 255)), parse_ipv4("255.256.255.255"));
        if let Err(IpAddressParseError::ChunkParseError(idx, s, _)) = parse_ipv4("1.99999999999.1.1") {
            assert_eq!(1, idx);
            assert_eq!("99999999999", s);
        } else {
            panic!();
        }
    }

    #[test]
    fn test_ipv4_bytes() {
        assert_eq!([0, 0, 0, 0], Ipv4Address::new(0x00000000).to_bytes());
        assert_eq!([1, 2, 3, 4], Ipv4Address::new(0x01020304).to_bytes());
        assert_eq!([255, 255, 255, 255], Ipv4Address::new(0xFFFFFFFF).to_bytes());

        assert_eq!(Some(Ipv4Address::new(0x7F000001)), Ipv4Address::from_bytes(&[127, 0, 0, 1]));
        assert_eq!(None, Ipv4Address::from_bytes(&[1, 2, 3]));
        assert_eq!(None, Ipv4Address::from_bytes(&[1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_ipv4_and() {
        fn tand(expected: u32, left: u32, right: u32) {
            let expected_addr = Ipv4Address::new(expected);
            let left_addr = Ipv4Address::new(left);
            let right_addr = Ipv4Address::new(right);

            assert_eq!(expected_addr, left_addr & right_addr);
        }

        tand(0x7F000000, 0x7F000001, 0xFF000000);
        tand(0xC0A8A900, 0xC0A8A917, 0xFFFFFF00);
    }

    #[test]
    fn test_add_offset() {
        let addr = Ipv4Address::new(0xFFFFFFFE);
        assert_eq!(Some(Ipv4Address::new(0xFFFFFFFF)), addr.add_offset(1));
        assert_eq!(None, addr.add_offset(2));
        assert_eq!(Some(IPV4_ZERO), Ipv4Address::new(1).add_offset(-1));
        assert_eq!(None, IPV4_ZERO.add_offset(-1));
    }

    #[test]
    fn test_special_ranges() {
        let p = |s: &str| parse_ipv4(s).unwrap();

        assert!(p("10.1.2.3").is_private());
        assert!(p("172.16.0.1").is_private());
        assert!(p("172.31.255.255").is_private());
        assert!(!p("172.32.0.0").is_private());
        assert!(p("192.168.44.1").is_private());
        assert!(!p("192.169.0.1").is_private());

        assert!(p("127.0.0.1").is_loopback());
        assert!(!p("128.0.0.1").is_loopback());

        assert!(p("224.0.0.1").is_multicast());
        assert!(p("239.255.255.255").is_multicast());
        assert!(!p("240.0.0.0").is_multicast());

        assert_eq!(AddressKind::Loopback, p("127.1.1.1").kind());
        assert_eq!(AddressKind::Private, p("192.168.0.1").kind());
        assert_eq!(AddressKind::Multicast, p("230.0.0.1").kind());
        assert_eq!(AddressKind::Reserved, p("250.0.0.1").kind());
        assert_eq!(AddressKind::LinkLocal, p("169.254.3.4").kind());
        assert_eq!(AddressKind::Public, p("8.8.8.8").kind());
        assert_eq!(AddressKind::Public, p("255.255.255.255").kind());
    }

    #[test]
    fn test_class() {
        let p = |s: &str| parse_ipv4(s).unwrap();

        assert_eq!(AddressClass::A, p("0.0.0.0").class());
        assert_eq!(AddressClass::A, p("10.0.0.1").class());
        assert_eq!(AddressClass::A, p("127.0.0.1").class());
        assert_eq!(AddressClass::B, p("128.0.0.1").class());
        assert_eq!(AddressClass::B, p("191.255.0.1").class());
        assert_eq!(AddressClass::C, p("192.0.2.1").class());
        assert_eq!(AddressClass::C, p("223.1.1.1").class());
        assert_eq!(AddressClass::D, p("224.0.0.5").class());
        assert_eq!(AddressClass::E, p("240.0.0.1").class());
        assert_eq!(AddressClass::E, p("255.255.255.255").class());
    }

    #[test]
    fn test_renderings() {
        let addr = parse_ipv4("192.168.1.10").unwrap();
        assert_eq!("11000000.10101000.00000001.00001010", addr.to_binary_string());
        assert_eq!("C0A8010A", addr.to_hex_string());
        assert_eq!("00000000", IPV4_ZERO.to_hex_string());
    }
}
