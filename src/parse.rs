//! Parsing of addresses and network specifications from text.


use std::error::Error;
use std::fmt;
use std::num::ParseIntError;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::addr::{IpAddressParseError, Ipv4Address};
use crate::cidr;
use crate::consts::IPV4_BITS;
use crate::error::CalcError;
use crate::net::Ipv4Network;


static IPV4_WITH_SUBNET_REGEX: Lazy<Regex> = Lazy::new(||
    Regex::new("^(?P<addr>[0-9]+(?:[.][0-9]+){3})/(?P<wildcard>-)?(?P<mask>[0-9]+(?:[.][0-9]+){3})$").unwrap()
);
static IPV4_WITH_CIDR_REGEX: Lazy<Regex> = Lazy::new(||
    Regex::new("^(?P<addr>[0-9]+(?:[.][0-9]+){3})/(?P<cidr>[0-9]+)$").unwrap()
);


/// An error that occurs when attempting to parse an IPv4 network specification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseNetworkError {
    /// The format of the network specification was not recognized. The contained string is the
    /// original specification string.
    Unrecognized(String),

    /// The IP address could not be parsed. The contained error describes why parsing the IP address
    /// failed.
    Address(IpAddressParseError),

    /// The subnet or wildcard mask could not be parsed. The contained error describes why parsing
    /// the mask failed.
    Mask(IpAddressParseError),

    /// The subnet mask was parsed but its bits are not contiguous. If the mask was given as a
    /// wildcard, the contained value is the complemented (subnet) form.
    NonContiguousMask(Ipv4Address),

    /// The CIDR prefix could not be parsed. The contained error describes why parsing the prefix
    /// failed.
    CidrParse(ParseIntError),

    /// The parsed CIDR prefix is out of range. The first value is the CIDR prefix that was parsed
    /// and the second value is the maximum CIDR prefix.
    CidrRange(usize, usize),

    /// Strict parsing only: the address has bits set beyond the prefix length.
    HostBitsSet { address: Ipv4Address, network: Ipv4Network },
}
impl fmt::Display for ParseNetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseNetworkError::Unrecognized(spec)
                => write!(f, "unrecognized network specification: {:?}", spec),
            ParseNetworkError::Address(e)
                => write!(f, "failed to parse address: {}", e),
            ParseNetworkError::Mask(e)
                => write!(f, "failed to parse mask: {}", e),
            ParseNetworkError::NonContiguousMask(mask)
                => write!(f, "{} is not a contiguous subnet mask", mask),
            ParseNetworkError::CidrParse(e)
                => write!(f, "failed to parse CIDR prefix: {}", e),
            ParseNetworkError::CidrRange(got, max)
                => write!(f, "CIDR prefix {} is greater than the maximum ({})", got, max),
            ParseNetworkError::HostBitsSet { address, network }
                => write!(f, "{} has host bits set (the network is {})", address, network),
        }
    }
}
impl Error for ParseNetworkError {
}


/// Attempts to parse a single IPv4 address. Surrounding whitespace is ignored.
pub fn parse_addr(spec: &str) -> Result<Ipv4Address, CalcError> {
    spec.trim().parse()
        .map_err(|cause| CalcError::InvalidAddress {
            input: String::from(spec),
            cause,
        })
}

fn parse_netspec_inner(spec: &str) -> Result<(Ipv4Address, Ipv4Network), ParseNetworkError> {
    if let Some(caps) = IPV4_WITH_SUBNET_REGEX.captures(spec) {
        let addr_str = caps.name("addr").expect("'addr' captured").as_str();
        let is_wildcard = caps.name("wildcard").is_some();
        let mask_str = caps.name("mask").expect("'mask' captured").as_str();

        let addr: Ipv4Address = addr_str.parse()
            .map_err(ParseNetworkError::Address)?;
        let mut mask: Ipv4Address = mask_str.parse()
            .map_err(ParseNetworkError::Mask)?;
        if is_wildcard {
            mask = cidr::wildcard_from_mask(mask);
        }

        let cidr_prefix = cidr::prefix_from_mask(mask)
            .map_err(|_| ParseNetworkError::NonContiguousMask(mask))?;
        Ok((addr, Ipv4Network::new_with_prefix(addr, cidr_prefix)))
    } else if let Some(caps) = IPV4_WITH_CIDR_REGEX.captures(spec) {
        let addr_str = caps.name("addr").expect("'addr' captured").as_str();
        let cidr_str = caps.name("cidr").expect("'cidr' captured").as_str();

        let addr: Ipv4Address = addr_str.parse()
            .map_err(ParseNetworkError::Address)?;
        let cidr_prefix: usize = cidr_str.parse()
            .map_err(ParseNetworkError::CidrParse)?;
        if cidr_prefix > IPV4_BITS {
            return Err(ParseNetworkError::CidrRange(cidr_prefix, IPV4_BITS));
        }

        Ok((addr, Ipv4Network::new_with_prefix(addr, cidr_prefix)))
    } else {
        Err(ParseNetworkError::Unrecognized(String::from(spec)))
    }
}

/// Attempts to parse a single network specification, returning both the address as it was typed
/// and the network containing it.
///
/// Accepted forms are `a.b.c.d/n`, `a.b.c.d/m.m.m.m` (subnet mask) and `a.b.c.d/-w.w.w.w`
/// (wildcard mask). Surrounding whitespace is ignored.
pub fn parse_netspec(spec: &str) -> Result<(Ipv4Address, Ipv4Network), CalcError> {
    parse_netspec_inner(spec.trim())
        .map_err(|cause| CalcError::InvalidNetwork {
            input: String::from(spec),
            cause,
        })
}

/// Attempts to parse a network specification. Host bits in the address are masked away; use
/// [`parse_network_strict`] to reject them instead.
pub fn parse_network(spec: &str) -> Result<Ipv4Network, CalcError> {
    parse_netspec(spec)
        .map(|(_addr, net)| net)
}

/// Attempts to parse a network specification whose address must be the network's base address.
pub fn parse_network_strict(spec: &str) -> Result<Ipv4Network, CalcError> {
    let (addr, net) = parse_netspec(spec)?;
    if addr != net.base_addr() {
        return Err(CalcError::InvalidNetwork {
            input: String::from(spec),
            cause: ParseNetworkError::HostBitsSet { address: addr, network: net },
        });
    }
    Ok(net)
}
