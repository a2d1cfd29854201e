//! Conversion between CIDR prefix lengths, dotted subnet masks and dotted wildcard masks.


use std::fmt;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::addr::Ipv4Address;
use crate::cidr;
use crate::consts::IPV4_BITS;
use crate::error::{CalcError, PrefixProblem};


static CIDR_NOTATION_REGEX: Lazy<Regex> = Lazy::new(||
    Regex::new("^/?(?P<cidr>[0-9]+)$").unwrap()
);
static DOTTED_NOTATION_REGEX: Lazy<Regex> = Lazy::new(||
    Regex::new("^[0-9]+(?:[.][0-9]+){3}$").unwrap()
);


/// The notation a mask was written in.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum NotationKind {
    /// `/n` or a bare `n`.
    Cidr,

    /// Dotted octets forming a contiguous run of ones followed by zeros.
    SubnetMask,

    /// Dotted octets whose complement is a subnet mask.
    Wildcard,
}
impl fmt::Display for NotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationKind::Cidr => write!(f, "CIDR prefix"),
            NotationKind::SubnetMask => write!(f, "subnet mask"),
            NotationKind::Wildcard => write!(f, "wildcard mask"),
        }
    }
}

/// All views of one mask, as produced by [`convert`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct NotationConversion {
    pub kind: NotationKind,
    pub prefix: usize,
    pub subnet_mask: Ipv4Address,
    pub wildcard_mask: Ipv4Address,

    /// The subnet mask in dotted binary.
    pub binary: String,

    /// The subnet mask as eight hexadecimal digits.
    pub hex: String,

    pub network_bits: usize,
    pub host_bits: usize,
    pub max_addresses: u64,
    pub usable_hosts: u64,
}

fn classify(text: &str) -> Result<(NotationKind, usize), CalcError> {
    let trimmed = text.trim();
    let invalid = || CalcError::AmbiguousOrInvalidNotation(String::from(text));

    if let Some(caps) = CIDR_NOTATION_REGEX.captures(trimmed) {
        // only digits are captured, so parsing fails only on overflow
        let prefix: usize = caps.name("cidr").expect("'cidr' captured").as_str()
            .parse()
            .map_err(|_| CalcError::InvalidPrefix {
                prefix: usize::MAX,
                problem: PrefixProblem::OutOfRange(IPV4_BITS),
            })?;
        if prefix > IPV4_BITS {
            return Err(CalcError::InvalidPrefix {
                prefix,
                problem: PrefixProblem::OutOfRange(IPV4_BITS),
            });
        }
        return Ok((NotationKind::Cidr, prefix));
    }

    if !DOTTED_NOTATION_REGEX.is_match(trimmed) {
        return Err(invalid());
    }
    let value: Ipv4Address = trimmed.parse()
        .map_err(|_| invalid())?;

    // 0.0.0.0 and 255.255.255.255 are valid either way; they count as subnet masks
    if let Ok(prefix) = cidr::prefix_from_mask(value) {
        Ok((NotationKind::SubnetMask, prefix))
    } else if let Ok(prefix) = cidr::prefix_from_mask(cidr::wildcard_from_mask(value)) {
        Ok((NotationKind::Wildcard, prefix))
    } else {
        Err(invalid())
    }
}

/// Determines which notation the text is written in.
///
/// Fails with [`CalcError::InvalidPrefix`] for a prefix above 32 and with
/// [`CalcError::AmbiguousOrInvalidNotation`] for anything that is not a prefix, a contiguous subnet
/// mask or the complement of one.
pub fn detect_notation_kind(text: &str) -> Result<NotationKind, CalcError> {
    classify(text)
        .map(|(kind, _prefix)| kind)
}

/// Converts a prefix, subnet mask or wildcard mask into all of its equivalent forms.
pub fn convert(text: &str) -> Result<NotationConversion, CalcError> {
    let (kind, prefix) = classify(text)?;
    debug!("{:?} recognized as {} (/{})", text, kind, prefix);

    let subnet_mask = cidr::mask_from_prefix(prefix)?;
    Ok(NotationConversion {
        kind,
        prefix,
        subnet_mask,
        wildcard_mask: cidr::wildcard_from_mask(subnet_mask),
        binary: subnet_mask.to_binary_string(),
        hex: subnet_mask.to_hex_string(),
        network_bits: prefix,
        host_bits: IPV4_BITS - prefix,
        max_addresses: cidr::address_count_for_prefix(prefix),
        usable_hosts: cidr::usable_hosts_for_prefix(prefix),
    })
}
