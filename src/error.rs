use std::error::Error;
use std::fmt;

use crate::addr::{IpAddressParseError, Ipv4Address};
use crate::parse::ParseNetworkError;


/// Why a prefix length was rejected.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PrefixProblem {
    /// The prefix is larger than the maximum (contained).
    OutOfRange(usize),

    /// A child prefix must be strictly longer than its parent's prefix (contained).
    NotLongerThanParent(usize),
}

/// Describes what did not fit when an allocation ran out of address space.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CapacityShortfall {
    /// An equal-size split asked for more subnets than the parent can hold.
    Subnets {
        requested: u64,
        maximum: u64,
        resulting_prefix: usize,
        max_prefix: usize,
    },

    /// A demand-sized split asked for more hosts than the parent can hold once every demand is
    /// rounded up to an aligned block.
    Hosts {
        requested_hosts: u64,
        requested_addresses: u64,
        available_hosts: u64,
        available_addresses: u64,
    },
}
impl fmt::Display for CapacityShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityShortfall::Subnets { requested, maximum, resulting_prefix, max_prefix }
                => write!(
                    f,
                    "cannot create {} subnets: the resulting prefix would be /{}, which exceeds the maximum usable prefix /{} (at most {} subnets fit)",
                    requested, resulting_prefix, max_prefix, maximum,
                ),
            CapacityShortfall::Hosts { requested_hosts, requested_addresses, available_hosts, available_addresses }
                => write!(
                    f,
                    "requested {} hosts ({} addresses once aligned) but only {} hosts ({} addresses) are available",
                    requested_hosts, requested_addresses, available_hosts, available_addresses,
                ),
        }
    }
}

/// An error returned by one of the address-space calculations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CalcError {
    /// The text is not a valid IPv4 address.
    InvalidAddress { input: String, cause: IpAddressParseError },

    /// The text is not a valid IPv4 network specification.
    InvalidNetwork { input: String, cause: ParseNetworkError },

    /// A prefix length is out of range or not usable in this position.
    InvalidPrefix { prefix: usize, problem: PrefixProblem },

    /// The value is not a contiguous subnet mask.
    InvalidMask(Ipv4Address),

    /// The text is neither a prefix length, a subnet mask nor a wildcard mask.
    AmbiguousOrInvalidNotation(String),

    /// The requested subnets do not fit into the parent network.
    CapacityExceeded(CapacityShortfall),

    /// A single host demand needs a larger block than the parent network (or the whole IPv4
    /// address space) provides. `maximum` is the number of usable hosts that is available.
    DemandExceedsAddressSpace { demand: u64, maximum: u64 },

    /// A host demand of zero was given (contained: its position in the input).
    InvalidDemand { index: usize },

    /// The start of a range lies after its end.
    InvalidRange { start: Ipv4Address, end: Ipv4Address },

    /// The operation needs at least one input.
    EmptyInput,

    /// One entry of a list of networks could not be parsed.
    InvalidNetworkInInput { index: usize, input: String, cause: ParseNetworkError },
}
impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::InvalidAddress { input, cause }
                => write!(f, "invalid address {:?}: {}", input, cause),
            CalcError::InvalidNetwork { input, cause }
                => write!(f, "invalid network {:?}: {}", input, cause),
            CalcError::InvalidPrefix { prefix, problem: PrefixProblem::OutOfRange(max) }
                => write!(f, "prefix /{} is greater than the maximum (/{})", prefix, max),
            CalcError::InvalidPrefix { prefix, problem: PrefixProblem::NotLongerThanParent(parent) }
                => write!(f, "new prefix /{} must be longer than the original prefix /{}", prefix, parent),
            CalcError::InvalidMask(mask)
                => write!(f, "{} is not a contiguous subnet mask", mask),
            CalcError::AmbiguousOrInvalidNotation(input)
                => write!(f, "{:?} is not a CIDR prefix, subnet mask or wildcard mask", input),
            CalcError::CapacityExceeded(shortfall)
                => write!(f, "capacity exceeded: {}", shortfall),
            CalcError::DemandExceedsAddressSpace { demand, maximum }
                => write!(f, "a subnet for {} hosts does not fit; at most {} usable hosts are available", demand, maximum),
            CalcError::InvalidDemand { index }
                => write!(f, "host demand #{} is zero; host demands must be greater than zero", index + 1),
            CalcError::InvalidRange { start, end }
                => write!(f, "range start {} lies after range end {}", start, end),
            CalcError::EmptyInput
                => write!(f, "no input given"),
            CalcError::InvalidNetworkInInput { index, input, cause }
                => write!(f, "network #{} ({:?}) is invalid: {}", index + 1, input, cause),
        }
    }
}
impl Error for CalcError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CalcError::InvalidAddress { cause, .. } => Some(cause),
            CalcError::InvalidNetwork { cause, .. } => Some(cause),
            CalcError::InvalidNetworkInInput { cause, .. } => Some(cause),
            _ => None,
        }
    }
}
