//! Limits and well-known prefix lengths.

/// Number of bits in an IPv4 address.
pub const IPV4_BITS: usize = 32;

/// The longest prefix that still has a network and a broadcast address plus two hosts.
pub const MAX_USABLE_PREFIX: usize = 30;

/// RFC 3021 point-to-point links: two addresses, both usable.
pub const POINT_TO_POINT_PREFIX: usize = 31;

/// A single host.
pub const HOST_PREFIX: usize = 32;

/// Addresses lost to the network and broadcast address in an ordinary subnet.
pub const NETWORK_AND_BROADCAST_OVERHEAD: u64 = 2;

/// The most subnet rows the command line front-end prints before truncating.
pub const MAX_SUBNETS_TO_DISPLAY: u64 = 4096;
