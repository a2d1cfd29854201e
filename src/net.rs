use std::fmt;
use std::str::FromStr;

use crate::addr::Ipv4Address;
use crate::cidr;
use crate::consts::{IPV4_BITS, POINT_TO_POINT_PREFIX};
use crate::error::CalcError;


/// An IPv4 network, identified by its base address and CIDR prefix length.
///
/// The base address never has host bits set; constructors mask them away.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ipv4Network {
    base_addr: Ipv4Address,
    cidr_prefix: usize,
}

/// Where an address sits inside a network.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct HostPosition {
    /// Distance from the base address (the base address itself is 0).
    pub from_start: u64,

    /// Distance to the last address of the network.
    pub from_end: u64,
}

impl Ipv4Network {
    /// Creates the network of the given prefix length that contains `addr`.
    ///
    /// # Panics
    ///
    /// Panics if `cidr_prefix` is greater than 32. Use [`Ipv4Network::checked_new`] for prefixes
    /// from untrusted input.
    pub fn new_with_prefix(
        addr: Ipv4Address,
        cidr_prefix: usize,
    ) -> Ipv4Network {
        assert!(cidr_prefix <= IPV4_BITS, "CIDR prefix {} out of range", cidr_prefix);
        // calculate base address by ANDing address with subnet mask
        let base_addr = Ipv4Address::new(addr.value() & cidr::mask_value(cidr_prefix));
        Ipv4Network {
            base_addr,
            cidr_prefix,
        }
    }

    /// Creates the network of the given prefix length that contains `addr`, failing with
    /// [`CalcError::InvalidPrefix`] if the prefix is greater than 32.
    pub fn checked_new(
        addr: Ipv4Address,
        cidr_prefix: usize,
    ) -> Result<Ipv4Network, CalcError> {
        cidr::mask_from_prefix(cidr_prefix)?;
        Ok(Ipv4Network::new_with_prefix(addr, cidr_prefix))
    }

    /// Creates the network described by a dotted subnet mask that contains `addr`.
    ///
    /// Fails with [`CalcError::InvalidMask`] if the mask is not contiguous.
    pub fn new_with_mask(
        addr: Ipv4Address,
        subnet_mask: Ipv4Address,
    ) -> Result<Ipv4Network, CalcError> {
        let cidr_prefix = cidr::prefix_from_mask(subnet_mask)?;
        Ok(Ipv4Network::new_with_prefix(addr, cidr_prefix))
    }

    pub fn base_addr(&self) -> Ipv4Address { self.base_addr }
    pub fn cidr_prefix(&self) -> usize { self.cidr_prefix }

    pub fn subnet_mask(&self) -> Ipv4Address {
        Ipv4Address::new(cidr::mask_value(self.cidr_prefix))
    }

    pub fn cisco_wildcard(&self) -> Ipv4Address {
        self.subnet_mask().bitwise_negate()
    }

    /// Number of host bits (32 minus the prefix length).
    pub fn host_bits(&self) -> usize {
        IPV4_BITS - self.cidr_prefix
    }

    pub fn address_count(&self) -> u64 {
        cidr::address_count_for_prefix(self.cidr_prefix)
    }

    /// Number of usable host addresses; see [`cidr::usable_hosts_for_prefix`].
    pub fn host_count(&self) -> u64 {
        cidr::usable_hosts_for_prefix(self.cidr_prefix)
    }

    /// The base address with all host bits set. A /32 is its own broadcast address.
    pub fn broadcast_addr(&self) -> Ipv4Address {
        self.base_addr | self.cisco_wildcard()
    }

    pub fn last_addr_of_subnet(&self) -> Ipv4Address {
        self.broadcast_addr()
    }

    pub fn first_host_addr(&self) -> Ipv4Address {
        if self.cidr_prefix >= POINT_TO_POINT_PREFIX {
            // no network address to skip on /31 and /32
            self.base_addr
        } else {
            Ipv4Address::new(self.base_addr.value() + 1)
        }
    }

    pub fn last_host_addr(&self) -> Ipv4Address {
        if self.cidr_prefix >= POINT_TO_POINT_PREFIX {
            self.broadcast_addr()
        } else {
            Ipv4Address::new(self.broadcast_addr().value() - 1)
        }
    }

    /// The base address of the same-sized network directly after this one, or `None` if this
    /// network ends at 255.255.255.255.
    pub fn next_subnet_base_addr(&self) -> Option<Ipv4Address> {
        self.broadcast_addr().add_offset(1)
    }

    /// The network one bit shorter that contains this one; `None` for /0.
    pub fn parent(&self) -> Option<Ipv4Network> {
        if self.cidr_prefix == 0 {
            None
        } else {
            Some(Ipv4Network::new_with_prefix(self.base_addr, self.cidr_prefix - 1))
        }
    }

    /// The other half of this network's parent; `None` for /0.
    pub fn sibling(&self) -> Option<Ipv4Network> {
        if self.cidr_prefix == 0 {
            return None;
        }
        let flip_bit = 1u32 << (IPV4_BITS - self.cidr_prefix);
        Some(Ipv4Network {
            base_addr: Ipv4Address::new(self.base_addr.value() ^ flip_bit),
            cidr_prefix: self.cidr_prefix,
        })
    }

    pub fn contains(&self, addr: &Ipv4Address) -> bool {
        (*addr & self.subnet_mask()) == self.base_addr
    }

    pub fn is_superset_of(&self, other: &Ipv4Network) -> bool {
        // a network A is a superset of a network B if B is at least as long as A and the base
        // address of B lies within A
        self.cidr_prefix <= other.cidr_prefix
            && self.contains(&other.base_addr)
    }

    pub fn is_subset_of(&self, other: &Ipv4Network) -> bool {
        other.is_superset_of(self)
    }

    pub fn intersects(&self, other: &Ipv4Network) -> bool {
        let self_first = self.base_addr;
        let self_last = self.last_addr_of_subnet();
        let other_first = other.base_addr;
        let other_last = other.last_addr_of_subnet();

        // thisFirst <= otherLast && otherFirst <= thisLast
        self_first <= other_last && other_first <= self_last
    }

    /// Where `addr` sits inside this network, or `None` if it is outside.
    pub fn host_position(&self, addr: &Ipv4Address) -> Option<HostPosition> {
        if !self.contains(addr) {
            return None;
        }
        let from_start = u64::from(addr.value() - self.base_addr.value());
        Some(HostPosition {
            from_start,
            from_end: self.address_count() - from_start - 1,
        })
    }

    /// Returns an iterator over the subnets of this network with the given (longer or equal)
    /// prefix length, in ascending address order.
    ///
    /// Fails with [`CalcError::InvalidPrefix`] if `new_prefix` is shorter than this network's
    /// prefix or greater than 32.
    pub fn subnets(&self, new_prefix: usize) -> Result<SubnetIter, CalcError> {
        cidr::mask_from_prefix(new_prefix)?;
        if new_prefix < self.cidr_prefix {
            return Err(CalcError::InvalidPrefix {
                prefix: new_prefix,
                problem: crate::error::PrefixProblem::NotLongerThanParent(self.cidr_prefix),
            });
        }
        Ok(SubnetIter::new(*self, new_prefix))
    }
}
impl fmt::Display for Ipv4Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base_addr, self.cidr_prefix)
    }
}
impl FromStr for Ipv4Network {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse_network(s)
    }
}


/// Walks the equal-sized subnets of a network in ascending address order.
///
/// Subnets are produced on demand, so even a /0 split into /32s costs nothing until iterated.
#[derive(Clone, Debug)]
pub struct SubnetIter {
    next_base: u64,
    end: u64,
    new_prefix: usize,
}
impl SubnetIter {
    fn new(network: Ipv4Network, new_prefix: usize) -> Self {
        let next_base = u64::from(network.base_addr().value());
        Self {
            next_base,
            end: next_base + network.address_count(),
            new_prefix,
        }
    }

    fn step(&self) -> u64 {
        cidr::address_count_for_prefix(self.new_prefix)
    }
}
impl Iterator for SubnetIter {
    type Item = Ipv4Network;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_base >= self.end {
            return None;
        }

        // next_base < end <= 2^32, so it fits
        let base = Ipv4Address::new(self.next_base as u32);
        self.next_base += self.step();
        Some(Ipv4Network::new_with_prefix(base, self.new_prefix))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end.saturating_sub(self.next_base)) / self.step();
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }

    fn last(mut self) -> Option<Self::Item> {
        let remaining = self.end.saturating_sub(self.next_base) / self.step();
        if remaining == 0 {
            return None;
        }
        self.next_base += (remaining - 1) * self.step();
        self.next()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let skip = (n as u64).saturating_mul(self.step());
        self.next_base = self.next_base.saturating_add(skip);
        self.next()
    }
}
impl ExactSizeIterator for SubnetIter {
}
