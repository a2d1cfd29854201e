//! Fixed-length subnetting: splitting a network into equal-sized children.


use log::debug;

use crate::addr::Ipv4Address;
use crate::cidr;
use crate::consts::{IPV4_BITS, MAX_USABLE_PREFIX};
use crate::error::{CalcError, CapacityShortfall, PrefixProblem};
use crate::net::Ipv4Network;


/// One child network of an equal-sized split.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FlsmSubnet {
    /// Position of the subnet in the split, starting at 1.
    pub index: u64,
    pub network: Ipv4Network,
    pub usable_hosts: u64,
}

/// The outcome of an equal-sized split.
///
/// The children are not materialized; [`FlsmPlan::subnets`] produces them on demand.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct FlsmPlan {
    parent: Ipv4Network,
    new_prefix: usize,
    subnet_count: u64,
}
impl FlsmPlan {
    pub fn parent(&self) -> Ipv4Network { self.parent }
    pub fn new_prefix(&self) -> usize { self.new_prefix }

    /// The subnet mask shared by all children.
    pub fn subnet_mask(&self) -> Ipv4Address {
        Ipv4Address::new(cidr::mask_value(self.new_prefix))
    }

    /// Number of subnets handed out.
    pub fn subnet_count(&self) -> u64 { self.subnet_count }

    /// Number of subnets of the new prefix that fit into the parent.
    pub fn possible_subnets(&self) -> u64 {
        1u64 << (self.new_prefix - self.parent.cidr_prefix())
    }

    /// Subnets of the new prefix that fit but were not requested.
    pub fn unused_subnets(&self) -> u64 {
        self.possible_subnets() - self.subnet_count
    }

    pub fn addresses_per_subnet(&self) -> u64 {
        cidr::address_count_for_prefix(self.new_prefix)
    }

    pub fn usable_hosts_per_subnet(&self) -> u64 {
        cidr::usable_hosts_for_prefix(self.new_prefix)
    }

    /// Returns the handed-out subnets in ascending address order.
    pub fn subnets(&self) -> impl Iterator<Item = FlsmSubnet> {
        let usable_hosts = self.usable_hosts_per_subnet();
        let count = usize::try_from(self.subnet_count).unwrap_or(usize::MAX);
        self.parent.subnets(self.new_prefix)
            .into_iter()
            .flatten()
            .take(count)
            .zip(1..)
            .map(move |(network, index)| FlsmSubnet {
                index,
                network,
                usable_hosts,
            })
    }
}

/// Splits `parent` into `count` equal subnets, using the smallest power of two that is at least
/// `count` to size them.
///
/// Fails with [`CalcError::CapacityExceeded`] if the children would be longer than /30.
pub fn split_by_count(parent: Ipv4Network, count: u64) -> Result<FlsmPlan, CalcError> {
    if count == 0 {
        return Err(CalcError::EmptyInput);
    }

    // ceil(log2(count))
    let subnet_bits = (u64::BITS - (count - 1).leading_zeros()) as usize;
    let new_prefix = parent.cidr_prefix() + subnet_bits;
    if new_prefix > MAX_USABLE_PREFIX {
        let maximum = MAX_USABLE_PREFIX.checked_sub(parent.cidr_prefix())
            .map(|spare_bits| 1u64 << spare_bits)
            .unwrap_or(0);
        return Err(CalcError::CapacityExceeded(CapacityShortfall::Subnets {
            requested: count,
            maximum,
            resulting_prefix: new_prefix,
            max_prefix: MAX_USABLE_PREFIX,
        }));
    }

    let plan = FlsmPlan {
        parent,
        new_prefix,
        subnet_count: count,
    };
    debug!(
        "splitting {} into {} subnets of /{} ({} unused)",
        parent, count, new_prefix, plan.unused_subnets(),
    );
    Ok(plan)
}

/// Splits `parent` into every subnet of the given prefix length.
///
/// Fails with [`CalcError::InvalidPrefix`] unless the new prefix is longer than the parent's and
/// at most 32.
pub fn split_by_prefix(parent: Ipv4Network, new_prefix: usize) -> Result<FlsmPlan, CalcError> {
    if new_prefix > IPV4_BITS {
        return Err(CalcError::InvalidPrefix {
            prefix: new_prefix,
            problem: PrefixProblem::OutOfRange(IPV4_BITS),
        });
    }
    if new_prefix <= parent.cidr_prefix() {
        return Err(CalcError::InvalidPrefix {
            prefix: new_prefix,
            problem: PrefixProblem::NotLongerThanParent(parent.cidr_prefix()),
        });
    }

    let mut plan = FlsmPlan {
        parent,
        new_prefix,
        subnet_count: 0,
    };
    plan.subnet_count = plan.possible_subnets();
    debug!("splitting {} into all {} subnets of /{}", parent, plan.subnet_count, new_prefix);
    Ok(plan)
}
