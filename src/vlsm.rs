//! Variable-length subnetting: carving differently-sized subnets for host demands out of one
//! network.
//!
//! Demands are served largest first. Each one receives the smallest block that holds it, placed at
//! the next free address aligned to the block's size.


use log::{debug, trace};

use crate::addr::Ipv4Address;
use crate::cidr;
use crate::consts::{IPV4_BITS, NETWORK_AND_BROADCAST_OVERHEAD};
use crate::error::{CalcError, CapacityShortfall};
use crate::net::Ipv4Network;
use crate::range::AddressRange;


/// The largest single demand any IPv4 network can serve.
pub const MAX_DEMAND: u64 = (1u64 << IPV4_BITS) - NETWORK_AND_BROADCAST_OVERHEAD;

/// A subnet handed out for one host demand.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VlsmSubnet {
    /// Position of the demand in the caller's list, starting at 0.
    pub input_index: usize,

    /// The number of hosts requested.
    pub demand: u64,

    pub network: Ipv4Network,

    /// The number of usable hosts in the assigned network.
    pub capacity: u64,
}
impl VlsmSubnet {
    /// Usable host addresses beyond the demand.
    pub fn spare_hosts(&self) -> u64 {
        self.capacity - self.demand
    }
}

/// The outcome of a demand-sized split.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct VlsmPlan {
    parent: Ipv4Network,
    subnets: Vec<VlsmSubnet>,
}
impl VlsmPlan {
    pub fn parent(&self) -> Ipv4Network { self.parent }

    /// The assigned subnets in allocation order: descending demand, ties in input order. This is
    /// also ascending address order.
    pub fn subnets(&self) -> &[VlsmSubnet] { &self.subnets }

    /// The assigned subnets re-indexed into the order the demands were given in.
    pub fn in_input_order(&self) -> Vec<VlsmSubnet> {
        let mut ret = self.subnets.clone();
        ret.sort_by_key(|s| s.input_index);
        ret
    }

    pub fn total_demand(&self) -> u64 {
        self.subnets.iter().map(|s| s.demand).sum()
    }

    pub fn total_capacity(&self) -> u64 {
        self.subnets.iter().map(|s| s.capacity).sum()
    }

    /// The parts of the parent that were not handed out, as CIDR blocks in ascending order.
    pub fn unallocated(&self) -> Vec<Ipv4Network> {
        let mut ret = Vec::new();
        let mut next_free = Some(self.parent.base_addr());
        for subnet in &self.subnets {
            if let Some(free) = next_free {
                if free < subnet.network.base_addr() {
                    if let Some(gap_end) = subnet.network.base_addr().add_offset(-1) {
                        if let Ok(range) = AddressRange::new(free, gap_end) {
                            ret.extend(range.subnets());
                        }
                    }
                }
            }
            next_free = subnet.network.next_subnet_base_addr();
        }
        if let Some(free) = next_free {
            // free lies past the parent once the last subnet ends at its broadcast address
            if let Ok(tail) = AddressRange::new(free, self.parent.last_addr_of_subnet()) {
                ret.extend(tail.subnets());
            }
        }
        ret
    }
}

/// The next free address and the subnets assigned so far.
struct Allocation {
    cursor: u64,
    subnets: Vec<VlsmSubnet>,
}

/// Allocates one subnet per host demand inside `parent`.
///
/// Fails with [`CalcError::EmptyInput`] if no demands are given, [`CalcError::InvalidDemand`] for
/// a demand of zero, [`CalcError::DemandExceedsAddressSpace`] if a single demand needs a block
/// larger than `parent` (or larger than any IPv4 network) and [`CalcError::CapacityExceeded`] if
/// the demands do not fit into `parent` together.
pub fn allocate(parent: Ipv4Network, demands: &[u64]) -> Result<VlsmPlan, CalcError> {
    if demands.is_empty() {
        return Err(CalcError::EmptyInput);
    }

    // size every demand first so that a capacity error can report the full request
    let mut sized: Vec<(usize, u64, usize)> = Vec::with_capacity(demands.len());
    for (input_index, &demand) in demands.iter().enumerate() {
        if demand == 0 {
            return Err(CalcError::InvalidDemand { index: input_index });
        }
        let prefix = cidr::prefix_for_host_demand(demand)
            .ok_or(CalcError::DemandExceedsAddressSpace {
                demand,
                maximum: MAX_DEMAND,
            })?;
        if cidr::address_count_for_prefix(prefix) > parent.address_count() {
            // this demand alone does not fit, whatever else is requested
            return Err(CalcError::DemandExceedsAddressSpace {
                demand,
                maximum: parent.host_count(),
            });
        }
        sized.push((input_index, demand, prefix));
    }

    // stable: equal demands keep their input order
    sized.sort_by(|(_i1, demand1, _p1), (_i2, demand2, _p2)|
        // descending sort => reversed
        demand2.cmp(demand1)
    );

    let parent_start = u64::from(parent.base_addr().value());
    let parent_end = parent_start + parent.address_count();
    let shortfall = || {
        CalcError::CapacityExceeded(CapacityShortfall::Hosts {
            requested_hosts: demands.iter().sum(),
            requested_addresses: sized.iter()
                .map(|(_i, _d, prefix)| cidr::address_count_for_prefix(*prefix))
                .sum(),
            available_hosts: parent.host_count(),
            available_addresses: parent.address_count(),
        })
    };

    debug!("allocating {} demand(s) in {}", sized.len(), parent);
    let initial = Allocation {
        cursor: parent_start,
        subnets: Vec::with_capacity(sized.len()),
    };
    let allocation = sized.iter()
        .try_fold(initial, |mut alloc, &(input_index, demand, prefix)| {
            let block_size = cidr::address_count_for_prefix(prefix);
            // round up to the block size
            let aligned = (alloc.cursor + block_size - 1) / block_size * block_size;
            if aligned + block_size > parent_end {
                return Err(shortfall());
            }

            // aligned < parent_end <= 2^32
            let network = Ipv4Network::new_with_prefix(Ipv4Address::new(aligned as u32), prefix);
            trace!("demand #{} ({} hosts) -> {}", input_index + 1, demand, network);
            alloc.subnets.push(VlsmSubnet {
                input_index,
                demand,
                network,
                capacity: network.host_count(),
            });
            alloc.cursor = aligned + block_size;
            Ok(alloc)
        })?;

    debug!(
        "allocated {} subnet(s) in {}; {} of {} addresses used",
        allocation.subnets.len(), parent, allocation.cursor - parent_start, parent.address_count(),
    );
    Ok(VlsmPlan {
        parent,
        subnets: allocation.subnets,
    })
}

/// The number of addresses a demand occupies once rounded up to a whole block.
pub fn block_size_for_demand(demand: u64) -> Option<u64> {
    cidr::prefix_for_host_demand(demand)
        .map(cidr::address_count_for_prefix)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::net::test::parse_ipv4net;

    fn networks(plan: &VlsmPlan) -> Vec<Ipv4Network> {
        plan.subnets().iter().map(|s| s.network).collect()
    }

    #[test]
    fn test_allocate_sorted_input() {
        let plan = allocate(parse_ipv4net("192.168.0.0", 24), &[100, 50, 25, 10]).unwrap();
        assert_eq!(
            vec![
                parse_ipv4net("192.168.0.0", 25),
                parse_ipv4net("192.168.0.128", 26),
                parse_ipv4net("192.168.0.192", 27),
                parse_ipv4net("192.168.0.224", 28),
            ],
            networks(&plan),
        );
        let capacities: Vec<u64> = plan.subnets().iter().map(|s| s.capacity).collect();
        assert_eq!(vec![126, 62, 30, 14], capacities);
        assert_eq!(185, plan.total_demand());
        assert_eq!(232, plan.total_capacity());
        assert_eq!(vec![parse_ipv4net("192.168.0.240", 28)], plan.unallocated());
        assert_eq!(26, plan.subnets()[0].spare_hosts());
    }

    #[test]
    fn test_allocate_unsorted_input() {
        let plan = allocate(parse_ipv4net("10.0.0.0", 24), &[10, 100, 10, 50]).unwrap();
        let order: Vec<usize> = plan.subnets().iter().map(|s| s.input_index).collect();
        // equal demands keep their relative order
        assert_eq!(vec![1, 3, 0, 2], order);
        assert_eq!(
            vec![
                parse_ipv4net("10.0.0.0", 25),
                parse_ipv4net("10.0.0.128", 26),
                parse_ipv4net("10.0.0.192", 28),
                parse_ipv4net("10.0.0.208", 28),
            ],
            networks(&plan),
        );

        let by_input: Vec<Ipv4Network> = plan.in_input_order().iter().map(|s| s.network).collect();
        assert_eq!(
            vec![
                parse_ipv4net("10.0.0.192", 28),
                parse_ipv4net("10.0.0.0", 25),
                parse_ipv4net("10.0.0.208", 28),
                parse_ipv4net("10.0.0.128", 26),
            ],
            by_input,
        );
        assert_eq!(
            vec![parse_ipv4net("10.0.0.224", 27)],
            plan.unallocated(),
        );
    }

    #[test]
    fn test_allocate_exact_fit() {
        let plan = allocate(parse_ipv4net("192.168.0.0", 24), &[126, 126]).unwrap();
        assert_eq!(
            vec![parse_ipv4net("192.168.0.0", 25), parse_ipv4net("192.168.0.128", 25)],
            networks(&plan),
        );
        assert!(plan.unallocated().is_empty());

        let plan = allocate(parse_ipv4net("255.255.255.0", 24), &[254]).unwrap();
        assert_eq!(vec![parse_ipv4net("255.255.255.0", 24)], networks(&plan));
        assert!(plan.unallocated().is_empty());
    }

    #[test]
    fn test_allocate_smallest_blocks() {
        let plan = allocate(parse_ipv4net("10.0.0.0", 29), &[1, 2]).unwrap();
        assert_eq!(
            vec![parse_ipv4net("10.0.0.0", 30), parse_ipv4net("10.0.0.4", 30)],
            networks(&plan),
        );
    }

    #[test]
    fn test_allocate_capacity_exceeded() {
        assert_eq!(
            Err(CalcError::CapacityExceeded(CapacityShortfall::Hosts {
                requested_hosts: 300,
                requested_addresses: 384,
                available_hosts: 254,
                available_addresses: 256,
            })),
            allocate(parse_ipv4net("192.168.0.0", 24), &[100, 100, 100]),
        );
    }

    #[test]
    fn test_allocate_single_demand_too_large() {
        assert_eq!(
            Err(CalcError::DemandExceedsAddressSpace { demand: 255, maximum: 254 }),
            allocate(parse_ipv4net("192.168.0.0", 24), &[255]),
        );
        // reported even when smaller demands come first
        assert_eq!(
            Err(CalcError::DemandExceedsAddressSpace { demand: 100, maximum: 62 }),
            allocate(parse_ipv4net("10.1.2.0", 26), &[10, 100]),
        );
    }

    #[test]
    fn test_allocate_invalid_input() {
        assert_eq!(Err(CalcError::EmptyInput), allocate(parse_ipv4net("10.0.0.0", 8), &[]));
        assert_eq!(
            Err(CalcError::InvalidDemand { index: 1 }),
            allocate(parse_ipv4net("10.0.0.0", 8), &[10, 0, 5]),
        );
        assert_eq!(
            Err(CalcError::DemandExceedsAddressSpace { demand: MAX_DEMAND + 1, maximum: MAX_DEMAND }),
            allocate(parse_ipv4net("0.0.0.0", 0), &[MAX_DEMAND + 1]),
        );
    }

    #[test]
    fn test_allocate_whole_address_space() {
        let plan = allocate(parse_ipv4net("0.0.0.0", 0), &[MAX_DEMAND]).unwrap();
        assert_eq!(vec![parse_ipv4net("0.0.0.0", 0)], networks(&plan));
        assert!(plan.unallocated().is_empty());
    }

    #[test]
    fn test_block_size_for_demand() {
        assert_eq!(Some(4), block_size_for_demand(1));
        assert_eq!(Some(128), block_size_for_demand(100));
        assert_eq!(Some(1 << 32), block_size_for_demand(MAX_DEMAND));
        assert_eq!(None, block_size_for_demand(MAX_DEMAND + 1));
    }
}
