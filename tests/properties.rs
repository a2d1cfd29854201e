//! Property-based tests for the address-space calculations

use proptest::prelude::*;
use subnetcalc::cidr::{mask_from_prefix, prefix_from_mask, wildcard_from_mask};
use subnetcalc::flsm::split_by_prefix;
use subnetcalc::range::range_to_subnets;
use subnetcalc::supernet::{aggregate, unique_address_count};
use subnetcalc::vlsm::allocate;
use subnetcalc::{CalcError, Ipv4Address, Ipv4Network};

// Generate arbitrary networks
prop_compose! {
    fn arb_network(min_prefix: usize, max_prefix: usize)(
        value in any::<u32>(),
        prefix in min_prefix..=max_prefix,
    ) -> Ipv4Network {
        Ipv4Network::new_with_prefix(Ipv4Address::new(value), prefix)
    }
}

// Generate arbitrary inclusive ranges
prop_compose! {
    fn arb_range()(one in any::<u32>(), other in any::<u32>()) -> (Ipv4Address, Ipv4Address) {
        (Ipv4Address::new(one.min(other)), Ipv4Address::new(one.max(other)))
    }
}

fn first(net: &Ipv4Network) -> u64 {
    u64::from(net.base_addr().value())
}

fn last(net: &Ipv4Network) -> u64 {
    u64::from(net.last_addr_of_subnet().value())
}

proptest! {
    #[test]
    fn test_mask_round_trip(prefix in 0usize..=32) {
        let mask = mask_from_prefix(prefix).unwrap();
        prop_assert_eq!(prefix, prefix_from_mask(mask).unwrap());

        let wildcard = wildcard_from_mask(mask);
        prop_assert_eq!(!mask.value(), wildcard.value());
        prop_assert_eq!(mask, wildcard_from_mask(wildcard));
    }

    #[test]
    fn test_non_contiguous_masks_rejected(value in any::<u32>()) {
        let contiguous = value.leading_ones() + value.trailing_zeros() == 32;
        let result = prefix_from_mask(Ipv4Address::new(value));
        if contiguous {
            prop_assert_eq!(Ok(value.leading_ones() as usize), result);
        } else {
            prop_assert_eq!(Err(CalcError::InvalidMask(Ipv4Address::new(value))), result);
        }
    }

    #[test]
    fn test_flsm_coverage(parent in arb_network(8, 30), extra_bits in 1usize..=8) {
        let new_prefix = (parent.cidr_prefix() + extra_bits).min(32);
        prop_assume!(new_prefix > parent.cidr_prefix());

        let plan = split_by_prefix(parent, new_prefix).unwrap();
        let children: Vec<Ipv4Network> = plan.subnets().map(|s| s.network).collect();
        prop_assert_eq!(1usize << (new_prefix - parent.cidr_prefix()), children.len());

        // contiguous, ascending, gap-free, starting and ending with the parent
        prop_assert_eq!(first(&parent), first(&children[0]));
        prop_assert_eq!(last(&parent), last(children.last().unwrap()));
        for pair in children.windows(2) {
            prop_assert_eq!(last(&pair[0]) + 1, first(&pair[1]));
        }
        for child in &children {
            prop_assert_eq!(new_prefix, child.cidr_prefix());
        }
    }

    #[test]
    fn test_vlsm_non_overlap(
        parent in arb_network(8, 24),
        demands in prop::collection::vec(1u64..5000, 1..12),
    ) {
        match allocate(parent, &demands) {
            Ok(plan) => {
                prop_assert_eq!(demands.len(), plan.subnets().len());
                for subnet in plan.subnets() {
                    prop_assert!(parent.is_superset_of(&subnet.network));
                    prop_assert!(subnet.capacity >= subnet.demand);
                    prop_assert_eq!(demands[subnet.input_index], subnet.demand);
                    let size = subnet.network.address_count();
                    prop_assert_eq!(0, first(&subnet.network) % size);
                }
                for (i, one) in plan.subnets().iter().enumerate() {
                    for other in &plan.subnets()[i+1..] {
                        prop_assert!(!one.network.intersects(&other.network));
                        prop_assert!(one.demand >= other.demand);
                    }
                }

                let unallocated = unique_address_count(&plan.unallocated());
                let allocated: u64 = plan.subnets().iter().map(|s| s.network.address_count()).sum();
                prop_assert_eq!(parent.address_count(), allocated + unallocated);
            },
            Err(CalcError::DemandExceedsAddressSpace { demand, maximum }) => {
                prop_assert_eq!(parent.host_count(), maximum);
                let block = subnetcalc::vlsm::block_size_for_demand(demand).unwrap();
                prop_assert!(block > parent.address_count());
            },
            Err(CalcError::CapacityExceeded(_)) => {
                let needed: u64 = demands.iter()
                    .map(|d| subnetcalc::vlsm::block_size_for_demand(*d).unwrap())
                    .sum();
                prop_assert!(needed > parent.address_count());
            },
            Err(other) => {
                prop_assert!(false, "unexpected error {:?}", other);
            },
        }
    }

    #[test]
    fn test_range_exact_and_aligned((start, end) in arb_range()) {
        let blocks = range_to_subnets(start, end).unwrap();
        prop_assert!(!blocks.is_empty());
        prop_assert!(blocks.len() <= 62);

        prop_assert_eq!(u64::from(start.value()), first(&blocks[0]));
        prop_assert_eq!(u64::from(end.value()), last(blocks.last().unwrap()));
        for pair in blocks.windows(2) {
            prop_assert_eq!(last(&pair[0]) + 1, first(&pair[1]));
        }
        for block in &blocks {
            prop_assert_eq!(0, first(block) % block.address_count());
        }
    }

    #[test]
    fn test_sibling_pairs_merge(net in arb_network(1, 32)) {
        let sibling = net.sibling().unwrap();
        let aggregated = aggregate(&[net, sibling]);
        prop_assert_eq!(vec![net.parent().unwrap()], aggregated);
    }

    #[test]
    fn test_aggregation_preserves_addresses(
        networks in prop::collection::vec(arb_network(20, 28), 1..16),
    ) {
        let aggregated = aggregate(&networks);
        prop_assert_eq!(unique_address_count(&networks), unique_address_count(&aggregated));
        for pair in aggregated.windows(2) {
            prop_assert!(last(&pair[0]) < first(&pair[1]));
        }
        for net in &networks {
            prop_assert!(aggregated.iter().any(|agg| agg.is_superset_of(net)));
        }
    }
}
