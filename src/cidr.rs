use crate::addr::Ipv4Address;
use crate::consts::{HOST_PREFIX, IPV4_BITS, NETWORK_AND_BROADCAST_OVERHEAD, POINT_TO_POINT_PREFIX};
use crate::error::{CalcError, PrefixProblem};


/// Returns the 32-bit mask with the top `prefix` bits set. Prefixes above 32 saturate.
pub(crate) fn mask_value(prefix: usize) -> u32 {
    let host_bits = IPV4_BITS - prefix.min(IPV4_BITS);
    // checked_shl refuses a shift by 32, which is exactly the /0 case
    u32::MAX.checked_shl(host_bits as u32).unwrap_or(0)
}

/// Converts a CIDR prefix length into the equivalent dotted subnet mask.
pub fn mask_from_prefix(prefix: usize) -> Result<Ipv4Address, CalcError> {
    if prefix > IPV4_BITS {
        return Err(CalcError::InvalidPrefix {
            prefix,
            problem: PrefixProblem::OutOfRange(IPV4_BITS),
        });
    }
    Ok(Ipv4Address::new(mask_value(prefix)))
}

/// Whether the mask is a run of ones followed by a run of zeros.
pub fn is_contiguous_mask(mask: Ipv4Address) -> bool {
    mask.leading_ones() + mask.trailing_zeros() == 32
}

/// Converts a dotted subnet mask into its CIDR prefix length.
///
/// Fails with [`CalcError::InvalidMask`] unless the mask is contiguous.
pub fn prefix_from_mask(mask: Ipv4Address) -> Result<usize, CalcError> {
    if !is_contiguous_mask(mask) {
        return Err(CalcError::InvalidMask(mask));
    }
    Ok(mask.leading_ones() as usize)
}

/// Converts a subnet mask into a Cisco-style wildcard mask (and back).
pub fn wildcard_from_mask(mask: Ipv4Address) -> Ipv4Address {
    mask.bitwise_negate()
}

/// The number of addresses in a block with the given prefix (2^(32 - prefix)).
pub fn address_count_for_prefix(prefix: usize) -> u64 {
    1u64 << (IPV4_BITS - prefix.min(IPV4_BITS))
}

/// The number of usable host addresses in a block with the given prefix.
///
/// The network and broadcast addresses are not usable, except on /31 point-to-point links (both
/// addresses usable) and /32 host routes (the one address is usable).
pub fn usable_hosts_for_prefix(prefix: usize) -> u64 {
    match prefix {
        POINT_TO_POINT_PREFIX => 2,
        p if p >= HOST_PREFIX => 1,
        p => address_count_for_prefix(p) - NETWORK_AND_BROADCAST_OVERHEAD,
    }
}

/// Finds the longest prefix whose block still holds `demand` hosts besides the network and
/// broadcast address, i.e. the smallest P with `2^(32 - P) - 2 >= demand`.
///
/// Returns `None` if no IPv4 block is large enough.
pub fn prefix_for_host_demand(demand: u64) -> Option<usize> {
    let needed = demand.checked_add(NETWORK_AND_BROADCAST_OVERHEAD)?;
    // bits needed to count up to needed - 1
    let host_bits = (u64::BITS - (needed - 1).leading_zeros()) as usize;
    if host_bits > IPV4_BITS {
        None
    } else {
        Some(IPV4_BITS - host_bits)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn mask(value: u32) -> Ipv4Address {
        Ipv4Address::new(value)
    }

    #[test]
    fn test_mask_from_prefix() {
        assert_eq!(Ok(mask(0x00000000)), mask_from_prefix(0));
        assert_eq!(Ok(mask(0x80000000)), mask_from_prefix(1));
        assert_eq!(Ok(mask(0xFF000000)), mask_from_prefix(8));
        assert_eq!(Ok(mask(0xFFFFF000)), mask_from_prefix(20));
        assert_eq!(Ok(mask(0xFFFFFF00)), mask_from_prefix(24));
        assert_eq!(Ok(mask(0xFFFFFFFC)), mask_from_prefix(30));
        assert_eq!(Ok(mask(0xFFFFFFFE)), mask_from_prefix(31));
        assert_eq!(Ok(mask(0xFFFFFFFF)), mask_from_prefix(32));
        assert_eq!(
            Err(CalcError::InvalidPrefix { prefix: 33, problem: PrefixProblem::OutOfRange(32) }),
            mask_from_prefix(33),
        );
    }

    #[test]
    fn test_prefix_from_mask() {
        assert_eq!(Ok(0), prefix_from_mask(mask(0x00000000)));
        assert_eq!(Ok(17), prefix_from_mask(mask(0xFFFF8000)));
        assert_eq!(Ok(24), prefix_from_mask(mask(0xFFFFFF00)));
        assert_eq!(Ok(32), prefix_from_mask(mask(0xFFFFFFFF)));

        assert_eq!(Err(CalcError::InvalidMask(mask(0xFF00FF00))), prefix_from_mask(mask(0xFF00FF00)));
        assert_eq!(Err(CalcError::InvalidMask(mask(0x000000FF))), prefix_from_mask(mask(0x000000FF)));
        assert_eq!(Err(CalcError::InvalidMask(mask(0xFFFFFF01))), prefix_from_mask(mask(0xFFFFFF01)));
    }

    #[test]
    fn test_mask_round_trip() {
        for prefix in 0..=32 {
            let subnet_mask = mask_from_prefix(prefix).unwrap();
            assert_eq!(Ok(prefix), prefix_from_mask(subnet_mask));

            let wildcard = wildcard_from_mask(subnet_mask);
            assert_eq!(0, subnet_mask.value() & wildcard.value());
            assert_eq!(u32::MAX, subnet_mask.value() | wildcard.value());
            assert_eq!(subnet_mask, wildcard_from_mask(wildcard));
        }
    }

    #[test]
    fn test_counts() {
        assert_eq!(4294967296, address_count_for_prefix(0));
        assert_eq!(256, address_count_for_prefix(24));
        assert_eq!(1, address_count_for_prefix(32));

        assert_eq!(4294967294, usable_hosts_for_prefix(0));
        assert_eq!(254, usable_hosts_for_prefix(24));
        assert_eq!(2, usable_hosts_for_prefix(30));
        assert_eq!(2, usable_hosts_for_prefix(31));
        assert_eq!(1, usable_hosts_for_prefix(32));
    }

    #[test]
    fn test_prefix_for_host_demand() {
        assert_eq!(Some(30), prefix_for_host_demand(1));
        assert_eq!(Some(30), prefix_for_host_demand(2));
        assert_eq!(Some(29), prefix_for_host_demand(3));
        assert_eq!(Some(28), prefix_for_host_demand(14));
        assert_eq!(Some(27), prefix_for_host_demand(15));
        assert_eq!(Some(25), prefix_for_host_demand(100));
        assert_eq!(Some(24), prefix_for_host_demand(254));
        assert_eq!(Some(23), prefix_for_host_demand(255));
        assert_eq!(Some(0), prefix_for_host_demand(4294967294));
        assert_eq!(None, prefix_for_host_demand(4294967295));
        assert_eq!(None, prefix_for_host_demand(u64::MAX));
    }
}
