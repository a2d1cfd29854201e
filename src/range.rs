//! Decomposition of address ranges into CIDR blocks.


use log::trace;

use crate::addr::Ipv4Address;
use crate::consts::IPV4_BITS;
use crate::error::CalcError;
use crate::net::Ipv4Network;


/// An inclusive range of IPv4 addresses whose start does not lie after its end.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AddressRange {
    start: Ipv4Address,
    end: Ipv4Address,
}
impl AddressRange {
    /// Fails with [`CalcError::InvalidRange`] if `start` lies after `end`.
    pub fn new(start: Ipv4Address, end: Ipv4Address) -> Result<AddressRange, CalcError> {
        if start > end {
            return Err(CalcError::InvalidRange { start, end });
        }
        Ok(AddressRange { start, end })
    }

    pub fn start(&self) -> Ipv4Address { self.start }
    pub fn end(&self) -> Ipv4Address { self.end }

    pub fn address_count(&self) -> u64 {
        u64::from(self.end.value()) - u64::from(self.start.value()) + 1
    }

    pub fn contains(&self, addr: &Ipv4Address) -> bool {
        self.start <= *addr && *addr <= self.end
    }

    /// The fewest aligned CIDR blocks that together cover exactly this range, in ascending order.
    pub fn subnets(&self) -> Vec<Ipv4Network> {
        let mut ret = Vec::new();

        let mut first_addr = u64::from(self.start.value());
        let last_addr = u64::from(self.end.value());
        while first_addr <= last_addr {
            // the block may not be larger than the alignment of its base address...
            let mut host_bits = first_addr.trailing_zeros().min(IPV4_BITS as u32);
            // ...and must not run past the end of the range
            while first_addr + (1u64 << host_bits) - 1 > last_addr {
                host_bits -= 1;
            }

            // first_addr <= last_addr <= u32::MAX
            let block = Ipv4Network::new_with_prefix(
                Ipv4Address::new(first_addr as u32),
                IPV4_BITS - host_bits as usize,
            );
            trace!("range block {}", block);
            ret.push(block);

            first_addr += 1u64 << host_bits;
        }

        ret
    }
}

/// Converts the inclusive range from `start` to `end` into the fewest aligned CIDR blocks that
/// cover it exactly, in ascending order.
///
/// Fails with [`CalcError::InvalidRange`] if `start` lies after `end`.
pub fn range_to_subnets(start: Ipv4Address, end: Ipv4Address) -> Result<Vec<Ipv4Network>, CalcError> {
    Ok(AddressRange::new(start, end)?.subnets())
}
