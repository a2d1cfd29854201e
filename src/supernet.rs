//! Aggregation of networks into summarizing CIDR blocks.


use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use log::{debug, trace};

use crate::bit_manip::prefix_pattern;
use crate::error::CalcError;
use crate::net::Ipv4Network;
use crate::parse::parse_network;


/// How two input networks overlap. CIDR blocks either nest or are disjoint, so there is no
/// partial overlap.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum OverlapKind {
    /// The same network was given twice.
    Duplicate,

    /// One network lies within the other.
    Containment,
}
impl fmt::Display for OverlapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlapKind::Duplicate => write!(f, "duplicate"),
            OverlapKind::Containment => write!(f, "containment"),
        }
    }
}

/// A pair of input networks sharing addresses.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Overlap {
    pub kind: OverlapKind,

    /// Index of the enclosing (or, for duplicates, earlier) network in the input.
    pub outer_index: usize,
    pub outer: Ipv4Network,

    /// Index of the enclosed (or, for duplicates, later) network in the input.
    pub inner_index: usize,
    pub inner: Ipv4Network,
}

/// The smallest single network enclosing every input network.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Supernet {
    pub network: Ipv4Network,

    /// Addresses covered by at least one input, each counted once.
    pub unique_addresses: u64,

    /// Addresses of the supernet not covered by any input.
    pub waste: u64,
}
impl Supernet {
    /// The waste as a percentage of the supernet's size.
    pub fn waste_percent(&self) -> f64 {
        (self.waste as f64) * 100.0 / (self.network.address_count() as f64)
    }
}

/// The bits shared by every input network.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CommonPrefix {
    pub bits: usize,
    pub network: Ipv4Network,

    /// `N` for each shared bit and `H` for each varying bit, in dotted octets.
    pub pattern: String,

    /// The network's base address in dotted binary.
    pub binary: String,
}
impl CommonPrefix {
    fn new(network: Ipv4Network) -> CommonPrefix {
        CommonPrefix {
            bits: network.cidr_prefix(),
            network,
            pattern: prefix_pattern(network.cidr_prefix(), 'N', 'H'),
            binary: network.base_addr().to_binary_string(),
        }
    }
}

/// Everything [`summarize`] finds out about a list of networks.
#[derive(Clone, Debug, PartialEq)]
pub struct SupernetReport {
    pub inputs: Vec<Ipv4Network>,

    /// Pairs of inputs that share addresses. Overlaps are not errors; the shared addresses are
    /// counted once everywhere else in the report.
    pub overlaps: Vec<Overlap>,

    /// Addresses that more than one input covers, counted once per surplus copy.
    pub overlapping_addresses: u64,

    /// The inputs after merging sibling blocks, in ascending order.
    pub aggregated: Vec<Ipv4Network>,

    pub supernet: Supernet,
    pub common_prefix: CommonPrefix,
}
impl SupernetReport {
    pub fn has_overlap(&self) -> bool {
        !self.overlaps.is_empty()
    }

    pub fn total_input_addresses(&self) -> u64 {
        self.inputs.iter().map(|n| n.address_count()).sum()
    }
}


/// Parses a list of network specifications, failing on the first one that cannot be parsed.
pub fn parse_networks<S: AsRef<str>>(specs: &[S]) -> Result<Vec<Ipv4Network>, CalcError> {
    let mut ret = Vec::with_capacity(specs.len());
    for (index, spec) in specs.iter().enumerate() {
        match parse_network(spec.as_ref()) {
            Ok(net) => ret.push(net),
            Err(CalcError::InvalidNetwork { input, cause }) => {
                return Err(CalcError::InvalidNetworkInInput { index, input, cause });
            },
            Err(other) => return Err(other),
        }
    }
    Ok(ret)
}

/// Lists every pair of networks that share addresses.
pub fn find_overlaps(networks: &[Ipv4Network]) -> Vec<Overlap> {
    let mut ret = Vec::new();
    for i in 0..networks.len() {
        for j in (i+1)..networks.len() {
            let (one, other) = (networks[i], networks[j]);
            if !one.intersects(&other) {
                continue;
            }

            let overlap = if one == other {
                Overlap { kind: OverlapKind::Duplicate, outer_index: i, outer: one, inner_index: j, inner: other }
            } else if one.is_superset_of(&other) {
                Overlap { kind: OverlapKind::Containment, outer_index: i, outer: one, inner_index: j, inner: other }
            } else {
                Overlap { kind: OverlapKind::Containment, outer_index: j, outer: other, inner_index: i, inner: one }
            };
            ret.push(overlap);
        }
    }
    ret
}

/// Removes duplicates and networks that lie within other networks of the list. The result is
/// pairwise disjoint and sorted in ascending order.
pub fn remove_covered(networks: &[Ipv4Network]) -> Vec<Ipv4Network> {
    let mut sorted: Vec<Ipv4Network> = networks.to_vec();
    // a network sorts before everything it contains
    sorted.sort_unstable();

    let mut ret: Vec<Ipv4Network> = Vec::with_capacity(sorted.len());
    for net in sorted {
        if let Some(last) = ret.last() {
            if last.is_superset_of(&net) {
                continue;
            }
        }
        ret.push(net);
    }
    ret
}

/// Counts the addresses covered by at least one of the networks.
pub fn unique_address_count(networks: &[Ipv4Network]) -> u64 {
    remove_covered(networks).iter()
        .map(|n| n.address_count())
        .sum()
}

/// Merges sibling blocks (two blocks of equal size that together form their parent) until no two
/// siblings remain. Covered networks are removed first.
///
/// Only exact siblings are merged, so the result covers exactly the same addresses as the input.
pub fn aggregate(networks: &[Ipv4Network]) -> Vec<Ipv4Network> {
    let mut blocks: BTreeSet<Ipv4Network> = remove_covered(networks).into_iter().collect();
    let mut queue: VecDeque<Ipv4Network> = blocks.iter().copied().collect();

    while let Some(net) = queue.pop_front() {
        if !blocks.contains(&net) {
            // already merged into a larger block
            continue;
        }
        let (sibling, parent) = match (net.sibling(), net.parent()) {
            (Some(s), Some(p)) => (s, p),
            _ => continue,
        };
        if !blocks.contains(&sibling) {
            continue;
        }

        trace!("merging {} and {} into {}", net, sibling, parent);
        blocks.remove(&net);
        blocks.remove(&sibling);
        blocks.insert(parent);
        queue.push_back(parent);
    }

    blocks.into_iter().collect()
}

/// Finds the smallest network that contains every input network in full.
pub fn find_supernet(networks: &[Ipv4Network]) -> Result<Supernet, CalcError> {
    let lowest_base = networks.iter()
        .map(|n| n.base_addr())
        .min()
        .ok_or(CalcError::EmptyInput)?;
    let highest_addr = networks.iter()
        .map(|n| n.last_addr_of_subnet())
        .max()
        .ok_or(CalcError::EmptyInput)?;

    // the prefix is the run of leading bits the two extremes agree on
    let shared_bits = (lowest_base ^ highest_addr).value().leading_zeros() as usize;
    let network = Ipv4Network::new_with_prefix(lowest_base, shared_bits);

    let unique_addresses = unique_address_count(networks);
    Ok(Supernet {
        network,
        unique_addresses,
        waste: network.address_count() - unique_addresses,
    })
}

/// Analyzes a list of networks: overlaps, sibling aggregation, the single enclosing supernet and
/// the prefix bits all of them share.
///
/// Fails with [`CalcError::EmptyInput`] if the list is empty.
pub fn summarize(networks: &[Ipv4Network]) -> Result<SupernetReport, CalcError> {
    if networks.is_empty() {
        return Err(CalcError::EmptyInput);
    }
    debug!("summarizing {} network(s)", networks.len());

    let overlaps = find_overlaps(networks);
    let total: u64 = networks.iter().map(|n| n.address_count()).sum();
    let unique = unique_address_count(networks);
    if !overlaps.is_empty() {
        debug!("{} overlapping pair(s); {} address(es) covered more than once", overlaps.len(), total - unique);
    }

    let aggregated = aggregate(networks);
    let supernet = find_supernet(networks)?;
    debug!(
        "{} network(s) aggregate into {} block(s); supernet {} wastes {} address(es)",
        networks.len(), aggregated.len(), supernet.network, supernet.waste,
    );

    Ok(SupernetReport {
        inputs: networks.to_vec(),
        overlaps,
        overlapping_addresses: total - unique,
        aggregated,
        supernet,
        common_prefix: CommonPrefix::new(supernet.network),
    })
}
