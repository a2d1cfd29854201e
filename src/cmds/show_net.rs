use subnetcalc::addr::{AddressClass, Ipv4Address};
use subnetcalc::bit_manip::bytes_to_binary;
use subnetcalc::net::Ipv4Network;
use subnetcalc::parse::parse_netspec;

use crate::console::{Color, write_in_color};


const LABEL_COLOR: Color = Color::White;
const IP_ADDRESS_COLOR: Color = Color::Blue;
const HOST_BITS_COLOR: Color = Color::Yellow;
const NET_BITS_COLOR: Color = Color::Green;
const MASK_BITS_COLOR: Color = Color::Red;
const CLASS_BITS_COLOR: Color = Color::Magenta;
const ADDR_SEP_COLOR: Color = Color::White;

const LABEL_WIDTH: isize = 11;
const ADDRESS_WIDTH: isize = 21;


pub fn show_net(args: &[String]) -> i32 {
    // subnetcalc NETWORK...
    let mut specs = Vec::new();
    for arg in &args[1..] {
        match parse_netspec(arg) {
            Ok(spec) => specs.push(spec),
            Err(e) => {
                eprintln!("{}", e);
                return 1;
            },
        };
    }

    let mut is_first = true;
    for (addr, net) in &specs {
        if !is_first {
            println!();
        }
        is_first = false;

        output_ipv4_network(*net, Some(*addr));
    }

    0
}

/// The number of leading bits that determine the legacy class.
fn class_bit_count(class: AddressClass) -> usize {
    match class {
        AddressClass::A => 1,
        AddressClass::B => 2,
        AddressClass::C => 3,
        AddressClass::D|AddressClass::E => 4,
    }
}

/// Whether the network prefix covers all bits that determine the address's legacy class.
fn is_classful(addr: Ipv4Address, cidr_prefix: usize) -> bool {
    cidr_prefix >= class_bit_count(addr.class())
}

pub(crate) fn output_initial_columns(label: &str, address: &str) {
    write_in_color(label, Some(LABEL_COLOR), LABEL_WIDTH);
    write_in_color(address, Some(IP_ADDRESS_COLOR), ADDRESS_WIDTH);
}

/// Outputs an address bit by bit. With a prefix, network bits and host bits get different colors;
/// with `color_class`, the bits that determine the legacy class get their own color.
fn output_binary_address(
    addr: Ipv4Address,
    cidr_prefix: Option<usize>,
    color_class: bool,
    override_color: Option<Color>,
) {
    let class_bits = match cidr_prefix {
        Some(pfx) if color_class && is_classful(addr, pfx) => class_bit_count(addr.class()),
        _ => 0,
    };

    let bits = bytes_to_binary(&addr.to_bytes());
    for (i, bit) in bits.chars().enumerate() {
        if i > 0 && i % 8 == 0 {
            // add separator (dot)
            write_in_color(".", Some(ADDR_SEP_COLOR), 0);
        }

        let color = if let Some(oc) = override_color {
            oc
        } else if i < class_bits {
            CLASS_BITS_COLOR
        } else {
            match cidr_prefix {
                Some(pfx) if i < pfx => NET_BITS_COLOR,
                _ => HOST_BITS_COLOR,
            }
        };
        write_in_color(bit.to_string(), Some(color), 0);
    }
}

/// Outputs and dissects information about an IPv4 network. If the address the network was given
/// with is known, it is dissected too.
pub fn output_ipv4_network(net: Ipv4Network, addr: Option<Ipv4Address>) {
    if let Some(a) = addr {
        output_initial_columns("Address:", &a.to_string());
        output_binary_address(a, Some(net.cidr_prefix()), false, None);
        println!();

        let netmask_addr_str = format!("{} = {}", net.subnet_mask(), net.cidr_prefix());
        output_initial_columns("Netmask:", &netmask_addr_str);
        output_binary_address(net.subnet_mask(), None, false, Some(MASK_BITS_COLOR));
        println!();

        output_initial_columns("Wildcard:", &net.cisco_wildcard().to_string());
        output_binary_address(net.cisco_wildcard(), None, false, None);
        println!();

        write_in_color("=>", Some(LABEL_COLOR), 0);
        println!();
    }

    output_initial_columns("Network:", &net.to_string());
    output_binary_address(net.base_addr(), Some(net.cidr_prefix()), true, None);
    println!();

    output_initial_columns("HostMin:", &net.first_host_addr().to_string());
    output_binary_address(net.first_host_addr(), None, false, None);
    println!();
    output_initial_columns("HostMax:", &net.last_host_addr().to_string());
    output_binary_address(net.last_host_addr(), None, false, None);
    println!();

    output_initial_columns("Broadcast:", &net.broadcast_addr().to_string());
    output_binary_address(net.broadcast_addr(), None, false, None);
    println!();

    output_initial_columns("Hosts/Net:", &net.host_count().to_string());
    if is_classful(net.base_addr(), net.cidr_prefix()) {
        write_in_color(net.base_addr().class().to_string(), Some(CLASS_BITS_COLOR), 0);
    }
    println!();
}
