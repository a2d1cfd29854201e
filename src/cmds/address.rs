use subnetcalc::addr::Ipv4Address;
use subnetcalc::bit_manip::binary_with_boundary;
use subnetcalc::net::Ipv4Network;
use subnetcalc::parse::{parse_addr, parse_netspec};

use crate::usage;
use crate::cmds::show_net::output_initial_columns;


pub fn address(args: &[String]) -> i32 {
    // subnetcalc --address ADDRESS[/SUBNET]...
    if args.len() < 3 {
        usage();
        return 1;
    }

    let mut parsed: Vec<(Ipv4Address, Option<Ipv4Network>)> = Vec::with_capacity(args.len() - 2);
    for arg in &args[2..] {
        let entry = if arg.contains('/') {
            parse_netspec(arg).map(|(addr, net)| (addr, Some(net)))
        } else {
            parse_addr(arg).map(|addr| (addr, None))
        };
        match entry {
            Ok(e) => parsed.push(e),
            Err(e) => {
                eprintln!("{}", e);
                return 1;
            },
        }
    }

    let mut is_first = true;
    for (addr, net) in parsed {
        if !is_first {
            println!();
        }
        is_first = false;

        output_address(addr, net);
    }

    0
}

fn output_address(addr: Ipv4Address, net: Option<Ipv4Network>) {
    output_initial_columns("Address:", &addr.to_string());
    println!("{}", addr.to_binary_string());
    output_initial_columns("Hex:", &addr.to_hex_string());
    println!();
    output_initial_columns("Class:", &addr.class().to_string());
    println!();
    output_initial_columns("Kind:", &addr.kind().to_string());
    println!();

    if let Some(n) = net {
        output_initial_columns("Network:", &n.to_string());
        println!("{}", binary_with_boundary(addr, n.cidr_prefix()));

        // the network was derived from the address, so it always contains it
        if let Some(pos) = n.host_position(&addr) {
            let role = if n.host_count() == n.address_count() {
                "host"
            } else if addr == n.base_addr() {
                "network address"
            } else if addr == n.broadcast_addr() {
                "broadcast address"
            } else {
                "host"
            };
            output_initial_columns("Position:", role);
            println!(
                "{} after the network address, {} before the broadcast address",
                pos.from_start, pos.from_end,
            );
        }
    }
}
