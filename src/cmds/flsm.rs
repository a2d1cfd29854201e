use subnetcalc::consts::MAX_SUBNETS_TO_DISPLAY;
use subnetcalc::flsm::{FlsmPlan, FlsmSubnet, split_by_count, split_by_prefix};
use subnetcalc::parse::parse_network;

use crate::usage;
use crate::console::{Color, write_in_color};


const INDEX_COLOR: Color = Color::DarkGray;
const NETWORK_COLOR: Color = Color::Blue;
const HOST_RANGE_COLOR: Color = Color::Yellow;
const BROADCAST_COLOR: Color = Color::Cyan;


pub fn flsm(args: &[String]) -> i32 {
    // subnetcalc --flsm NETWORK COUNT|/PREFIX
    if args.len() != 4 {
        usage();
        return 1;
    }

    let parent = match parse_network(&args[2]) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        },
    };

    let split_str = args[3].trim();
    let plan_res = if let Some(prefix_str) = split_str.strip_prefix('/') {
        match prefix_str.parse() {
            Ok(prefix) => split_by_prefix(parent, prefix),
            Err(e) => {
                eprintln!("failed to parse prefix {:?}: {}", split_str, e);
                return 1;
            },
        }
    } else {
        match split_str.parse() {
            Ok(count) => split_by_count(parent, count),
            Err(e) => {
                eprintln!("failed to parse subnet count {:?}: {}", split_str, e);
                return 1;
            },
        }
    };
    let plan = match plan_res {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        },
    };

    output_plan(&plan);
    0
}

fn output_plan(plan: &FlsmPlan) {
    println!("Network to split:   {}", plan.parent());
    println!("Subnet prefix:      /{} ({})", plan.new_prefix(), plan.subnet_mask());
    println!("Subnets:            {}", plan.subnet_count());
    println!("Unused subnets:     {}", plan.unused_subnets());
    println!("Addresses/Subnet:   {}", plan.addresses_per_subnet());
    println!("Hosts/Subnet:       {}", plan.usable_hosts_per_subnet());
    println!();

    for subnet in plan.subnets().take(MAX_SUBNETS_TO_DISPLAY as usize) {
        output_subnet(&subnet);
    }
    if plan.subnet_count() > MAX_SUBNETS_TO_DISPLAY {
        println!(
            "... {} more subnet(s) not shown",
            plan.subnet_count() - MAX_SUBNETS_TO_DISPLAY,
        );
    }
}

fn output_subnet(subnet: &FlsmSubnet) {
    let net = subnet.network;
    write_in_color(format!("{}.", subnet.index), Some(INDEX_COLOR), -8);
    write_in_color(" ", None, 0);
    write_in_color(net.to_string(), Some(NETWORK_COLOR), 20);
    write_in_color(
        format!("{} - {}", net.first_host_addr(), net.last_host_addr()),
        Some(HOST_RANGE_COLOR),
        34,
    );
    write_in_color(net.broadcast_addr().to_string(), Some(BROADCAST_COLOR), 17);
    println!();
}
