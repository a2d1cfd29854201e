use subnetcalc::consts::MAX_SUBNETS_TO_DISPLAY;
use subnetcalc::parse::parse_network;
use subnetcalc::vlsm::{allocate, VlsmPlan};

use crate::usage;
use crate::cmds::show_net::output_ipv4_network;


pub fn vlsm(args: &[String]) -> i32 {
    // subnetcalc --vlsm NETWORK HOSTCOUNT...
    if args.len() < 4 {
        usage();
        return 1;
    }

    let mut host_counts: Vec<u64> = Vec::with_capacity(args.len() - 3);
    for count_str in &args[3..] {
        // accept "50,25,10" as well as "50 25 10"
        for piece in count_str.split(',').map(|p| p.trim()).filter(|p| !p.is_empty()) {
            let host_count: u64 = match piece.parse() {
                Ok(hc) => hc,
                Err(e) => {
                    eprintln!("failed to parse host count {:?}: {}", piece, e);
                    return 1;
                },
            };
            host_counts.push(host_count);
        }
    }

    let parent = match parse_network(&args[2]) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("failed to parse network specification {:?}: {}", args[2], e);
            return 1;
        },
    };

    match allocate(parent, &host_counts) {
        Ok(plan) => {
            output_plan(&plan);
            0
        },
        Err(e) => {
            eprintln!("{}", e);
            1
        },
    }
}

fn output_plan(plan: &VlsmPlan) {
    println!("Subnet to split:");
    output_ipv4_network(plan.parent(), None);
    println!();
    println!(
        "{} subnet(s) for {} host(s); {} host address(es) allocated",
        plan.subnets().len(), plan.total_demand(), plan.total_capacity(),
    );
    println!();

    // largest demand first, which is also address order
    for subnet in plan.subnets().iter().take(MAX_SUBNETS_TO_DISPLAY as usize) {
        println!("Subnet for {} hosts (#{}):", subnet.demand, subnet.input_index + 1);
        output_ipv4_network(subnet.network, None);
        println!();
    }
    if plan.subnets().len() as u64 > MAX_SUBNETS_TO_DISPLAY {
        println!("... {} more subnet(s) not shown", plan.subnets().len() as u64 - MAX_SUBNETS_TO_DISPLAY);
        println!();
    }

    let unused = plan.unallocated();
    if !unused.is_empty() {
        println!("Unused networks:");
        for unused_subnet in unused {
            println!("{}", unused_subnet);
        }
    }
}
