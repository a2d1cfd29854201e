use subnetcalc::supernet::{parse_networks, summarize, OverlapKind, SupernetReport};

use crate::usage;
use crate::console::{Color, write_in_color};


const HEADING_COLOR: Color = Color::White;
const NOTE_COLOR: Color = Color::Yellow;
const BLOCK_COLOR: Color = Color::Blue;


pub fn supernet(args: &[String]) -> i32 {
    // subnetcalc --supernet NETWORK...
    if args.len() < 3 {
        usage();
        return 1;
    }

    let networks = match parse_networks(&args[2..]) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        },
    };
    match summarize(&networks) {
        Ok(report) => {
            output_report(&report);
            0
        },
        Err(e) => {
            eprintln!("{}", e);
            1
        },
    }
}

fn heading(text: &str) {
    write_in_color(text, Some(HEADING_COLOR), 0);
    println!();
}

fn output_report(report: &SupernetReport) {
    heading(&format!("Input networks ({}):", report.inputs.len()));
    for (i, net) in report.inputs.iter().enumerate() {
        println!("  {}. {} ({} addresses)", i + 1, net, net.address_count());
    }
    println!();

    if report.has_overlap() {
        for overlap in &report.overlaps {
            let text = match overlap.kind {
                OverlapKind::Duplicate => format!(
                    "Note: #{} and #{} are the same network ({})",
                    overlap.outer_index + 1, overlap.inner_index + 1, overlap.outer,
                ),
                OverlapKind::Containment => format!(
                    "Note: #{} ({}) lies within #{} ({})",
                    overlap.inner_index + 1, overlap.inner, overlap.outer_index + 1, overlap.outer,
                ),
            };
            write_in_color(text, Some(NOTE_COLOR), 0);
            println!();
        }
        write_in_color(
            format!("Note: {} address(es) are covered more than once and are counted once", report.overlapping_addresses),
            Some(NOTE_COLOR),
            0,
        );
        println!();
        println!();
    }

    heading(&format!("Aggregated ({} CIDR block(s)):", report.aggregated.len()));
    for block in &report.aggregated {
        write_in_color(format!("  {}", block), Some(BLOCK_COLOR), 22);
        println!("({} addresses)", block.address_count());
    }
    println!();

    let supernet = &report.supernet;
    heading("Single supernet:");
    write_in_color(format!("  {}", supernet.network), Some(BLOCK_COLOR), 22);
    println!("({} addresses)", supernet.network.address_count());
    println!(
        "  Waste: {} address(es) ({:.1}%)",
        supernet.waste, supernet.waste_percent(),
    );
    println!();

    let common = &report.common_prefix;
    heading("Common prefix:");
    println!("  Bits:     {}", common.bits);
    println!("  Network:  {}", common.network);
    println!("  Pattern:  {}", common.pattern);
    println!("  Binary:   {}", common.binary);
    println!(
        "  Range:    {} - {}",
        common.network.base_addr(), common.network.last_addr_of_subnet(),
    );
}
