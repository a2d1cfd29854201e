use subnetcalc::notation::convert as convert_notation;

use crate::usage;
use crate::cmds::show_net::output_initial_columns;


pub fn convert(args: &[String]) -> i32 {
    // subnetcalc --convert NOTATION
    if args.len() != 3 {
        usage();
        return 1;
    }

    let conv = match convert_notation(&args[2]) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        },
    };

    output_initial_columns("Input:", args[2].trim());
    println!("({})", conv.kind);
    output_initial_columns("CIDR:", &format!("/{}", conv.prefix));
    println!();
    output_initial_columns("Netmask:", &conv.subnet_mask.to_string());
    println!();
    output_initial_columns("Wildcard:", &conv.wildcard_mask.to_string());
    println!();
    output_initial_columns("Binary:", &conv.binary);
    println!();
    output_initial_columns("Hex:", &conv.hex);
    println!();
    output_initial_columns("Net bits:", &conv.network_bits.to_string());
    println!();
    output_initial_columns("Host bits:", &conv.host_bits.to_string());
    println!();
    output_initial_columns("Addresses:", &conv.max_addresses.to_string());
    println!();
    output_initial_columns("Hosts/Net:", &conv.usable_hosts.to_string());
    println!();

    0
}
