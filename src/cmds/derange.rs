use subnetcalc::parse::parse_addr;
use subnetcalc::range::AddressRange;

use crate::usage;


pub fn derange(args: &[String]) -> i32 {
    // subnetcalc --derange START END
    if args.len() != 4 {
        usage();
        return 1;
    }

    let start = match parse_addr(&args[2]) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("failed to parse start address: {}", e);
            return 1;
        },
    };
    let end = match parse_addr(&args[3]) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("failed to parse end address: {}", e);
            return 1;
        },
    };

    let range = match AddressRange::new(start, end) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            return 1;
        },
    };

    let subnets = range.subnets();
    println!(
        "{} - {} ({} addresses, {} block(s)):",
        range.start(), range.end(), range.address_count(), subnets.len(),
    );
    for subnet in subnets {
        println!("{}", subnet);
    }

    0
}
