mod cmds;
mod console;
mod logging;


fn usage() {
    eprintln!("Usage: subnetcalc IPADDRESS/SUBNET...");
    eprintln!("       subnetcalc -a|--address IPADDRESS[/SUBNET]...");
    eprintln!("       subnetcalc -c|--convert NOTATION");
    eprintln!("       subnetcalc -f|--flsm IPADDRESS/SUBNET COUNT|/CIDRPREFIX");
    eprintln!("       subnetcalc -v|--vlsm IPADDRESS/SUBNET HOSTCOUNT...");
    eprintln!("       subnetcalc -d|--derange IPADDRESS IPADDRESS");
    eprintln!("       subnetcalc -s|--supernet IPADDRESS/SUBNET...");
    eprintln!();
    eprintln!("SUBNET is one of: SUBNETMASK");
    eprintln!("                  CIDRPREFIX");
    eprintln!("                  -WILDCARD");
    eprintln!();
    eprintln!("NOTATION is one of: /CIDRPREFIX, SUBNETMASK or WILDCARD.");
    eprintln!();
    eprintln!("Only IPv4 is supported. Set {}=debug for diagnostics.", crate::logging::LOG_LEVEL_VAR);
}

fn do_main() -> i32 {
    crate::logging::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        usage();
        return 1;
    }

    if args[1] == "-a" || args[1] == "--address" {
        crate::cmds::address::address(&args)
    } else if args[1] == "-c" || args[1] == "--convert" {
        crate::cmds::convert::convert(&args)
    } else if args[1] == "-f" || args[1] == "--flsm" {
        crate::cmds::flsm::flsm(&args)
    } else if args[1] == "-v" || args[1] == "--vlsm" {
        crate::cmds::vlsm::vlsm(&args)
    } else if args[1] == "-d" || args[1] == "--derange" {
        crate::cmds::derange::derange(&args)
    } else if args[1] == "-s" || args[1] == "--supernet" {
        crate::cmds::supernet::supernet(&args)
    } else if args[1] == "--help" {
        usage();
        0
    } else {
        crate::cmds::show_net::show_net(&args)
    }
}

fn main() {
    std::process::exit(do_main());
}
