pub mod address;
pub mod convert;
pub mod derange;
pub mod flsm;
pub mod show_net;
pub mod supernet;
pub mod vlsm;
