//! IPv4 address-space arithmetic: mask notations, equal-sized and demand-sized subnetting, range
//! decomposition and network aggregation.
//!
//! Every operation is a pure function of its inputs. Diagnostics go through the [`log`] facade;
//! installing a logger is up to the caller.


pub mod addr;
pub mod bit_manip;
pub mod cidr;
pub mod consts;
pub mod error;
pub mod flsm;
pub mod net;
pub mod notation;
pub mod parse;
pub mod range;
pub mod supernet;
pub mod vlsm;


pub use crate::addr::Ipv4Address;
pub use crate::error::CalcError;
pub use crate::net::Ipv4Network;
