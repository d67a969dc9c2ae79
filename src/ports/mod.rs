//! Port traits decoupling the domain from concrete I/O.

pub mod data_port;
pub mod config_port;
pub mod report_port;
