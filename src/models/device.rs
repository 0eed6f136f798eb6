//! Address table data model.

use crate::error::{invalid, Error};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Kind of device, drives automatic address assignment.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Router,
    Switch,
    Pc,
    Server,
    Other,
}

impl FromStr for DeviceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "router" | "r" => Ok(DeviceKind::Router),
            "switch" | "s" => Ok(DeviceKind::Switch),
            "pc" | "host" => Ok(DeviceKind::Pc),
            "server" => Ok(DeviceKind::Server),
            "other" => Ok(DeviceKind::Other),
            other => Err(invalid(format!("unknown device kind '{other}'"))),
        }
    }
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            DeviceKind::Router => "Router",
            DeviceKind::Switch => "Switch",
            DeviceKind::Pc => "PC",
            DeviceKind::Server => "Server",
            DeviceKind::Other => "Other",
        };
        f.write_str(s)
    }
}

/// One row of the addressing table: a device interface and its IP settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeviceInterface {
    /// Device name, e.g. `R1`. Empty for continuation rows of the same device.
    pub device: String,
    /// Interface name, e.g. `G0/0`, `VLAN 1`, `NIC`.
    pub interface: String,
    pub kind: DeviceKind,
    pub ip_address: Option<Ipv4Addr>,
    pub subnet_mask: Option<Ipv4Addr>,
    /// Free text: an address, `N/A`, or empty.
    #[serde(default)]
    pub default_gateway: String,
}

impl DeviceInterface {
    /// Interface with no addressing configured yet.
    pub fn new(device: &str, interface: &str, kind: DeviceKind) -> DeviceInterface {
        DeviceInterface {
            device: device.to_string(),
            interface: interface.to_string(),
            kind,
            ip_address: None,
            subnet_mask: None,
            default_gateway: String::new(),
        }
    }

    /// Builder-style addressing, used by the lab tables.
    pub fn with_ip(mut self, ip: Ipv4Addr, mask: Ipv4Addr) -> DeviceInterface {
        self.ip_address = Some(ip);
        self.subnet_mask = Some(mask);
        self
    }

    pub fn with_gateway(mut self, gateway: &str) -> DeviceInterface {
        self.default_gateway = gateway.to_string();
        self
    }
}
