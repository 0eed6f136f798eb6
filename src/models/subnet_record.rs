//! One row of a generated subnet table.

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

use super::ipv4::{Ipv4, MAX_LENGTH};

/// How the addresses of a subnet may be assigned.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubnetMode {
    /// Network and broadcast reserved, everything between is usable.
    Standard,
    /// /31 link (RFC 3021): both addresses go to the two link ends.
    PointToPoint,
    /// /32 host route.
    SingleHost,
}

impl SubnetMode {
    pub fn for_prefix(prefix: u8) -> SubnetMode {
        match prefix {
            32 => SubnetMode::SingleHost,
            31 => SubnetMode::PointToPoint,
            _ => SubnetMode::Standard,
        }
    }
}

impl std::fmt::Display for SubnetMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            SubnetMode::Standard => "standard",
            SubnetMode::PointToPoint => "point-to-point (RFC 3021)",
            SubnetMode::SingleHost => "single host",
        };
        f.write_str(s)
    }
}

/// Immutable description of one subnet.
///
/// Only [`generate_subnets`](crate::processing::generate_subnets) builds
/// records, so the prefix is always in range and the addresses agree with it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubnetRecord {
    /// 1-based position in the table.
    index: usize,
    network_address: Ipv4Addr,
    prefix_length: u8,
    subnet_mask: Ipv4Addr,
    /// `None` when the subnet has no classic usable range (/31, /32).
    first_usable: Option<Ipv4Addr>,
    last_usable: Option<Ipv4Addr>,
    broadcast_address: Ipv4Addr,
    /// `2^(32-prefix) - 2`, 0 for /31 and /32.
    usable_host_count: u64,
    mode: SubnetMode,
}

impl SubnetRecord {
    /// Describe the subnet `network`. Caller passes an aligned network
    /// with a prefix of at most /32.
    pub(crate) fn new(index: usize, network: Ipv4) -> SubnetRecord {
        let len = network.mask.min(MAX_LENGTH);
        let usable_host_count = (1u64 << (MAX_LENGTH - len)).saturating_sub(2);
        let (first_usable, last_usable) = if usable_host_count == 0 {
            (None, None)
        } else {
            (
                Some(Ipv4Addr::from(u32::from(network.lo()) + 1)),
                Some(Ipv4Addr::from(u32::from(network.hi()) - 1)),
            )
        };
        SubnetRecord {
            index,
            network_address: network.lo(),
            prefix_length: len,
            subnet_mask: network.netmask(),
            first_usable,
            last_usable,
            broadcast_address: network.hi(),
            usable_host_count,
            mode: SubnetMode::for_prefix(len),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn network_address(&self) -> Ipv4Addr {
        self.network_address
    }

    pub fn prefix_length(&self) -> u8 {
        self.prefix_length
    }

    /// Dotted mask of `prefix_length`.
    pub fn subnet_mask(&self) -> Ipv4Addr {
        self.subnet_mask
    }

    pub fn first_usable(&self) -> Option<Ipv4Addr> {
        self.first_usable
    }

    pub fn last_usable(&self) -> Option<Ipv4Addr> {
        self.last_usable
    }

    pub fn broadcast_address(&self) -> Ipv4Addr {
        self.broadcast_address
    }

    pub fn usable_host_count(&self) -> u64 {
        self.usable_host_count
    }

    pub fn mode(&self) -> SubnetMode {
        self.mode
    }

    /// The two link addresses of a /31, `None` for every other mode.
    pub fn point_to_point_hosts(&self) -> Option<(Ipv4Addr, Ipv4Addr)> {
        match self.mode {
            SubnetMode::PointToPoint => Some((self.network_address, self.broadcast_address)),
            _ => None,
        }
    }

    /// Usable range as shown in tables: `first - last`, the /31 link pair,
    /// or a dash for a /32.
    pub fn usable_range_label(&self) -> String {
        match (self.mode, self.first_usable, self.last_usable) {
            (SubnetMode::Standard, Some(first), Some(last)) => format!("{first} - {last}"),
            (SubnetMode::PointToPoint, _, _) => format!(
                "{} - {} (p2p)",
                self.network_address, self.broadcast_address
            ),
            _ => "-".to_string(),
        }
    }
}

impl std::fmt::Display for SubnetRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "#{} {}/{} [{}] br {} hosts {}",
            self.index,
            self.network_address,
            self.prefix_length,
            self.usable_range_label(),
            self.broadcast_address,
            self.usable_host_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_for_prefix() {
        assert_eq!(SubnetMode::for_prefix(30), SubnetMode::Standard);
        assert_eq!(SubnetMode::for_prefix(31), SubnetMode::PointToPoint);
        assert_eq!(SubnetMode::for_prefix(32), SubnetMode::SingleHost);
    }

    #[test]
    fn test_new_standard() {
        let rec = SubnetRecord::new(2, Ipv4::new("192.168.0.64/26").unwrap());
        assert_eq!(rec.index(), 2);
        assert_eq!(rec.subnet_mask(), Ipv4Addr::new(255, 255, 255, 192));
        assert_eq!(rec.first_usable(), Some(Ipv4Addr::new(192, 168, 0, 65)));
        assert_eq!(rec.last_usable(), Some(Ipv4Addr::new(192, 168, 0, 126)));
        assert_eq!(rec.broadcast_address(), Ipv4Addr::new(192, 168, 0, 127));
        assert_eq!(rec.usable_host_count(), 62);
        assert_eq!(rec.usable_range_label(), "192.168.0.65 - 192.168.0.126");
    }

    #[test]
    fn test_point_to_point_label() {
        let rec = SubnetRecord::new(1, Ipv4::new("10.0.0.0/31").unwrap());
        assert_eq!(rec.mode(), SubnetMode::PointToPoint);
        assert_eq!(rec.usable_host_count(), 0);
        assert!(rec.first_usable().is_none());
        assert_eq!(rec.usable_range_label(), "10.0.0.0 - 10.0.0.1 (p2p)");
        assert_eq!(
            rec.point_to_point_hosts(),
            Some((Ipv4Addr::new(10, 0, 0, 0), Ipv4Addr::new(10, 0, 0, 1)))
        );
        assert_eq!(rec.subnet_mask(), Ipv4Addr::new(255, 255, 255, 254));
    }

    #[test]
    fn test_single_host_label() {
        let rec = SubnetRecord::new(1, Ipv4::new("10.0.0.9/32").unwrap());
        assert_eq!(rec.mode(), SubnetMode::SingleHost);
        assert_eq!(rec.network_address(), rec.broadcast_address());
        assert_eq!(rec.usable_range_label(), "-");
        assert_eq!(rec.to_string(), "#1 10.0.0.9/32 [-] br 10.0.0.9 hosts 0");
    }
}
