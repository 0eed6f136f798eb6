//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Ipv4`] struct for representing an IPv4 network (address plus
//! prefix length), along with the mask helpers used by the subnet tables.

use crate::error::{invalid, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use ccna_subnet_tables::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32> {
    if len > MAX_LENGTH {
        Err(invalid(format!("prefix length /{len} is longer than /32")))
    } else {
        Ok(mask_bits(len))
    }
}

// Caller guarantees len <= 32.
fn mask_bits(len: u8) -> u32 {
    let right_len = MAX_LENGTH - len;
    let all_bits = u32::MAX as u64;
    ((all_bits >> right_len) << right_len) as u32
}

/// Dotted-quad subnet mask for a prefix, e.g. `/26` -> `255.255.255.192`.
pub fn dotted_mask(len: u8) -> Result<Ipv4Addr> {
    Ok(Ipv4Addr::from(get_cidr_mask(len)?))
}

/// Mask written as four dotted binary octets, as on the CCNA worksheets.
///
/// ```
/// use ccna_subnet_tables::models::binary_mask;
/// assert_eq!(binary_mask(26).unwrap(), "11111111.11111111.11111111.11000000");
/// ```
pub fn binary_mask(len: u8) -> Result<String> {
    let octets = dotted_mask(len)?.octets();
    Ok(octets
        .iter()
        .map(|o| format!("{o:08b}"))
        .collect::<Vec<String>>()
        .join("."))
}

/// Prefix length of a dotted mask. Non-contiguous masks are rejected.
pub fn prefix_from_mask(mask: Ipv4Addr) -> Result<u8> {
    let bits = u32::from(mask);
    let len = bits.leading_ones();
    if bits.checked_shl(len).unwrap_or(0) != 0 {
        return Err(invalid(format!("{mask} is not a contiguous subnet mask")));
    }
    Ok(len as u8)
}

/// Number of addresses covered by a prefix (2^(32-len)), as u64 so /0 fits.
pub fn block_size(len: u8) -> Result<u64> {
    if len > MAX_LENGTH {
        return Err(invalid(format!("prefix length /{len} is longer than /32")));
    }
    Ok(1u64 << (MAX_LENGTH - len))
}

/// Classic usable host count: block size minus network and broadcast,
/// clamped to 0 for /31 and /32.
pub fn num_hosts(len: u8) -> Result<u64> {
    Ok(block_size(len)?.saturating_sub(2))
}

/// IPv4 network address with CIDR notation support.
#[derive(Eq, Ord, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(de::Error::custom)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn new(addr_cidr: &str) -> Result<Ipv4> {
        let addr_cidr = addr_cidr.trim();
        let (addr, mask) = addr_cidr
            .split_once('/')
            .ok_or_else(|| invalid(format!("expected a.b.c.d/len, got '{addr_cidr}'")))?;
        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|_| invalid(format!("invalid address '{addr}'")))?;
        let mask: u8 = mask
            .parse()
            .map_err(|_| invalid(format!("invalid prefix length '{mask}'")))?;
        Ipv4::from_parts(addr, mask)
    }

    /// Build from an address and prefix, validating the prefix range.
    pub fn from_parts(addr: Ipv4Addr, mask: u8) -> Result<Ipv4> {
        if mask > MAX_LENGTH {
            return Err(invalid(format!("prefix length /{mask} is longer than /32")));
        }
        Ok(Ipv4 { addr, mask })
    }

    /// True when no host bits are set, i.e. `addr` is the network address.
    pub fn is_network_address(&self) -> bool {
        self.lo() == self.addr
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & mask_bits(self.mask.min(MAX_LENGTH)))
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        let mask = mask_bits(self.mask.min(MAX_LENGTH));
        Ipv4Addr::from((u32::from(self.addr) & mask) | !mask)
    }

    /// Dotted subnet mask of this network.
    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(mask_bits(self.mask.min(MAX_LENGTH)))
    }

    /// First assignable address and how many follow it: network and
    /// broadcast excluded, both link ends for a /31, the address itself for a /32.
    fn host_range(&self) -> (u32, u64) {
        let lo = u32::from(self.lo());
        let len = self.mask.min(MAX_LENGTH);
        let size = 1u64 << (MAX_LENGTH - len);
        match len {
            31 | 32 => (lo, size),
            _ => (lo + 1, size - 2),
        }
    }

    /// Number of assignable host addresses.
    pub fn host_count(&self) -> u64 {
        self.host_range().1
    }

    /// The `i`-th assignable host address (0-based).
    pub fn host(&self, i: u64) -> Option<Ipv4Addr> {
        let (first, count) = self.host_range();
        (i < count).then(|| Ipv4Addr::from(first + i as u32))
    }
}

impl FromStr for Ipv4 {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ipv4::new(s)
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialEq for Ipv4 {
    fn eq(&self, other: &Ipv4) -> bool {
        self.addr == other.addr && self.mask == other.mask
    }
}

impl PartialOrd for Ipv4 {
    fn partial_cmp(&self, other: &Ipv4) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
