//! Subnet table generation.
//!
//! Splits a base network into equal subnets of a longer prefix and describes
//! each one (network, usable range, broadcast, host count).

use crate::error::{invalid, Error, Result};
use crate::models::{binary_mask, block_size, dotted_mask, num_hosts, Ipv4, SubnetRecord, MAX_LENGTH};
use serde::Serialize;
use std::net::Ipv4Addr;

/// One past 255.255.255.255.
const ADDRESS_SPACE: u64 = 1 << 32;

/// Most rows a single table may hold: a /8 split into /24, or a /16 into /32.
pub const MAX_SUBNET_ROWS: u64 = 1 << 16;

/// Divide `base_network` into subnets of `/new_prefix`.
///
/// Returns exactly `2^(new_prefix - base_network.mask)` contiguous records in
/// ascending order.
///
/// # Errors
/// * [`Error::InvalidParameter`] - prefix out of range, shorter than the base
///   prefix, host bits set in the base address, or more than
///   [`MAX_SUBNET_ROWS`] subnets requested
/// * [`Error::AddressSpaceExhausted`] - the range would run past 255.255.255.255
///
/// # Examples
/// ```
/// use ccna_subnet_tables::models::Ipv4;
/// use ccna_subnet_tables::processing::generate_subnets;
///
/// let base = Ipv4::new("192.168.0.0/24").unwrap();
/// let subnets = generate_subnets(base, 26).unwrap();
/// assert_eq!(subnets.len(), 4);
/// assert_eq!(subnets[1].network_address().to_string(), "192.168.0.64");
/// ```
pub fn generate_subnets(base_network: Ipv4, new_prefix: u8) -> Result<Vec<SubnetRecord>> {
    let original_prefix = base_network.mask;
    log::info!("#Start generate_subnets() {base_network} -> /{new_prefix}");

    if original_prefix > MAX_LENGTH {
        return Err(invalid(format!(
            "original prefix /{original_prefix} is longer than /32"
        )));
    }
    if new_prefix > MAX_LENGTH {
        return Err(invalid(format!("new prefix /{new_prefix} is longer than /32")));
    }
    if new_prefix < original_prefix {
        return Err(invalid(format!(
            "new prefix /{new_prefix} is shorter than the original prefix /{original_prefix}"
        )));
    }
    if !base_network.is_network_address() {
        return Err(invalid(format!(
            "{base_network} has host bits set, network address is {}",
            base_network.lo()
        )));
    }

    let borrowed_bits = new_prefix - original_prefix;
    let subnet_count = 1u64 << borrowed_bits;
    if subnet_count > MAX_SUBNET_ROWS {
        return Err(invalid(format!(
            "{base_network} split into /{new_prefix} gives {subnet_count} subnets, the limit is {MAX_SUBNET_ROWS}"
        )));
    }
    let block = block_size(new_prefix)?;
    let hosts_per_subnet = num_hosts(new_prefix)?;

    let base = u32::from(base_network.addr) as u64;
    ensure_in_address_space(base_network.addr, subnet_count * block)?;
    log::debug!(
        "borrowed_bits={borrowed_bits} subnet_count={subnet_count} block_size={block} hosts={hosts_per_subnet}"
    );

    let records = (0..subnet_count)
        .map(|i| {
            let network = Ipv4 {
                addr: to_addr(base + i * block),
                mask: new_prefix,
            };
            SubnetRecord::new(i as usize + 1, network)
        })
        .collect::<Vec<SubnetRecord>>();

    log::info!("# Generated {} subnets of /{new_prefix}", records.len());
    Ok(records)
}

/// Fail unless `needed` addresses starting at `start` fit below 2^32.
pub(crate) fn ensure_in_address_space(start: Ipv4Addr, needed: u64) -> Result<()> {
    let base = u32::from(start) as u64;
    if base + needed > ADDRESS_SPACE {
        return Err(Error::AddressSpaceExhausted {
            start,
            needed,
            available: ADDRESS_SPACE - base,
        });
    }
    Ok(())
}

// Callers stay below ADDRESS_SPACE, so the truncation is lossless.
fn to_addr(bits: u64) -> Ipv4Addr {
    Ipv4Addr::from(bits as u32)
}

/// Header block of a subnet worksheet: `/26`, binary mask, dotted mask.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubnetSummary {
    pub base_network: Ipv4,
    pub prefix: String,
    pub binary_mask: String,
    pub subnet_mask: Ipv4Addr,
    pub subnet_count: u64,
    pub hosts_per_subnet: u64,
}

/// Summarise a split without generating the rows.
pub fn subnet_summary(base_network: Ipv4, new_prefix: u8) -> Result<SubnetSummary> {
    if new_prefix > MAX_LENGTH || new_prefix < base_network.mask {
        return Err(invalid(format!(
            "new prefix /{new_prefix} must be between /{} and /32",
            base_network.mask
        )));
    }
    Ok(SubnetSummary {
        base_network,
        prefix: format!("/{new_prefix}"),
        binary_mask: binary_mask(new_prefix)?,
        subnet_mask: dotted_mask(new_prefix)?,
        subnet_count: 1u64 << (new_prefix - base_network.mask),
        hosts_per_subnet: num_hosts(new_prefix)?,
    })
}

impl std::fmt::Display for SubnetSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} -> {}  {}  {}  ({} subnets, {} hosts each)",
            self.base_network,
            self.prefix,
            self.binary_mask,
            self.subnet_mask,
            self.subnet_count,
            self.hosts_per_subnet
        )
    }
}
