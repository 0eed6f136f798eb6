//! Automatic address assignment for a lab addressing table.
//!
//! Router ports G0/0 and G0/1 take the first host addresses of the base
//! network, switches sit ten addresses higher, PCs twenty higher, S0/0/0 gets
//! a /30 from 10.0.0.0. Switches and PCs use the first host as default
//! gateway. Other router interfaces keep what they have.

use crate::error::{Error, Result};
use crate::models::{dotted_mask, DeviceInterface, DeviceKind, Ipv4};
use std::net::Ipv4Addr;

const SWITCH_OFFSET: usize = 10;
const PC_OFFSET: usize = 20;
const SERIAL_PREFIX: u8 = 30;
const SERIAL_NETWORK: [u8; 3] = [10, 0, 0];
const LAN_PORTS: [&str; 2] = ["G0/0", "G0/1"];
const SERIAL_PORT: &str = "S0/0/0";

fn is_port(interface: &str, port: &str) -> bool {
    interface.trim().eq_ignore_ascii_case(port)
}

/// Return a copy of `devices` with addresses assigned from `base`.
///
/// Servers, other devices and router interfaces besides G0/0, G0/1 and
/// S0/0/0 are left untouched.
///
/// # Errors
/// * [`Error::AddressSpaceExhausted`] - `base` has too few hosts for the table
pub fn assign_addresses(devices: &[DeviceInterface], base: Ipv4) -> Result<Vec<DeviceInterface>> {
    log::info!("#Start assign_addresses() {} interfaces from {base}", devices.len());
    let netmask = base.netmask();
    let serial_mask = dotted_mask(SERIAL_PREFIX)?;
    let host = |i: usize| -> Result<Ipv4Addr> {
        base.host(i as u64).ok_or(Error::AddressSpaceExhausted {
            start: base.lo(),
            needed: i as u64 + 1,
            available: base.host_count(),
        })
    };

    let mut counter = 0usize;
    let mut assigned = Vec::with_capacity(devices.len());
    for device in devices {
        let mut device = device.clone();
        match device.kind {
            DeviceKind::Router if is_port(&device.interface, SERIAL_PORT) => {
                let [a, b, c] = SERIAL_NETWORK;
                let last = u8::try_from(counter).map_err(|_| Error::AddressSpaceExhausted {
                    start: Ipv4Addr::new(a, b, c, 0),
                    needed: counter as u64 + 1,
                    available: 256,
                })?;
                device.ip_address = Some(Ipv4Addr::new(a, b, c, last));
                device.subnet_mask = Some(serial_mask);
                counter += 1;
            }
            DeviceKind::Router if LAN_PORTS.iter().any(|p| is_port(&device.interface, p)) => {
                device.ip_address = Some(host(counter)?);
                device.subnet_mask = Some(netmask);
                counter += 1;
            }
            DeviceKind::Switch => {
                device.ip_address = Some(host(counter + SWITCH_OFFSET)?);
                device.subnet_mask = Some(netmask);
                device.default_gateway = host(0)?.to_string();
            }
            DeviceKind::Pc => {
                device.ip_address = Some(host(counter + PC_OFFSET)?);
                device.subnet_mask = Some(netmask);
                device.default_gateway = host(0)?.to_string();
                counter += 1;
            }
            DeviceKind::Router | DeviceKind::Server | DeviceKind::Other => {}
        }
        log::debug!(
            "{} {} -> {:?}",
            device.device,
            device.interface,
            device.ip_address
        );
        assigned.push(device);
    }
    Ok(assigned)
}
