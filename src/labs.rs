//! Built-in lab worksheets.

use crate::error::{invalid, Result};
use crate::models::{ConnectivityTest, DeviceInterface, DeviceKind, Ipv4};
use crate::processing::LabTables;
use std::net::Ipv4Addr;

/// Lab ids accepted by [`lab_by_id`].
pub const LAB_IDS: [&str; 3] = ["10.3.4", "11.10.1", "17.5"];

/// Look up a built-in lab by its course id.
pub fn lab_by_id(id: &str) -> Result<LabTables> {
    match id.trim() {
        "10.3.4" => Ok(lab_10_3_4()),
        "11.10.1" => lab_11_10_1(),
        "17.5" => Ok(lab_17_5()),
        other => Err(invalid(format!(
            "unknown lab '{other}', expected one of {}",
            LAB_IDS.join(", ")
        ))),
    }
}

const MASK_24: Ipv4Addr = Ipv4Addr::new(255, 255, 255, 0);
const MASK_27: Ipv4Addr = Ipv4Addr::new(255, 255, 255, 224);
const MASK_30: Ipv4Addr = Ipv4Addr::new(255, 255, 255, 252);

/// Packet Tracer 10.3.4: two LANs behind R1, with a troubleshooting checklist.
pub fn lab_10_3_4() -> LabTables {
    use DeviceKind::*;
    let ip = Ipv4Addr::new;
    let mut lab = LabTables::new("lab_10_3_4");
    lab.addresses = vec![
        DeviceInterface::new("R1", "G0/0", Router).with_ip(ip(192, 168, 10, 1), MASK_24).with_gateway("N/A"),
        DeviceInterface::new("R1", "G0/1", Router).with_ip(ip(192, 168, 11, 1), MASK_24).with_gateway("N/A"),
        DeviceInterface::new("S1", "VLAN 1", Switch).with_ip(ip(192, 168, 10, 2), MASK_24),
        DeviceInterface::new("S2", "VLAN 1", Switch).with_ip(ip(192, 168, 11, 2), MASK_24),
        DeviceInterface::new("PC1", "NIC", Pc).with_ip(ip(192, 168, 10, 10), MASK_24),
        DeviceInterface::new("PC2", "NIC", Pc).with_ip(ip(192, 168, 10, 11), MASK_24),
        DeviceInterface::new("PC3", "NIC", Pc).with_ip(ip(192, 168, 11, 10), MASK_24),
        DeviceInterface::new("PC4", "NIC", Pc).with_ip(ip(192, 168, 11, 11), MASK_24),
    ];
    lab.tests = vec![
        ConnectivityTest {
            test: "PC1 a PC2".to_string(),
            succeeded: "No".to_string(),
            problems: "Dirección IP en la PC1".to_string(),
            solution: "Cambiar la dirección IP de la PC1".to_string(),
            verified: String::new(),
        },
        ConnectivityTest::new("PC1 a S1"),
        ConnectivityTest::new("PC1 a R1"),
        ConnectivityTest::new(""),
        ConnectivityTest::new(""),
    ];
    lab
}

/// 11.10.1 "subnet an IPv4 network": customer LANs to be addressed from
/// 192.168.0.0/24 split into /26, ISP side already configured.
pub fn lab_11_10_1() -> Result<LabTables> {
    use DeviceKind::*;
    let ip = Ipv4Addr::new;
    let isp_gw = "209.165.200.225";
    let mut lab = LabTables::new("lab_11_10_1");
    lab.addresses = vec![
        DeviceInterface::new("CustomerRouter", "G0/0", Router).with_gateway("No corresponde"),
        DeviceInterface::new("", "G0/1", Router),
        DeviceInterface::new("", "S0/1/0", Router).with_ip(ip(209, 165, 201, 2), MASK_30),
        DeviceInterface::new("LAN_A Switch", "VLAN1", Switch),
        DeviceInterface::new("LAN_B Switch", "VLAN1", Switch),
        DeviceInterface::new("PC_A", "NIC", Pc),
        DeviceInterface::new("PC_B", "NIC", Pc),
        DeviceInterface::new("ISPRouter", "G0/0", Router).with_ip(ip(209, 165, 200, 225), MASK_27).with_gateway("N/D"),
        DeviceInterface::new("", "S0/1/0", Router).with_ip(ip(209, 165, 201, 1), MASK_30),
        DeviceInterface::new("ISPSwitch", "VLAN1", Switch).with_ip(ip(209, 165, 200, 226), MASK_27).with_gateway(isp_gw),
        DeviceInterface::new("Estación de trabajo ISP", "NIC", Pc).with_ip(ip(209, 165, 200, 235), MASK_27).with_gateway(isp_gw),
        DeviceInterface::new("Servidor del ISP", "NIC", Server).with_ip(ip(209, 165, 200, 240), MASK_27).with_gateway(isp_gw),
    ];
    lab.set_subnets(Ipv4::new("192.168.0.0/24")?, 26)?;
    Ok(lab)
}

/// 17.5 template: two routers, four switches, four PCs, nothing addressed.
/// Meant to be filled with [`LabTables::assign_addresses`].
pub fn lab_17_5() -> LabTables {
    use DeviceKind::*;
    let mut lab = LabTables::new("lab_17_5");
    for router in ["R1", "R2"] {
        for interface in ["G0/0", "G0/1", "S0/0/0"] {
            lab.addresses.push(DeviceInterface::new(router, interface, Router));
        }
    }
    for switch in ["S1", "S2", "S3", "S4"] {
        lab.addresses.push(DeviceInterface::new(switch, "VLAN 1", Switch));
    }
    for pc in ["PC1", "PC2", "PC3", "PC4"] {
        lab.addresses.push(DeviceInterface::new(pc, "NIC", Pc));
    }
    lab
}
