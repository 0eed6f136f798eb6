//! Lab table set: addressing table, connectivity checklist and an optional
//! subnet table, with the edit operations used by the menu.

use crate::error::{Error, Result};
use crate::models::{ConnectivityTest, DeviceInterface, Ipv4, SubnetRecord};
use serde::{Deserialize, Serialize};

use super::{assign_addresses, generate_subnets};

/// All tables belonging to one lab worksheet.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LabTables {
    /// Lab name, used in titles and export file names.
    pub name: String,
    pub addresses: Vec<DeviceInterface>,
    pub tests: Vec<ConnectivityTest>,
    #[serde(default)]
    pub subnets: Vec<SubnetRecord>,
}

impl LabTables {
    pub fn new(name: &str) -> LabTables {
        LabTables {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Append a device interface to the addressing table.
    pub fn add_device(&mut self, device: DeviceInterface) {
        log::info!("Adding device {} {}", device.device, device.interface);
        self.addresses.push(device);
    }

    /// Append a row to the connectivity checklist.
    pub fn add_test(&mut self, test: ConnectivityTest) {
        log::info!("Adding test '{}'", test.test);
        self.tests.push(test);
    }

    /// Set the default gateway of the first interface of `device`.
    pub fn update_gateway(&mut self, device: &str, gateway: &str) -> Result<()> {
        let row = self
            .addresses
            .iter_mut()
            .find(|d| d.device == device)
            .ok_or_else(|| Error::UnknownDevice(device.to_string()))?;
        log::info!("Gateway for {device}: '{}' -> '{gateway}'", row.default_gateway);
        row.default_gateway = gateway.to_string();
        Ok(())
    }

    /// Replace the subnet table with the split of `base` into `/new_prefix`.
    pub fn set_subnets(&mut self, base: Ipv4, new_prefix: u8) -> Result<()> {
        self.subnets = generate_subnets(base, new_prefix)?;
        Ok(())
    }

    /// Fill the addressing table from `base`.
    pub fn assign_addresses(&mut self, base: Ipv4) -> Result<()> {
        self.addresses = assign_addresses(&self.addresses, base)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeviceKind;

    #[test]
    fn test_update_gateway() {
        let mut lab = LabTables::new("test");
        lab.add_device(DeviceInterface::new("PC1", "NIC", DeviceKind::Pc));
        lab.add_device(DeviceInterface::new("R1", "G0/0", DeviceKind::Router));
        lab.add_device(DeviceInterface::new("R1", "G0/1", DeviceKind::Router));

        lab.update_gateway("R1", "N/A").unwrap();
        assert_eq!(lab.addresses[1].default_gateway, "N/A");
        assert_eq!(lab.addresses[2].default_gateway, "");

        let err = lab.update_gateway("R9", "10.0.0.1").unwrap_err();
        assert!(matches!(err, Error::UnknownDevice(ref d) if d == "R9"));
    }

    #[test]
    fn test_add_test_and_subnets() {
        let mut lab = LabTables::new("test");
        lab.add_test(ConnectivityTest::new("PC1 a R1"));
        assert_eq!(lab.tests.len(), 1);

        lab.set_subnets(Ipv4::new("192.168.0.0/24").unwrap(), 26).unwrap();
        assert_eq!(lab.subnets.len(), 4);
        assert!(lab.set_subnets(Ipv4::new("192.168.0.0/24").unwrap(), 20).is_err());
        assert_eq!(lab.subnets.len(), 4, "failed split keeps previous table");
    }
}
