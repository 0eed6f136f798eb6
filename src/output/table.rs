//! Plain string tables handed to the sinks.

use crate::models::{ConnectivityTest, DeviceInterface, SubnetRecord};
use serde::Serialize;

/// Rows that can be laid out as a table.
pub trait Tabular {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

/// Titled table of already formatted cells.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_rows<T: Tabular>(title: &str, rows: &[T]) -> Table {
        Table {
            title: title.to_string(),
            headers: T::headers().into_iter().map(String::from).collect(),
            rows: rows.iter().map(|r| r.row()).collect(),
        }
    }

    /// Display width of each column: the longest header or cell.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }
        widths
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl Tabular for SubnetRecord {
    fn headers() -> Vec<&'static str> {
        vec![
            "Subred",
            "Dirección de red",
            "Prefijo",
            "Máscara de subred",
            "Primera IP utilizable",
            "Última IP utilizable",
            "Dirección broadcast",
            "Hosts utilizables",
            "Modo",
        ]
    }

    fn row(&self) -> Vec<String> {
        // /31 rows show both link ends instead of an empty range
        let (first, last) = match self.point_to_point_hosts() {
            Some((a, b)) => (a.to_string(), b.to_string()),
            None => (opt(self.first_usable()), opt(self.last_usable())),
        };
        vec![
            self.index().to_string(),
            self.network_address().to_string(),
            format!("/{}", self.prefix_length()),
            self.subnet_mask().to_string(),
            first,
            last,
            self.broadcast_address().to_string(),
            self.usable_host_count().to_string(),
            self.mode().to_string(),
        ]
    }
}

impl Tabular for DeviceInterface {
    fn headers() -> Vec<&'static str> {
        vec![
            "Dispositivo",
            "Interfaz",
            "Tipo",
            "Dirección IP",
            "Máscara de subred",
            "Gateway predeterminado",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.device.clone(),
            self.interface.clone(),
            self.kind.to_string(),
            opt(self.ip_address),
            opt(self.subnet_mask),
            self.default_gateway.clone(),
        ]
    }
}

impl Tabular for ConnectivityTest {
    fn headers() -> Vec<&'static str> {
        vec![
            "Prueba",
            "¿Se realizó correctamente?",
            "Problemas",
            "Solución",
            "Verificado",
        ]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.test.clone(),
            self.succeeded.clone(),
            self.problems.clone(),
            self.solution.clone(),
            self.verified.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ipv4;
    use crate::processing::generate_subnets;

    #[test]
    fn test_subnet_rows() {
        let subnets = generate_subnets(Ipv4::new("192.168.0.0/24").unwrap(), 26).unwrap();
        let table = Table::from_rows("subredes", &subnets);
        assert_eq!(table.headers.len(), table.rows[0].len());
        assert_eq!(
            table.rows[0],
            vec![
                "1",
                "192.168.0.0",
                "/26",
                "255.255.255.192",
                "192.168.0.1",
                "192.168.0.62",
                "192.168.0.63",
                "62",
                "standard"
            ]
        );
    }

    #[test]
    fn test_point_to_point_row_not_empty() {
        let subnets = generate_subnets(Ipv4::new("10.0.0.0/31").unwrap(), 31).unwrap();
        let row = subnets[0].row();
        assert_eq!(row[4], "10.0.0.0");
        assert_eq!(row[5], "10.0.0.1");
        assert_eq!(row[7], "0");
    }

    #[test]
    fn test_column_widths() {
        let table = Table {
            title: "t".to_string(),
            headers: vec!["a".to_string(), "Máscara".to_string()],
            rows: vec![vec!["long cell".to_string(), "x".to_string()]],
        };
        assert_eq!(table.column_widths(), vec![9, 7]);
    }
}
