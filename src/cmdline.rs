//! Command line arguments.

use crate::labs::LAB_IDS;
use crate::models::Ipv4;
use crate::output::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ccna-subnet-tables", version, about = "Subnet and addressing tables for CCNA labs")]
pub struct Cli {
    /// Directory holding ccna_tables.json
    #[arg(long, default_value = ".")]
    pub config_dir: PathBuf,

    /// Disable colored terminal output
    #[arg(long)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split a network into subnets of a longer prefix
    Subnets {
        /// Base network, e.g. 192.168.0.0/24
        #[arg(value_parser = parse_ipv4)]
        network: Ipv4,
        /// New prefix length, e.g. 26
        #[arg(value_parser = clap::value_parser!(u8).range(0..=32))]
        new_prefix: u8,
        /// Also write the table as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Also write the table as JSON
        #[arg(long)]
        json: Option<PathBuf>,
        /// Also write the table as an Excel workbook
        #[arg(long)]
        xlsx: Option<PathBuf>,
    },
    /// Print a built-in lab worksheet
    Lab {
        #[arg(value_parser = clap::builder::PossibleValuesParser::new(LAB_IDS))]
        id: String,
        /// Assign addresses from this network before printing
        #[arg(long, value_parser = parse_ipv4)]
        assign: Option<Ipv4>,
        /// Export every table to this directory
        #[arg(long)]
        export: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ExportFormat::Xlsx)]
        format: ExportFormat,
    },
    /// Interactive menu over a lab worksheet
    Menu {
        #[arg(long, default_value = "10.3.4")]
        lab: String,
    },
}

fn parse_ipv4(s: &str) -> Result<Ipv4, String> {
    Ipv4::new(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subnets() {
        let cli = Cli::try_parse_from(["ccna", "subnets", "192.168.0.0/24", "26", "--csv", "out.csv"]).unwrap();
        match cli.command {
            Command::Subnets { network, new_prefix, csv, json, xlsx } => {
                assert_eq!(network, Ipv4::new("192.168.0.0/24").unwrap());
                assert_eq!(new_prefix, 26);
                assert_eq!(csv, Some(PathBuf::from("out.csv")));
                assert!(json.is_none());
                assert!(xlsx.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(Cli::try_parse_from(["ccna", "subnets", "192.168.0.0/24", "33"]).is_err());
        assert!(Cli::try_parse_from(["ccna", "subnets", "192.168.0.0", "26"]).is_err());
    }

    #[test]
    fn test_parse_lab() {
        let cli = Cli::try_parse_from(["ccna", "--no-color", "lab", "17.5", "--assign", "192.168.1.0/24"]).unwrap();
        assert!(cli.no_color);
        assert!(matches!(
            cli.command,
            Command::Lab { ref id, assign: Some(_), format: ExportFormat::Xlsx, .. } if id == "17.5"
        ));
        let cli = Cli::try_parse_from(["ccna", "lab", "10.3.4", "--export", "out", "--format", "json"]).unwrap();
        assert!(matches!(cli.command, Command::Lab { format: ExportFormat::Json, .. }));
        assert!(Cli::try_parse_from(["ccna", "lab", "1.2.3"]).is_err());
    }
}
