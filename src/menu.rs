//! Line based menu over a lab's tables.
//!
//! Each input line is split into words (quotes keep words together), parsed
//! into a [`MenuCommand`] and dispatched against [`LabTables`].

use crate::config::Config;
use crate::error::{invalid, Result};
use crate::models::{dotted_mask, prefix_from_mask, ConnectivityTest, DeviceInterface, DeviceKind, Ipv4};
use crate::output::{export_lab, write_lab, ExportFormat, Table, TableSink, TerminalSink};
use crate::processing::{subnet_summary, LabTables};
use colored::Colorize;
use lazy_static::lazy_static;
use regex::Regex;
use std::io::{BufRead, Write};
use std::net::Ipv4Addr;

const HELP: &str = "\
OPCIONES:
1 | add-device <dispositivo> <interfaz> <tipo> [ip] [mascara] [gateway]
2 | add-test <prueba> [realizado] [problemas] [solucion] [verificado]
3 | gateway <dispositivo> <gateway>
4 | export-excel [directorio]
5 | export-csv [directorio]
    export-json [directorio]
6 | show
    subnets <red/prefijo> <nuevo_prefijo>
    assign [red/prefijo]
    help
7 | quit
Use comillas para valores con espacios: add-device 'Servidor del ISP' NIC server";

/// One parsed menu action.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuCommand {
    AddDevice(DeviceInterface),
    AddTest(ConnectivityTest),
    UpdateGateway { device: String, gateway: String },
    Export { format: ExportFormat, dir: Option<String> },
    Show,
    Subnets { base: Ipv4, new_prefix: u8 },
    Assign(Option<Ipv4>),
    Help,
    Quit,
}

/// Parse one input line. Menu numbers and command names are both accepted.
pub fn parse_command(line: &str) -> Result<MenuCommand> {
    let words = split_and_strip(line.trim());
    let (cmd, args) = match words.split_first() {
        Some((cmd, args)) if !cmd.is_empty() || !args.is_empty() => (*cmd, args),
        _ => return Ok(MenuCommand::Help),
    };
    let arg = |i: usize| args.get(i).copied().unwrap_or("");

    match cmd.to_ascii_lowercase().as_str() {
        "1" | "add-device" => {
            if args.len() < 3 {
                return Err(invalid("add-device needs <dispositivo> <interfaz> <tipo>"));
            }
            let kind: DeviceKind = arg(2).parse()?;
            let mut device = DeviceInterface::new(arg(0), arg(1), kind);
            device.ip_address = parse_optional_addr(arg(3))?;
            device.subnet_mask = parse_optional_mask(arg(4))?;
            device.default_gateway = arg(5).to_string();
            Ok(MenuCommand::AddDevice(device))
        }
        "2" | "add-test" => {
            if args.is_empty() {
                return Err(invalid("add-test needs <prueba>"));
            }
            Ok(MenuCommand::AddTest(ConnectivityTest {
                test: arg(0).to_string(),
                succeeded: arg(1).to_string(),
                problems: arg(2).to_string(),
                solution: arg(3).to_string(),
                verified: arg(4).to_string(),
            }))
        }
        "3" | "gateway" => {
            if args.len() < 2 {
                return Err(invalid("gateway needs <dispositivo> <gateway>"));
            }
            Ok(MenuCommand::UpdateGateway {
                device: arg(0).to_string(),
                gateway: arg(1).to_string(),
            })
        }
        "4" | "export-excel" | "export-xlsx" => Ok(MenuCommand::Export {
            format: ExportFormat::Xlsx,
            dir: args.first().map(|d| d.to_string()),
        }),
        "5" | "export-csv" => Ok(MenuCommand::Export {
            format: ExportFormat::Csv,
            dir: args.first().map(|d| d.to_string()),
        }),
        "export-json" => Ok(MenuCommand::Export {
            format: ExportFormat::Json,
            dir: args.first().map(|d| d.to_string()),
        }),
        "6" | "show" => Ok(MenuCommand::Show),
        "subnets" => {
            let base = Ipv4::new(arg(0))?;
            let new_prefix = arg(1)
                .trim_start_matches('/')
                .parse()
                .map_err(|_| invalid(format!("invalid prefix length '{}'", arg(1))))?;
            Ok(MenuCommand::Subnets { base, new_prefix })
        }
        "assign" => match args.first() {
            Some(net) => Ok(MenuCommand::Assign(Some(Ipv4::new(net)?))),
            None => Ok(MenuCommand::Assign(None)),
        },
        "help" | "?" => Ok(MenuCommand::Help),
        "7" | "quit" | "exit" | "q" => Ok(MenuCommand::Quit),
        other => Err(invalid(format!("unknown option '{other}'"))),
    }
}

fn parse_optional_addr(s: &str) -> Result<Option<Ipv4Addr>> {
    if s.is_empty() {
        return Ok(None);
    }
    s.parse()
        .map(Some)
        .map_err(|_| invalid(format!("invalid address '{s}'")))
}

/// Dotted mask (`255.255.255.0`) or prefix (`/24`). Non-contiguous masks
/// are rejected.
fn parse_optional_mask(s: &str) -> Result<Option<Ipv4Addr>> {
    if let Some(len) = s.strip_prefix('/') {
        let len: u8 = len
            .parse()
            .map_err(|_| invalid(format!("invalid prefix length '{s}'")))?;
        return dotted_mask(len).map(Some);
    }
    let mask = parse_optional_addr(s)?;
    if let Some(mask) = mask {
        prefix_from_mask(mask)?;
    }
    Ok(mask)
}

/// Menu state: the lab being edited and where exports go.
pub struct Menu {
    pub lab: LabTables,
    config: Config,
    color: bool,
}

impl Menu {
    pub fn new(lab: LabTables, config: Config, color: bool) -> Menu {
        Menu { lab, config, color }
    }

    /// Read commands until `quit` or end of input. Command errors are
    /// reported and the loop continues; only I/O errors end it.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        log::info!("#Start menu for {}", self.lab.name);
        self.show(out)?;
        writeln!(out, "{HELP}")?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let keep_going = match parse_command(&line) {
                Ok(cmd) => match self.dispatch(cmd, out) {
                    Ok(keep_going) => keep_going,
                    Err(e) => {
                        self.report(out, &e)?;
                        true
                    }
                },
                Err(e) => {
                    self.report(out, &e)?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        Ok(())
    }

    fn report<W: Write>(&self, out: &mut W, e: &crate::error::Error) -> Result<()> {
        log::warn!("menu: {e}");
        if self.color {
            writeln!(out, "{} {e}", "ERROR".on_red())?;
        } else {
            writeln!(out, "ERROR {e}")?;
        }
        Ok(())
    }

    /// Run one command. Returns `false` when the menu should stop.
    pub fn dispatch<W: Write>(&mut self, cmd: MenuCommand, out: &mut W) -> Result<bool> {
        log::debug!("dispatch {cmd:?}");
        match cmd {
            MenuCommand::AddDevice(device) => {
                writeln!(out, "Dispositivo {} agregado", device.device)?;
                self.lab.add_device(device);
            }
            MenuCommand::AddTest(test) => {
                writeln!(out, "Prueba '{}' agregada", test.test)?;
                self.lab.add_test(test);
            }
            MenuCommand::UpdateGateway { device, gateway } => {
                self.lab.update_gateway(&device, &gateway)?;
                writeln!(out, "Gateway actualizado para {device}: {gateway}")?;
            }
            MenuCommand::Export { format, dir } => {
                let dir = dir
                    .map(std::path::PathBuf::from)
                    .unwrap_or_else(|| self.config.output_dir.clone());
                let paths = export_lab(
                    &self.lab,
                    &dir,
                    &self.config.file_prefix,
                    format,
                    self.config.csv_bom,
                )?;
                for path in paths {
                    writeln!(out, "  - {}", path.display())?;
                }
            }
            MenuCommand::Show => self.show(out)?,
            MenuCommand::Subnets { base, new_prefix } => {
                let summary = subnet_summary(base, new_prefix)?;
                self.lab.set_subnets(base, new_prefix)?;
                writeln!(out, "{summary}")?;
                let table = Table::from_rows("Tabla de subredes", &self.lab.subnets);
                TerminalSink::new(&mut *out, self.color).write_table(&table)?;
            }
            MenuCommand::Assign(base) => {
                let base = base.unwrap_or(self.config.default_network);
                self.lab.assign_addresses(base)?;
                writeln!(out, "Direcciones asignadas desde {base}")?;
            }
            MenuCommand::Help => writeln!(out, "{HELP}")?,
            MenuCommand::Quit => {
                writeln!(out, "Hasta luego")?;
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<()> {
        let mut sink = TerminalSink::new(&mut *out, self.color);
        write_lab(&self.lab, &mut sink)
    }
}

/// Split on whitespace, keeping 'quoted words' together and dropping the quotes.
fn split_and_strip(input: &str) -> Vec<&str> {
    RE.find_iter(input)
        .map(|m| m.as_str().trim().trim_matches('\'').trim_matches('"'))
        .collect()
}
lazy_static! {
    static ref RE: Regex =
        Regex::new(r#"'([^']*)'\s*|\"([^\"]*)\"\s*|([^'\s]*)\s*"#).expect("Invalid Regex?");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_and_strip_complex() {
        let input = "Hello 'World War'  'fail' Rust";
        let expected = vec!["Hello", "World War", "fail", "Rust"];
        assert_eq!(split_and_strip(input), expected);
    }

    #[test]
    fn test_split_and_strip_empty_quotes() {
        let input = "add-test 'PC1 a S1' '' 'sin respuesta'";
        let expected = vec!["add-test", "PC1 a S1", "", "sin respuesta"];
        assert_eq!(split_and_strip(input), expected);
    }

    #[test]
    fn test_parse_add_device() {
        let cmd = parse_command(
            "add-device 'Servidor del ISP' NIC server 209.165.200.240 255.255.255.224 209.165.200.225",
        )
        .unwrap();
        match cmd {
            MenuCommand::AddDevice(d) => {
                assert_eq!(d.device, "Servidor del ISP");
                assert_eq!(d.kind, DeviceKind::Server);
                assert_eq!(d.ip_address, Some(Ipv4Addr::new(209, 165, 200, 240)));
                assert_eq!(d.default_gateway, "209.165.200.225");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(parse_command("1 PC5 NIC").is_err());
        assert!(parse_command("1 PC5 NIC pc 300.1.1.1").is_err());
    }

    #[test]
    fn test_parse_add_device_mask() {
        let mask = |line: &str| match parse_command(line).unwrap() {
            MenuCommand::AddDevice(d) => d.subnet_mask,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(
            mask("1 PC5 NIC pc 192.168.10.12 /26"),
            Some(Ipv4Addr::new(255, 255, 255, 192))
        );
        assert_eq!(
            mask("1 PC5 NIC pc 192.168.10.12 255.255.255.0"),
            Some(Ipv4Addr::new(255, 255, 255, 0))
        );
        assert_eq!(mask("1 PC5 NIC pc"), None);

        let err = parse_command("1 PC5 NIC pc 192.168.10.12 255.0.255.0").unwrap_err();
        assert!(err.to_string().contains("not a contiguous subnet mask"), "got {err}");
        assert!(parse_command("1 PC5 NIC pc 192.168.10.12 /33").is_err());
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse_command("7").unwrap(), MenuCommand::Quit);
        assert_eq!(parse_command(" show ").unwrap(), MenuCommand::Show);
        assert_eq!(
            parse_command("subnets 192.168.0.0/24 /26").unwrap(),
            MenuCommand::Subnets {
                base: Ipv4::new("192.168.0.0/24").unwrap(),
                new_prefix: 26
            }
        );
        assert_eq!(
            parse_command("3 R1 10.0.0.1").unwrap(),
            MenuCommand::UpdateGateway {
                device: "R1".to_string(),
                gateway: "10.0.0.1".to_string()
            }
        );
        assert_eq!(
            parse_command("4 salida").unwrap(),
            MenuCommand::Export {
                format: ExportFormat::Xlsx,
                dir: Some("salida".to_string())
            }
        );
        assert!(matches!(
            parse_command("export-json").unwrap(),
            MenuCommand::Export { format: ExportFormat::Json, dir: None }
        ));
        assert!(parse_command("8").is_err());
        assert!(parse_command("subnets 192.168.0.0/24 x").is_err());
    }

    #[test]
    fn test_menu_session() {
        let mut menu = Menu::new(crate::labs::lab_10_3_4(), Config::default(), false);
        let input = "\
1 PC5 NIC pc 192.168.10.12 255.255.255.0
3 PC5 192.168.10.1
3 PC9 192.168.10.1
bogus
2 'PC5 a R1' Sí
subnets 192.168.0.0/24 27
7
6
";
        let mut out = Vec::new();
        menu.run(input.as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(menu.lab.addresses.len(), 9);
        assert_eq!(menu.lab.addresses[8].default_gateway, "192.168.10.1");
        assert_eq!(menu.lab.tests.last().unwrap().test, "PC5 a R1");
        assert_eq!(menu.lab.subnets.len(), 8);
        assert!(out.contains("ERROR device not found: PC9"));
        assert!(out.contains("ERROR invalid parameter: unknown option 'bogus'"));
        assert!(out.ends_with("Hasta luego\n"), "stops reading after quit");
    }

    #[test]
    fn test_menu_export_excel() {
        let dir = std::env::temp_dir().join(format!("ccna_menu_xlsx_{}", std::process::id()));
        let mut menu = Menu::new(crate::labs::lab_10_3_4(), Config::default(), false);
        let mut out = Vec::new();
        let cmd = parse_command(&format!("4 '{}'", dir.display())).unwrap();
        assert!(menu.dispatch(cmd, &mut out).unwrap());

        let files: Vec<_> = std::fs::read_dir(&dir).unwrap().map(|e| e.unwrap().path()).collect();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].extension().unwrap(), "xlsx");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
