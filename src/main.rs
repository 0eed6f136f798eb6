use ccna_subnet_tables::cmdline::{Cli, Command};
use ccna_subnet_tables::config::load_config;
use ccna_subnet_tables::labs::lab_by_id;
use ccna_subnet_tables::menu::Menu;
use ccna_subnet_tables::output::{export_lab, write_lab, ExportFormat};
use ccna_subnet_tables::{run_subnets, stdout_sink};
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config as LogConfig, Root};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    init_logging()?;
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    log::info!("#Start main() {:?}", cli.command);

    let config = load_config(&cli.config_dir)?.with_env();
    let color = !cli.no_color;

    match cli.command {
        Command::Subnets {
            network,
            new_prefix,
            csv,
            json,
            xlsx,
        } => {
            let exports: Vec<(ExportFormat, &std::path::Path)> = [
                (ExportFormat::Csv, csv.as_deref()),
                (ExportFormat::Json, json.as_deref()),
                (ExportFormat::Xlsx, xlsx.as_deref()),
            ]
            .into_iter()
            .filter_map(|(format, path)| path.map(|p| (format, p)))
            .collect();
            let mut sink = stdout_sink(color);
            run_subnets(network, new_prefix, &exports, &mut sink, config.csv_bom)?;
        }
        Command::Lab {
            id,
            assign,
            export,
            format,
        } => {
            let mut lab = lab_by_id(&id)?;
            if let Some(base) = assign {
                lab.assign_addresses(base)?;
            }
            write_lab(&lab, &mut stdout_sink(color))?;
            if let Some(dir) = export {
                for path in export_lab(&lab, &dir, &config.file_prefix, format, config.csv_bom)? {
                    println!("  - {}", path.display());
                }
            }
        }
        Command::Menu { lab } => {
            let lab = lab_by_id(&lab)?;
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            Menu::new(lab, config, color).run(stdin.lock(), &mut stdout)?;
        }
    }

    log::info!("#End main()");
    Ok(())
}

/// log4rs.yml when present, otherwise info level to stderr.
fn init_logging() -> Result<(), Box<dyn Error>> {
    if std::path::Path::new("log4rs.yml").exists() {
        log4rs::init_file("log4rs.yml", Default::default())?;
    } else {
        let stderr = ConsoleAppender::builder().target(Target::Stderr).build();
        let config = LogConfig::builder()
            .appender(Appender::builder().build("stderr", Box::new(stderr)))
            .build(Root::builder().appender("stderr").build(LevelFilter::Info))?;
        log4rs::init_config(config)?;
    }
    Ok(())
}
