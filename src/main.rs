use std::path::PathBuf;
use std::process;
use log::{error, LevelFilter};

use geosegment::commands::{build_cli, CommandFactory, GeosegmentCommandFactory};
use geosegment::config::AppConfig;
use geosegment::utils::logger::Logger;

fn main() {
    let matches = build_cli().get_matches();

    let config_path = matches.get_one::<PathBuf>("config");
    let mut config = match AppConfig::load(config_path.map(PathBuf::as_path)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    if matches.get_flag("verbose") {
        config.log_level = LevelFilter::Debug;
    }

    if let Err(e) = Logger::init_global_logger(&config.log_file, config.log_level) {
        eprintln!("Warning: cannot write log file {}: {}", config.log_file.display(), e);
    }

    let factory = GeosegmentCommandFactory::new();

    let command_result = factory.create_command(&matches, &config);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command failed at the {} stage: {}", e.stage(), e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };
}
