use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config { print } = cmd {
        if *print {
            print!("{}", cfg.to_yaml()?);
        } else {
            messages::info("Nothing to do: use --print to show the configuration");
        }
    }
    Ok(())
}
