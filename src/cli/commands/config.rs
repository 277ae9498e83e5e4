use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, success};
use std::process::Command;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            match serde_yaml::to_string(cfg) {
                Ok(yaml) => println!("{}", yaml),
                Err(e) => error(format!("Failed to render configuration: {}", e)),
            }
        }

        if *edit_config {
            let chosen = editor.clone().unwrap_or_else(default_editor);

            match Command::new(&chosen).arg(&path).status() {
                Ok(s) if s.success() => {
                    success(format!("Configuration edited with '{}'", chosen));
                }
                Ok(s) => {
                    error(format!("Editor '{}' exited with {}", chosen, s));
                }
                Err(e) => {
                    error(format!("Could not launch editor '{}': {}", chosen, e));
                }
            }
        }
    }

    Ok(())
}
