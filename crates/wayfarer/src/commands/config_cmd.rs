//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::{Input, Select};

use super::util::{self, prompt_err};
use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking the plaintext key.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref dir) = cfg.data_dir {
        let _ = writeln!(out, "data_dir = \"{}\"", dir.display());
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "year = {}", cfg.defaults.year);

    let p = &cfg.providers;
    let _ = writeln!(out);
    let _ = writeln!(out, "[providers]");
    let urls = [
        ("nager_url", &p.nager_url),
        ("restcountries_url", &p.restcountries_url),
        ("ticketmaster_url", &p.ticketmaster_url),
        ("open_meteo_url", &p.open_meteo_url),
        ("sunrise_sunset_url", &p.sunrise_sunset_url),
    ];
    for (key, value) in urls {
        if let Some(url) = value {
            let _ = writeln!(out, "{key} = \"{url}\"");
        }
    }
    if p.ticketmaster_api_key.is_some() {
        let _ = writeln!(out, "ticketmaster_api_key = \"****\"");
    }
    if let Some(ref env) = p.ticketmaster_api_key_env {
        let _ = writeln!(out, "ticketmaster_api_key_env = \"{env}\"");
    }

    out.truncate(out.trim_end().len());
    out
}

fn save(cfg: &Config, quiet: bool) -> Result<(), CliError> {
    let path = config::save_config(cfg)?;
    if !quiet {
        eprintln!("Config saved to {}", path.display());
    }
    Ok(())
}

fn read_key(provided: Option<String>) -> Result<String, CliError> {
    let key = match provided {
        Some(key) => key,
        None => rpassword::prompt_password("Ticketmaster API key: ").map_err(prompt_err)?,
    };
    let key = key.trim().to_owned();
    if key.is_empty() {
        return Err(CliError::Validation {
            field: "key".into(),
            reason: "API key cannot be empty".into(),
        });
    }
    Ok(key)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            output::print_output(&format_config_redacted(&cfg), global.quiet);
            Ok(())
        }

        ConfigCommand::SetKey { key, plaintext } => {
            let key = read_key(key)?;
            if plaintext {
                let mut cfg = config::load_config()?;
                cfg.providers.ticketmaster_api_key = Some(key);
                save(&cfg, global.quiet)
            } else {
                wayfarer_config::store_ticketmaster_key(&key)?;
                if !global.quiet {
                    eprintln!("Ticketmaster API key stored in system keyring");
                }
                Ok(())
            }
        }

        ConfigCommand::Init => init(global),
    }
}

/// Interactive wizard writing a fresh config file.
fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_path();
    if path.exists()
        && !util::confirm(
            &format!("{} exists. Overwrite?", path.display()),
            "config init",
            global.yes,
        )?
    {
        return Ok(());
    }

    eprintln!("wayfarer configuration");
    eprintln!("   Config path: {}\n", path.display());

    let mut cfg = Config::default();

    let formats = ["table", "json", "yaml", "plain"];
    let choice = Select::new()
        .with_prompt("Default output format")
        .items(&formats)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    cfg.defaults.output = formats.get(choice).copied().unwrap_or("table").into();

    cfg.defaults.year = Input::new()
        .with_prompt("Default year")
        .default(cfg.defaults.year)
        .interact_text()
        .map_err(prompt_err)?;

    let storage = [
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
        "Skip (events will be unavailable)",
    ];
    let where_key = Select::new()
        .with_prompt("Ticketmaster API key")
        .items(&storage)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    match where_key {
        0 => {
            wayfarer_config::store_ticketmaster_key(&read_key(None)?)?;
            eprintln!("   Key stored in system keyring");
        }
        1 => cfg.providers.ticketmaster_api_key = Some(read_key(None)?),
        _ => {}
    }

    save(&cfg, global.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plaintext_key_is_masked() {
        let mut cfg = Config::default();
        cfg.providers.ticketmaster_api_key = Some("super-secret".into());
        cfg.providers.nager_url = Some("http://localhost:9000/nager/".into());

        let shown = format_config_redacted(&cfg);
        assert!(!shown.contains("super-secret"));
        assert!(shown.contains("ticketmaster_api_key = \"****\""));
        assert!(shown.contains("nager_url = \"http://localhost:9000/nager/\""));
        assert!(shown.contains("year = 2026"));
    }
}
