//! Country list command handler.

use tabled::Tabled;
use wayfarer_core::Dashboard;
use wayfarer_core::model::CountryOption;

use crate::cli::CountriesArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CountryRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&CountryOption> for CountryRow {
    fn from(c: &CountryOption) -> Self {
        Self {
            code: c.code.clone(),
            name: c.name.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: CountriesArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    let countries = match args.search {
        Some(prefix) => dashboard.search_countries(&prefix).await?,
        None => (*dashboard.available_countries().await?).clone(),
    };
    let out = output::render_list(
        &settings.output,
        &countries,
        |c| CountryRow::from(c),
        |c| c.code.clone(),
    )?;
    output::print_output(&out, settings.quiet);
    Ok(())
}
