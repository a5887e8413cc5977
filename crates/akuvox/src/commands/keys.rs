//! `akuvox keys` -- list temporary door keys.

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tabled::Tabled;

use akuvox_config::Config;
use akuvox_core::store::load_door_keys;
use akuvox_core::{CredentialAttributes, CredentialView};

use crate::cli::{GlobalOpts, KeysArgs};
use crate::error::CliError;
use crate::output;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Serialize)]
struct KeyRecord<'a> {
    name: String,
    #[serde(flatten)]
    attributes: CredentialAttributes<'a>,
}

#[derive(Tabled)]
struct KeyRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Begin")]
    begin: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Used")]
    used: String,
}

fn status_label(active: bool) -> &'static str {
    if active {
        "active"
    } else {
        "expired"
    }
}

pub fn handle(args: &KeysArgs, global: &GlobalOpts, cfg: &Config) -> Result<(), CliError> {
    let path = super::store_path(global, cfg)?;
    let records = load_door_keys(&path).map_err(|e| CliError::store(&path, e))?;

    let now = args.at.unwrap_or_else(|| Local::now().naive_local());
    let view = CredentialView::from_records(&records, now);
    let keys: Vec<KeyRecord<'_>> = view
        .credentials()
        .iter()
        .filter(|c| !args.active || c.is_key_active())
        .map(|c| KeyRecord {
            name: c.name(),
            attributes: c.attributes(),
        })
        .collect();

    let rendered = output::render_list(
        global.output,
        &keys,
        |k| KeyRow {
            name: k.name.clone(),
            code: k.attributes.key_code.to_owned(),
            status: status_label(k.attributes.enabled),
            begin: format_time(k.attributes.begin_time),
            end: format_time(k.attributes.end_time),
            used: format!("{}/{}", k.attributes.access_times, k.attributes.allowed_times),
        },
        |k| k.name.clone(),
    );
    output::print_output(&rendered, global.quiet);
    Ok(())
}

/// One-line summary used by `watch`.
pub fn summary(view: &CredentialView) -> String {
    let mut line = format!(
        "{} door keys, {} active",
        view.len(),
        view.active().count()
    );
    for credential in view.credentials() {
        line.push_str(&format!("\n  {} [{}]", credential.name(), status_label(credential.is_key_active())));
    }
    line
}

fn format_time(t: NaiveDateTime) -> String {
    t.format(TIME_FORMAT).to_string()
}
