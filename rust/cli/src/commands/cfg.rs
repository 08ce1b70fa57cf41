//! Configuration command handler.
//!
//! Prints the resolved configuration as pretty JSON, each value paired with
//! where it came from:
//!
//! ```json
//! {
//!   "seed": { "value": null, "source": "default" },
//!   "spin_duration_secs": { "value": 6.0, "source": "default" },
//!   "sound_enabled": { "value": true, "source": "default" }
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "spin_duration_secs": {
            "value": config.spin_duration_secs,
            "source": sources.spin_duration_secs,
        },
        "sound_enabled": {
            "value": config.sound_enabled,
            "source": sources.sound_enabled,
        }
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&display)?)?;
    Ok(())
}
