//! # Config Commands
//!
//! Read-only access to the display configuration.

use tracing::debug;

use crate::error::ApiError;
use crate::state::ConfigState;

/// Gets the current application configuration.
///
/// Backs `beiyetu config` and the shell's `config` line.
pub fn get_config(config: &ConfigState) -> Result<ConfigState, ApiError> {
    debug!("get_config command");
    Ok(config.clone())
}
