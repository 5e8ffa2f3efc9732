//! # Config Commands

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current register configuration.
///
/// ## When Used
/// - Client startup (store name, tender tabs)
/// - Currency formatting on the client side
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
