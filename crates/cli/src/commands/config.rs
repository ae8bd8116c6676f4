//! Configuration commands

use anyhow::Result;
use serde::Serialize;

use crate::commands::CommandContext;
use crate::output::Formattable;
use migration_portal_common::PortalConfig;

const MASK: &str = "********";

/// Effective configuration with secrets masked.
#[derive(Debug, Serialize)]
#[serde(transparent)]
struct ConfigView(PortalConfig);

impl ConfigView {
    fn masked(config: &PortalConfig) -> Self {
        let mut config = config.clone();
        if config.auth.shared_password.is_some() {
            config.auth.shared_password = Some(MASK.to_string());
        }
        Self(config)
    }
}

impl Formattable for ConfigView {
    fn format_table(&self) -> Result<String> {
        self.0.to_toml()
    }

    fn format_plain(&self) -> Result<String> {
        self.0.to_toml()
    }
}

/// Show the effective configuration
pub fn show(ctx: &CommandContext) -> Result<()> {
    ctx.emit(&ConfigView::masked(&ctx.config))
}
