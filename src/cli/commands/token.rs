use anyhow::Context;
use uuid::Uuid;

use crate::auth::issue_token;
use crate::config::AppConfig;

pub fn handle(config: &AppConfig, user: Uuid, hours: Option<u64>) -> anyhow::Result<()> {
    let hours = hours.unwrap_or(config.security.jwt_expiry_hours);
    let token = issue_token(&config.security.jwt_secret, user, hours)
        .context("failed to sign token")?;

    println!("{}", token);
    Ok(())
}
