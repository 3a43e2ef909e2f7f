//! CLI command handlers.

use std::path::Path;

use crate::auth::AuthStrategy;
use crate::config::FlairConfig;
use crate::error::Result;
use crate::types::Resource;

/// Load config from a file when given, otherwise from the environment.
pub fn load_config(path: Option<&Path>) -> Result<FlairConfig> {
    match path {
        Some(path) => FlairConfig::load_from_path(path),
        None => FlairConfig::from_env(),
    }
}

/// Handle `flair token`. Never prints the token itself.
pub async fn handle_token(config: &FlairConfig) -> Result<()> {
    let strategy = config.build_strategy()?;
    let token = strategy.valid_token().await?;
    println!("strategy:   {}", strategy.identifier());
    println!("token type: {}", token.token_type);
    println!("expires at: {}", token.expires_at);
    println!(
        "refreshable: {}",
        if token.refresh_token.is_some() { "yes" } else { "no" }
    );
    Ok(())
}

/// Handle `flair validate`.
pub async fn handle_validate(config: &FlairConfig) -> Result<bool> {
    let client = config.build_client()?;
    let ok = client.validate_credentials().await;
    if ok {
        println!("Credentials OK");
    } else {
        eprintln!("Credentials rejected; check client id, secret, username and password");
    }
    Ok(ok)
}

/// Handle `flair structures`.
pub async fn handle_structures(config: &FlairConfig) -> Result<()> {
    let client = config.build_client()?;
    print_resources(&client.structures().await?);
    Ok(())
}

/// Handle `flair rooms`.
pub async fn handle_rooms(config: &FlairConfig) -> Result<()> {
    let client = config.build_client()?;
    print_resources(&client.rooms().await?);
    Ok(())
}

/// Handle `flair set-point <room> <celsius>`.
pub async fn handle_set_point(config: &FlairConfig, room: &str, celsius: f64) -> Result<()> {
    let client = config.build_client()?;
    let updated = client.set_room_set_point(room, celsius).await?;
    println!(
        "{}  set-point-c={}",
        updated.name().unwrap_or(&updated.id),
        updated
            .attribute_f64("set-point-c")
            .map_or_else(|| "?".to_string(), |c| format!("{c:.1}"))
    );
    Ok(())
}

fn print_resources(resources: &[Resource]) {
    for resource in resources {
        println!("{:<12} {}", resource.id, resource.name().unwrap_or("-"));
    }
}
