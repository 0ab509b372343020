//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use softo_cache::{FileStore, Store};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, StorefrontConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &config.api.base_url);
    ctx.output.kv("timeout_secs", &config.api.timeout_secs.to_string());
    ctx.output.kv("user_agent", &config.api.user_agent);

    ctx.output.info("");
    ctx.output.info("[cart]");
    ctx.output
        .kv("storage_dir", &ctx.storage_dir().display().to_string());
    ctx.output.kv("storage_key", &config.cart.storage_key);
    ctx.output.kv("currency", config.cart.currency.code());

    ctx.output.info("");
    ctx.output.info("[checkout]");
    ctx.output.kv("phone", &config.checkout.phone);
    ctx.output.kv("greeting", &config.checkout.greeting);
    ctx.output.kv("total_label", &config.checkout.total_label);
    ctx.output.kv("empty_message", &config.checkout.empty_message);
    ctx.output
        .kv("currency_symbol", &format!("{:?}", config.checkout.currency_symbol));

    ctx.output.info("");
    ctx.output.info("[storefront]");
    ctx.output.kv("lang", config.storefront.lang.as_str());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    StorefrontConfig::load(&config_path)?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let config = &ctx.config;
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    let base_url = config.api.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(format!(
            "api.base_url '{}' must start with http:// or https://",
            config.api.base_url
        ));
    }

    if config.api.timeout_secs == 0 {
        errors.push("api.timeout_secs must be greater than 0".to_string());
    }

    let storage_dir = ctx.storage_dir();
    let file_store = FileStore::new(storage_dir.clone());
    if config.cart.storage_key.trim().is_empty() {
        errors.push("cart.storage_key is required".to_string());
    } else if let Err(e) = file_store.path_for(&config.cart.storage_key) {
        errors.push(format!("cart.storage_key: {}", e));
    }

    if let Err(e) = config.checkout.validate() {
        errors.push(format!("checkout.phone: {}", e));
    } else if !config.checkout.phone.trim_start().starts_with('+') {
        warnings.push("checkout.phone should be in international form (e.g. +9647...)".to_string());
    }

    if config.checkout.greeting.trim().is_empty() {
        warnings.push("checkout.greeting is empty".to_string());
    }

    if let Err(e) = file_store.keys() {
        warnings.push(format!(
            "cart.storage_dir {} is not readable: {}",
            storage_dir.display(),
            e
        ));
    }

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
