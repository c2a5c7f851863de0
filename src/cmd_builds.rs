//! Catalog subcommands: list, show, delete and preset export.

use tracing::info;

use buildport_catalog_json::JsonBuildCatalog;
use buildport_config::Config;
use buildport_core::{default_preset_name, load_presets, preset_from_variant, save_presets, upsert_preset};
use buildport_protocols::{Build, BuildCatalog, CatalogError};

async fn open_catalog(config: &Config) -> Result<JsonBuildCatalog, Box<dyn std::error::Error>> {
    Ok(JsonBuildCatalog::new(&config.storage.builds_dir).await?)
}

async fn find_build(catalog: &JsonBuildCatalog, id: &str) -> Result<Build, CatalogError> {
    catalog
        .get(id)
        .await?
        .ok_or_else(|| CatalogError::NotFound(id.to_string()))
}

/// List all imported builds.
pub(crate) async fn list(config: &Config, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let builds = open_catalog(config).await?.get_all().await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&builds)?);
        return Ok(());
    }

    if builds.is_empty() {
        println!("No builds imported.");
        return Ok(());
    }

    println!("{:<40} {:<20} {:>8}  ID", "NAME", "UPDATED", "VARIANTS");
    for build in &builds {
        println!(
            "{:<40} {:<20} {:>8}  {}",
            build.name,
            build.date,
            build.variants.len(),
            build.id
        );
    }
    Ok(())
}

/// Print one build as JSON.
pub(crate) async fn show(config: &Config, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = open_catalog(config).await?;
    let build = find_build(&catalog, id).await?;
    println!("{}", serde_json::to_string_pretty(&build)?);
    Ok(())
}

/// Remove one build.
pub(crate) async fn delete(config: &Config, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = open_catalog(config).await?;
    let build = find_build(&catalog, id).await?;
    catalog.delete(id).await?;
    println!("Deleted {} ({})", build.name, build.id);
    Ok(())
}

/// Add a variant's preset to the preset file, replacing a preset of the same name.
pub(crate) async fn preset(
    config: &Config,
    id: &str,
    variant_name: &str,
    name: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = open_catalog(config).await?;
    let build = find_build(&catalog, id).await?;
    let variant = build.variant(variant_name).ok_or_else(|| {
        CatalogError::NotFound(format!("variant '{}' in build {}", variant_name, build.id))
    })?;

    let preset = preset_from_variant(variant, &default_preset_name(&build, variant), name);
    let preset_name = preset.name.clone();

    let path = &config.storage.presets_file;
    let mut presets = load_presets(path).await?;
    upsert_preset(&mut presets, preset);
    save_presets(path, &presets).await?;

    info!("Exported preset '{}' to {}", preset_name, path.display());
    println!("Saved preset '{}'", preset_name);
    Ok(())
}
