//! Export of imported variants as affix presets.

use std::path::Path;

use buildport_protocols::{AffixPreset, Build, CatalogError, Variant};
use tokio::fs;
use tracing::{debug, info};

/// Name a preset gets when none is given: build and variant name, or just
/// the build name when they coincide.
pub fn default_preset_name(build: &Build, variant: &Variant) -> String {
    if build.name == variant.name {
        build.name.clone()
    } else {
        format!("{} - {}", build.name, variant.name)
    }
}

/// The variant's preset under a new name. A blank `custom_name` keeps
/// `original_name`.
pub fn preset_from_variant(
    variant: &Variant,
    original_name: &str,
    custom_name: Option<&str>,
) -> AffixPreset {
    let name = match custom_name {
        Some(name) if !name.trim().is_empty() => name,
        _ => original_name,
    };

    let mut preset = variant.affix_preset.clone();
    preset.name = name.to_string();
    preset
}

/// Add a preset, replacing any preset with the same name.
pub fn upsert_preset(presets: &mut Vec<AffixPreset>, preset: AffixPreset) {
    presets.retain(|p| p.name != preset.name);
    presets.push(preset);
}

/// Read a preset list. A missing file is an empty list.
pub async fn load_presets(path: &Path) -> Result<Vec<AffixPreset>, CatalogError> {
    if !path.exists() {
        debug!("No preset file at {:?}", path);
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).await?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&content)?)
}

/// Write a preset list as pretty JSON, creating parent directories.
pub async fn save_presets(path: &Path, presets: &[AffixPreset]) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let content = serde_json::to_string_pretty(presets)?;
    fs::write(path, content).await?;
    info!("Saved {} presets to {:?}", presets.len(), path);
    Ok(())
}
