//! Import subcommand.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use buildport_catalog_json::JsonBuildCatalog;
use buildport_config::Config;
use buildport_core::{AffixResolver, BuildAssembler, BuildImporter, CatalogIndex, TracingSink};
use buildport_driver_cdp::CdpSessionFactory;

/// Import one build page. Ctrl-C cancels between variants and slots.
pub(crate) async fn import(config: &Config, url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let index = CatalogIndex::load(&config.catalog.affixes, &config.catalog.aspects)?;
    let resolver = AffixResolver::new(Arc::new(index))
        .with_low_confidence(config.resolve.low_confidence_score)
        .with_aspect_marker(&config.extract.aspect_marker);
    let assembler =
        BuildAssembler::new(Arc::new(resolver)).with_max_concurrent(config.resolve.max_concurrent);

    let catalog = Arc::new(JsonBuildCatalog::new(&config.storage.builds_dir).await?);
    let sessions = Arc::new(CdpSessionFactory::new(config.browser.clone()));
    let importer = BuildImporter::new(
        sessions.clone(),
        config.extract.clone(),
        assembler,
        catalog,
        Arc::new(TracingSink),
    );

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling import");
                cancel.cancel();
            }
        })
    };

    let result = importer.import(url, &cancel).await;
    interrupt.abort();
    sessions.shutdown().await;

    let build = result?;
    info!("Stored build {} in {}", build.id, config.storage.builds_dir.display());

    println!("{} ({})", build.name, build.id);
    for variant in &build.variants {
        println!(
            "  {:<32} {:>3} affixes  {:>3} aspects",
            variant.name,
            variant.affix_preset.item_affixes.len(),
            variant.affix_preset.item_aspects.len()
        );
    }
    Ok(())
}
