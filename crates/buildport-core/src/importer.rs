//! End-to-end import of one build page.

use std::sync::Arc;

use buildport_config::ExtractConfig;
use buildport_protocols::{Build, BuildCatalog, NotificationSink, PageDriver, PageSessionFactory, Variant};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::assembler::BuildAssembler;
use crate::error::ImportError;
use crate::extractor::{ExtractProgress, PageExtractor};

/// Calls [`NotificationSink::completed`] when dropped, so every exit path
/// reports completion exactly once.
struct CompletionGuard(Arc<dyn NotificationSink>);

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.0.completed();
    }
}

/// Drives a page session through extraction, assembly and storage.
pub struct BuildImporter {
    sessions: Arc<dyn PageSessionFactory>,
    config: ExtractConfig,
    assembler: BuildAssembler,
    catalog: Arc<dyn BuildCatalog>,
    sink: Arc<dyn NotificationSink>,
}

impl BuildImporter {
    pub fn new(
        sessions: Arc<dyn PageSessionFactory>,
        config: ExtractConfig,
        assembler: BuildAssembler,
        catalog: Arc<dyn BuildCatalog>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            sessions,
            config,
            assembler,
            catalog,
            sink,
        }
    }

    /// Import the build at `url` and store it under [`Build::id_for_url`].
    ///
    /// The page session is closed on every path. Nothing is stored unless
    /// the whole import succeeds.
    pub async fn import(&self, url: &str, cancel: &CancellationToken) -> Result<Build, ImportError> {
        let _completion = CompletionGuard(Arc::clone(&self.sink));
        info!("Importing build from {}", url);

        let page = match self.sessions.open().await {
            Ok(page) => page,
            Err(e) => {
                let e = ImportError::Session(e);
                self.report_failure(url, &e);
                return Err(e);
            }
        };
        page.set_implicit_wait(self.config.implicit_wait());

        let mut build = Build::for_url(url);
        let result = self.run(page.as_ref(), &mut build, cancel).await;

        if let Err(e) = page.close().await {
            warn!("Failed to close page session: {}", e);
        }

        match result {
            Ok(()) => {
                info!("Imported '{}' with {} variants", build.name, build.variants.len());
                Ok(build)
            }
            Err(e) => {
                self.report_failure(url, &e);
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        page: &dyn PageDriver,
        build: &mut Build,
        cancel: &CancellationToken,
    ) -> Result<(), ImportError> {
        self.sink
            .status_update(build, &format!("Downloading {}.", build.url));
        page.navigate(&build.url).await?;

        let extractor = PageExtractor::new(page, &self.config);
        extractor.dismiss_consent().await?;

        build.name = extractor
            .build_name()
            .await?
            .ok_or_else(|| ImportError::NameNotFound {
                url: build.url.clone(),
            })?;
        self.sink
            .status_update(build, &format!("Downloaded {}.", build.name));

        build.date = extractor.last_update().await?;

        let sink = &self.sink;
        let current: &Build = build;
        let raws = extractor
            .extract_variants_with(&current.name, cancel, |progress| match progress {
                ExtractProgress::Started(name) => {
                    sink.status_update(current, &format!("Exporting {}.", name))
                }
                ExtractProgress::Finished(raw) => {
                    sink.status_update(current, &format!("Exported {}.", raw.name))
                }
            })
            .await?;

        for raw in &raws {
            self.sink
                .status_update(build, &format!("Converting {}.", raw.name));
            let affix_preset = self.assembler.assemble(raw).await?;
            build.variants.push(Variant {
                name: raw.name.clone(),
                affix_preset,
            });
            self.sink
                .status_update(build, &format!("Converted {}.", raw.name));
        }

        self.catalog.put(&build.id, build.clone()).await?;
        self.sink.status_update(build, "Done.");
        Ok(())
    }

    fn report_failure(&self, url: &str, err: &ImportError) {
        let build = Build::for_url(url);
        match err {
            ImportError::NameNotFound { .. } => {
                warn!("No build name found at {}", url);
                self.sink
                    .status_update(&build, "Failed - Build name not found.");
            }
            ImportError::Cancelled => {
                info!("Import of {} cancelled", url);
                self.sink.status_update(&build, "Cancelled.");
            }
            _ => {
                error!("Import of {} failed: {}", url, err);
                self.sink
                    .error_occurred(&format!("Failed to download build ({})", url));
                self.sink.status_update(&build, "Failed.");
            }
        }
    }
}

#[cfg(test)]
#[path = "importer_tests.rs"]
mod tests;
