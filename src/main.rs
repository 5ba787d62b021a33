use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use translation_resolver::config::Config;
use translation_resolver::i18n::{
    build_module_index, discover_translation_modules, ModuleIndex, TranslationResolver,
};
use translation_resolver::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translation_resolver=info".parse()?),
        )
        .init();

    info!("Starting translation resolver");

    let config = Config::from_env()?;

    // Step 1: Discover translation modules
    let modules = discover_translation_modules(&config.translations_dir)?;

    // Step 2: Build and install the process-wide module index
    ModuleIndex::install(build_module_index(modules))
        .context("Failed to install translation module index")?;
    let index = ModuleIndex::global()?;
    info!(
        "Indexed {} languages: {:?}",
        index.len(),
        index.languages()
    );

    if index.is_empty() {
        warn!(
            dir = %config.translations_dir.display(),
            "No translation modules found"
        );
    }

    if !index.contains(config.default_language.as_str()) {
        warn!(
            language = %config.default_language,
            "Default language has no translation module"
        );
    }

    // Step 3: Build the resolver
    let resolver = TranslationResolver::new(index, config.assembly_strategy.build())
        .with_default_language(config.default_language.clone())
        .with_missing_language_policy(config.missing_language_policy);

    info!(
        "Resolver ready (strategy: {:?}, missing language policy: {:?})",
        config.assembly_strategy, config.missing_language_policy
    );

    // Step 4: Serve
    let state = AppState::new(Arc::new(resolver), config.api_key.clone());
    server::serve(state, config.port).await
}
