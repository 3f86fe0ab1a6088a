//! Preview binary - renders the landing page in the negotiated language
//!
//! Usage:
//!   cargo run --bin preview                        # Negotiate like a first visit
//!   cargo run --bin preview -- --lang it           # Then switch to Italian
//!   cargo run --bin preview -- --validate          # Also check dictionary coverage
//!
//! Optional environment variables:
//! - TRANSLATIONS_URL (load dictionaries over HTTP instead of from disk)
//! - TRANSLATIONS_DIR (defaults to i18n/translations)
//! - PREFERENCES_FILE (defaults to .little-beans/preferences.json)
//! - PREFERRED_LANGUAGES (comma list; defaults to the OS locales)

use anyhow::{bail, Result};
use little_beans_site::config::Config;
use little_beans_site::dom::Document;
use little_beans_site::i18n::{
    DictionaryLoader, DictionaryValidator, I18n, Language, LanguageOutcome, SetLanguageOptions,
    TranslationMetrics,
};
use little_beans_site::site::landing_page;
use little_beans_site::storage::JsonFileStore;
use little_beans_site::widgets::quotes::DEFAULT_TESTIMONIAL_COUNT;
use little_beans_site::widgets::{self, JoinForm, Planner, QuoteRotator, Widget};
use std::sync::Arc;
use tracing::{info, warn};

struct Args {
    lang: Option<String>,
    validate: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        lang: None,
        validate: false,
    };

    let mut raw = std::env::args().skip(1);
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--lang" => match raw.next() {
                Some(value) => args.lang = Some(value),
                None => bail!("--lang requires a language code"),
            },
            "--validate" => args.validate = true,
            other => bail!("Unknown argument: {}", other),
        }
    }

    Ok(args)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("little_beans_site=info".parse()?),
        )
        .init();

    let args = parse_args()?;
    let config = Config::from_env()?;

    info!("Rendering landing page preview");

    let i18n = Arc::new(I18n::new(
        config.translation_source(),
        Arc::new(JsonFileStore::new(&config.preferences_file)),
        landing_page(),
    ));

    let quotes = Arc::new(QuoteRotator::new(DEFAULT_TESTIMONIAL_COUNT));
    let page_widgets: Vec<Arc<dyn Widget>> = vec![Arc::new(Planner::new()), quotes.clone()];

    let preferred = config.preferred_languages();
    let outcome = i18n.start(preferred.as_slice()).await;
    report_outcome(&outcome);
    widgets::render_all(&i18n, &page_widgets);

    if let Some(lang) = &args.lang {
        let outcome = i18n.set_language(lang, SetLanguageOptions { persist: true }).await;
        report_outcome(&outcome);
        widgets::render_all(&i18n, &page_widgets);
    }

    i18n.with_document(|document| {
        quotes.next(i18n.translator(), document);
        print_page(document);
    });

    let confirmation = i18n.with_document(|document| {
        if let Some(name) = document.get_by_id_mut(widgets::join_form::NAME_INPUT_ID) {
            name.set_attribute("value", "Sam");
        }
        JoinForm::new().submit(i18n.translator(), document)
    });
    if let Some(message) = confirmation {
        println!("\nJoin form confirmation: {}", message);
    }

    if args.validate {
        validate_dictionaries(&config).await;
    }

    println!(
        "\nMetrics: {}",
        serde_json::to_string_pretty(&i18n.metrics().report())?
    );

    Ok(())
}

fn report_outcome(outcome: &LanguageOutcome) {
    match outcome {
        LanguageOutcome::Applied { language } => {
            info!("Showing page in {} ({})", language.name(), language.native_name())
        }
        LanguageOutcome::Unsupported { requested, language } => {
            warn!("'{}' is not supported, showing {}", requested, language.name())
        }
        LanguageOutcome::LoadFailed {
            requested,
            language,
            error,
        } => warn!(
            "Could not load {} ({}), showing {}",
            requested.name(),
            error,
            language.name()
        ),
    }
}

fn print_page(document: &Document) {
    println!("<html lang=\"{}\">", document.lang());
    for element in document.elements() {
        let id = element
            .id
            .as_deref()
            .map(|id| format!("#{}", id))
            .unwrap_or_default();
        let attributes: Vec<String> = element
            .attributes
            .iter()
            .filter(|(name, _)| !name.starts_with("data-"))
            .map(|(name, value)| format!("{}=\"{}\"", name, value))
            .collect();

        println!(
            "  <{}{}> {} {}",
            element.tag,
            id,
            attributes.join(" "),
            element.text
        );
    }
}

async fn validate_dictionaries(config: &Config) {
    let loader = DictionaryLoader::new(config.translation_source(), Arc::new(TranslationMetrics::new()));

    let fallback = match loader.load(Language::fallback()).await {
        Ok(dictionary) => dictionary,
        Err(e) => {
            warn!("Cannot validate without the {} dictionary: {}", Language::fallback().name(), e);
            return;
        }
    };

    println!("\nDictionary validation:");
    for language in Language::all().into_iter().filter(|l| !l.is_fallback()) {
        match loader.load(language).await {
            Ok(dictionary) => {
                let report = DictionaryValidator::validate(&fallback, &dictionary);
                println!(
                    "  {}: {} errors, {} warnings",
                    language,
                    report.errors.len(),
                    report.warnings.len()
                );
                for error in &report.errors {
                    println!("    error: {}", error);
                }
                for warning in &report.warnings {
                    println!("    warning: {}", warning);
                }
            }
            Err(e) => println!("  {}: failed to load ({})", language, e),
        }
    }
}
