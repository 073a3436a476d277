use fluent_bundle::bundle::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use intl_memoizer::concurrent::IntlLangMemoizer;
use once_cell::sync::Lazy;
use rust_embed::RustEmbed;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

use crate::heirs::HeirKind;

#[derive(RustEmbed)]
#[folder = "assets/locales"]
struct Asset;

/// Supported locales for messages and heir labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize, JsonSchema)]
pub enum FaraidhLocale {
    #[default]
    #[serde(rename = "en-US")]
    EnUS,
    #[serde(rename = "id-ID")]
    IdID,
}

impl FaraidhLocale {
    pub const ALL: [FaraidhLocale; 2] = [FaraidhLocale::EnUS, FaraidhLocale::IdID];

    pub fn as_str(&self) -> &'static str {
        match self {
            FaraidhLocale::EnUS => "en-US",
            FaraidhLocale::IdID => "id-ID",
        }
    }
}

impl FromStr for FaraidhLocale {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en-US" | "en" => Ok(FaraidhLocale::EnUS),
            "id-ID" | "id" => Ok(FaraidhLocale::IdID),
            _ => Err(format!("Unsupported locale: {}", s)),
        }
    }
}

type Bundle = FluentBundle<FluentResource, IntlLangMemoizer>;

#[derive(Clone)]
pub struct Translator {
    bundles: Arc<HashMap<FaraidhLocale, Bundle>>,
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("locales", &self.bundles.keys())
            .finish()
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    /// Loads every embedded `main.ftl`. A locale whose resource is missing or broken is
    /// skipped with a warning and falls back to en-US at lookup time.
    pub fn new() -> Self {
        let mut bundles = HashMap::new();

        for locale in FaraidhLocale::ALL {
            match load_bundle(locale) {
                Ok(bundle) => {
                    bundles.insert(locale, bundle);
                }
                Err(reason) => {
                    tracing::warn!(locale = locale.as_str(), %reason, "translation bundle not loaded");
                }
            }
        }

        Translator { bundles: Arc::new(bundles) }
    }

    pub fn translate(&self, locale: FaraidhLocale, key: &str, args: Option<&FluentArgs>) -> String {
        if let Some(bundle) = self.bundles.get(&locale) {
            if let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) {
                let mut errors = vec![];
                let value = bundle.format_pattern(pattern, args, &mut errors);
                if !errors.is_empty() {
                    tracing::debug!(key, ?errors, "fluent formatting reported errors");
                }
                return value.to_string();
            }
        }

        if locale != FaraidhLocale::EnUS {
            return self.translate(FaraidhLocale::EnUS, key, args);
        }

        format!("MISSING:{}", key)
    }

    pub fn translate_with_args(
        &self,
        locale: FaraidhLocale,
        key: &str,
        args: Option<&HashMap<String, String>>,
    ) -> String {
        match args {
            Some(map) => {
                let mut f_args = FluentArgs::new();
                for (k, v) in map {
                    f_args.set(k.as_str(), v.to_string());
                }
                self.translate(locale, key, Some(&f_args))
            }
            None => self.translate(locale, key, None),
        }
    }

    /// Display label of a heir category, e.g. "Anak perempuan".
    pub fn heir_label(&self, locale: FaraidhLocale, heir: HeirKind) -> String {
        self.translate(locale, &heir.label_key(), None)
    }
}

fn load_bundle(locale: FaraidhLocale) -> Result<Bundle, String> {
    let lang_id: LanguageIdentifier = locale
        .as_str()
        .parse()
        .map_err(|e| format!("bad language id: {:?}", e))?;
    let mut bundle = FluentBundle::new_concurrent(vec![lang_id]);
    // Messages are plain text; no bidi isolation marks around placeables.
    bundle.set_use_isolating(false);

    let file_path = format!("{}/main.ftl", locale.as_str());
    let file = Asset::get(&file_path).ok_or_else(|| format!("{} not embedded", file_path))?;
    let source = std::str::from_utf8(file.data.as_ref())
        .map_err(|e| format!("{} is not utf-8: {}", file_path, e))?;
    let resource = FluentResource::try_new(source.to_string())
        .map_err(|(_, errors)| format!("{} failed to parse: {:?}", file_path, errors))?;
    bundle
        .add_resource(resource)
        .map_err(|errors| format!("{} has conflicting messages: {:?}", file_path, errors))?;

    Ok(bundle)
}

static DEFAULT_TRANSLATOR: Lazy<Translator> = Lazy::new(Translator::new);

/// The process-wide translator, loaded on first use.
pub fn default_translator() -> &'static Translator {
    &DEFAULT_TRANSLATOR
}
