//! Fluent-backed message catalogues for user-facing diagnostics.
//!
//! Every error the engine reports to a test author is rendered through the
//! catalogues embedded from `i18n/`. A process-wide loader serves English by
//! default; [`ScopedLocalization`] swaps the language for the current thread
//! only, which keeps parallel tests independent.

use std::cell::RefCell;
use std::sync::{LazyLock, RwLock};

use fluent::FluentArgs;
use i18n_embed::I18nEmbedError;
use i18n_embed::fluent::{FluentLanguageLoader, fluent_language_loader};
use rust_embed::RustEmbed;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

/// Embedded Fluent resources shipped with the crate.
///
/// # Examples
/// ```
/// # use nested_steps::localization::Localizations;
/// # use i18n_embed::fluent::fluent_language_loader;
/// # use unic_langid::langid;
/// let loader = fluent_language_loader!();
/// let selected = i18n_embed::select(&loader, &Localizations, &[langid!("fr")])
///     .unwrap_or_else(|err| panic!("{err}"));
/// assert!(selected.contains(&langid!("fr")));
/// ```
#[derive(RustEmbed)]
#[folder = "i18n"]
pub struct Localizations;

static GLOBAL_LOADER: LazyLock<RwLock<FluentLanguageLoader>> = LazyLock::new(|| {
    let loader = load(&[unic_langid::langid!("en-US")])
        .unwrap_or_else(|error| panic!("embedded English catalogue must load: {error}"));
    RwLock::new(loader)
});

thread_local! {
    static SCOPED_LOADERS: RefCell<Vec<FluentLanguageLoader>> = const { RefCell::new(Vec::new()) };
}

/// Errors from localisation setup.
#[derive(Debug, Error)]
pub enum LocalizationError {
    /// The process-wide loader lock was poisoned.
    #[error("localization state is poisoned")]
    Poisoned,
    /// Loading or selecting Fluent resources failed.
    #[error("failed to load localization resources: {0}")]
    Loader(#[from] I18nEmbedError),
}

fn load(requested: &[LanguageIdentifier]) -> Result<FluentLanguageLoader, LocalizationError> {
    let loader = fluent_language_loader!();
    i18n_embed::select(&loader, &Localizations, requested)?;
    Ok(loader)
}

/// Guard that renders messages in the requested languages on the current
/// thread until dropped.
///
/// Guards nest: dropping the innermost one restores the previous selection.
#[must_use]
pub struct ScopedLocalization {
    _private: (),
}

impl ScopedLocalization {
    /// Activate `requested` for the current thread.
    ///
    /// # Errors
    ///
    /// Returns [`LocalizationError::Loader`] if the catalogues cannot be
    /// loaded for the requested languages.
    pub fn new(requested: &[LanguageIdentifier]) -> Result<Self, LocalizationError> {
        let loader = load(requested)?;
        SCOPED_LOADERS.with(|stack| stack.borrow_mut().push(loader));
        Ok(Self { _private: () })
    }
}

impl Drop for ScopedLocalization {
    fn drop(&mut self) {
        SCOPED_LOADERS.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Change the process-wide languages.
///
/// Threads holding a [`ScopedLocalization`] keep their own selection.
///
/// # Errors
///
/// Returns [`LocalizationError::Poisoned`] when the global lock is poisoned or
/// [`LocalizationError::Loader`] when resource selection fails.
pub fn set_languages(
    requested: &[LanguageIdentifier],
) -> Result<Vec<LanguageIdentifier>, LocalizationError> {
    let guard = GLOBAL_LOADER
        .write()
        .map_err(|_| LocalizationError::Poisoned)?;
    Ok(i18n_embed::select(&*guard, &Localizations, requested)?)
}

/// Languages used to render messages on the current thread, most preferred
/// first.
#[must_use]
pub fn active_languages() -> Vec<LanguageIdentifier> {
    with_loader(FluentLanguageLoader::current_languages)
}

/// Render a message without arguments.
///
/// # Examples
/// ```
/// # use nested_steps::localization;
/// assert_eq!(
///     localization::message("snippet-orphan-table"),
///     "a table row must follow a step"
/// );
/// ```
#[must_use]
pub fn message(id: &str) -> String {
    with_loader(|loader| loader.get(id))
}

/// Render a message with Fluent arguments supplied by `configure`.
///
/// Directional isolates around arguments are removed so the result can be
/// compared and searched as plain text.
///
/// # Examples
/// ```
/// # use nested_steps::localization;
/// let rendered = localization::message_with_args("step-error-failed", |args| {
///     args.set("message", "boom".to_string());
/// });
/// assert!(rendered.contains("boom"));
/// ```
#[must_use]
pub fn message_with_args<F>(id: &str, configure: F) -> String
where
    F: FnOnce(&mut FluentArgs<'static>),
{
    let mut args = FluentArgs::new();
    configure(&mut args);
    let rendered = with_loader(|loader| loader.get_args_fluent(id, Some(&args)));
    strip_directional_isolates(&rendered)
}

fn with_loader<R>(render: impl FnOnce(&FluentLanguageLoader) -> R) -> R {
    SCOPED_LOADERS.with(|stack| {
        let stack = stack.borrow();
        if let Some(loader) = stack.last() {
            return render(loader);
        }
        drop(stack);
        let guard = GLOBAL_LOADER
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        render(&guard)
    })
}

/// Remove the Unicode directional isolates Fluent places around arguments.
#[must_use]
pub fn strip_directional_isolates(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(*c, '\u{2066}'..='\u{2069}'))
        .collect()
}

/// Panic with a localised message resolved from a Fluent ID and key–value
/// arguments.
#[macro_export]
macro_rules! panic_localized {
    ($id:expr $(, $key:ident = $value:expr )* $(,)?) => {{
        let message = $crate::localization::message_with_args($id, |args| {
            $( args.set(stringify!($key), $value.to_string()); )*
        });
        panic!("{message}");
    }};
}
