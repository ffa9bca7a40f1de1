//! Internationalization (i18n) support for display labels
//!
//! Analytics results carry closed enum variants. Human-readable text is only
//! produced here, at the presentation boundary. Supported languages: English
//! (en) and Korean (ko).
//!
//! # Usage
//!
//! ```rust,ignore
//! use edutrend::i18n::{label, set_locale};
//!
//! set_locale("ko");
//! let text = label("diagnosis.sustained_rise", "ko");
//! ```

// Note: rust_i18n::i18n! macro is declared in lib.rs (crate root)

/// Set the process-wide default locale
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(normalize_locale(locale));
}

/// Get the process-wide default locale
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Normalize locale code to a supported one
///
/// - ko-KR, ko_KR, korean -> ko
/// - anything else -> en
pub fn normalize_locale(locale: &str) -> &'static str {
    let lower = locale.to_lowercase();

    if lower.starts_with("ko") || lower == "korean" {
        "ko"
    } else {
        "en"
    }
}

/// Resolve a translation key in an explicit locale
pub fn label(key: &str, locale: &str) -> String {
    t!(key, locale = normalize_locale(locale)).to_string()
}

/// Resolve a key and substitute `%{name}` placeholders
///
/// For callers outside this crate, where `t!` cannot reach the
/// translation table.
pub fn label_with(key: &str, locale: &str, args: &[(&str, String)]) -> String {
    args.iter()
        .fold(label(key, locale), |text, (name, value)| {
            text.replace(&format!("%{{{name}}}"), value)
        })
}

/// Translate a key with optional parameters
///
/// Re-export of `rust_i18n::t!` for call sites that interpolate values.
#[doc(inline)]
pub use rust_i18n::t;
