//! Localized user-facing strings.
//!
//! Catalogs are compiled in. A [`Localizer`] is built once at startup from
//! the configured locale and passed to whatever prints to the console.

use std::fmt::Display;

use tracing::warn;

/// Locale codes with a compiled-in catalog.
pub const SUPPORTED_LOCALES: &[&str] = &["en", "de"];

/// Locale used when the requested one has no catalog.
pub const FALLBACK_LOCALE: &str = "en";

/// Group of related strings.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Bundle {
    /// Status lines shown during normal operation.
    Messages,
    /// Error descriptions shown to the user.
    Errors,
}

type Catalog = &'static [(&'static str, &'static str)];

const EN_MESSAGES: Catalog = &[
    ("server.started", "Server started at {0}:{1}. Waiting for a peer to connect..."),
    ("server.connected", "Peer connected from {0}. You can start typing messages."),
    ("client.connected", "Connected to {0}. You can start typing messages."),
    ("session.ended", "Chat session ended."),
    ("session.disconnected", "Disconnected from peer."),
];

const EN_ERRORS: Catalog = &[
    ("error.server", "Server error"),
    ("error.client", "Client error"),
    ("error.session", "Session error"),
    ("error.configuration", "Configuration error"),
    ("error.application", "Chat application error"),
];

const DE_MESSAGES: Catalog = &[
    ("server.started", "Server gestartet auf {0}:{1}. Warte auf Verbindung eines Partners..."),
    ("server.connected", "Partner verbunden von {0}. Sie können jetzt Nachrichten eingeben."),
    ("client.connected", "Verbunden mit {0}. Sie können jetzt Nachrichten eingeben."),
    ("session.ended", "Chat-Sitzung beendet."),
    ("session.disconnected", "Verbindung zum Partner getrennt."),
];

const DE_ERRORS: Catalog = &[
    ("error.server", "Serverfehler"),
    ("error.client", "Clientfehler"),
    ("error.session", "Sitzungsfehler"),
    ("error.configuration", "Konfigurationsfehler"),
    ("error.application", "Fehler der Chat-Anwendung"),
];

/// Resolves message keys against the catalogs of one locale.
#[derive(Debug, Clone)]
pub struct Localizer {
    locale: &'static str,
    messages: Catalog,
    errors: Catalog,
}

impl Localizer {
    /// Build a localizer for `locale`, falling back to [`FALLBACK_LOCALE`]
    /// when no catalog exists for it.
    #[must_use]
    pub fn new(locale: &str) -> Self {
        match locale.trim().to_ascii_lowercase().as_str() {
            "de" => Self {
                locale: "de",
                messages: DE_MESSAGES,
                errors: DE_ERRORS,
            },
            "en" => Self::english(),
            other => {
                warn!(requested = other, fallback = FALLBACK_LOCALE, "unsupported locale");
                Self::english()
            }
        }
    }

    fn english() -> Self {
        Self {
            locale: "en",
            messages: EN_MESSAGES,
            errors: EN_ERRORS,
        }
    }

    /// Locale code whose catalog is in use.
    #[must_use]
    pub fn locale(&self) -> &'static str {
        self.locale
    }

    /// Template for `key`, if the bundle defines it.
    #[must_use]
    pub fn lookup(&self, bundle: Bundle, key: &str) -> Option<&'static str> {
        let catalog = match bundle {
            Bundle::Messages => self.messages,
            Bundle::Errors => self.errors,
        };
        catalog.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    /// Template for `key`, or the key itself when it is missing.
    #[must_use]
    pub fn message(&self, bundle: Bundle, key: &str) -> String {
        self.lookup(bundle, key).map_or_else(
            || {
                warn!(key, locale = self.locale, "missing localized message");
                key.to_owned()
            },
            str::to_owned,
        )
    }

    /// Resolve `key` and substitute `{0}`, `{1}`, ... with `args`.
    ///
    /// The template is scanned once, so argument text is never itself
    /// treated as a placeholder. Placeholders without a matching argument
    /// are left untouched.
    #[must_use]
    pub fn format(&self, bundle: Bundle, key: &str, args: &[&dyn Display]) -> String {
        let template = self.message(bundle, key);
        let mut text = String::with_capacity(template.len());
        let mut rest = template.as_str();

        while let Some(open) = rest.find('{') {
            text.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let arg = after.find('}').and_then(|close| {
                let index: usize = after[..close].parse().ok()?;
                args.get(index).map(|arg| (arg, close))
            });
            match arg {
                Some((arg, close)) => {
                    text.push_str(&arg.to_string());
                    rest = &after[close + 1..];
                }
                None => {
                    text.push('{');
                    rest = after;
                }
            }
        }
        text.push_str(rest);
        text
    }
}

impl Default for Localizer {
    fn default() -> Self {
        Self::english()
    }
}
