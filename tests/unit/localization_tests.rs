use peer_chat::localization::{Bundle, Localizer, FALLBACK_LOCALE, SUPPORTED_LOCALES};

#[test]
fn english_is_default() {
    assert_eq!(Localizer::default().locale(), "en");
}

#[test]
fn german_catalog_is_selected() {
    let localizer = Localizer::new("de");
    assert_eq!(localizer.locale(), "de");
    assert_eq!(
        localizer.message(Bundle::Errors, "error.server"),
        "Serverfehler"
    );
}

#[test]
fn locale_code_is_normalized() {
    assert_eq!(Localizer::new(" DE ").locale(), "de");
}

#[test]
fn unknown_locale_falls_back() {
    let localizer = Localizer::new("fr");
    assert_eq!(localizer.locale(), FALLBACK_LOCALE);
    assert_eq!(localizer.message(Bundle::Errors, "error.client"), "Client error");
}

#[test]
fn missing_key_yields_key() {
    let localizer = Localizer::default();
    assert!(localizer.lookup(Bundle::Messages, "no.such.key").is_none());
    assert_eq!(localizer.message(Bundle::Messages, "no.such.key"), "no.such.key");
}

#[test]
fn bundles_are_separate() {
    let localizer = Localizer::default();
    assert!(localizer.lookup(Bundle::Messages, "error.server").is_none());
    assert!(localizer.lookup(Bundle::Errors, "server.started").is_none());
}

#[test]
fn format_substitutes_positional_arguments() {
    let localizer = Localizer::default();
    let text = localizer.format(Bundle::Messages, "server.started", &[&"127.0.0.1", &4242]);
    assert_eq!(
        text,
        "Server started at 127.0.0.1:4242. Waiting for a peer to connect..."
    );
}

#[test]
fn format_leaves_unmatched_placeholders() {
    let localizer = Localizer::default();
    let text = localizer.format(Bundle::Messages, "server.started", &[&"host"]);
    assert!(text.contains("host:{1}"));
}

#[test]
fn format_does_not_expand_placeholders_inside_arguments() {
    let localizer = Localizer::default();
    let text = localizer.format(Bundle::Messages, "server.started", &[&"{1}", &4242]);
    assert_eq!(
        text,
        "Server started at {1}:4242. Waiting for a peer to connect..."
    );
}

#[test]
fn format_keeps_non_numeric_braces() {
    let localizer = Localizer::default();
    let text = localizer.format(Bundle::Messages, "no.such {key}", &[&"x"]);
    assert_eq!(text, "no.such {key}");
}

#[test]
fn every_locale_defines_the_same_keys() {
    let keys = [
        (Bundle::Messages, "server.started"),
        (Bundle::Messages, "server.connected"),
        (Bundle::Messages, "client.connected"),
        (Bundle::Messages, "session.ended"),
        (Bundle::Messages, "session.disconnected"),
        (Bundle::Errors, "error.server"),
        (Bundle::Errors, "error.client"),
        (Bundle::Errors, "error.session"),
        (Bundle::Errors, "error.configuration"),
        (Bundle::Errors, "error.application"),
    ];

    for locale in SUPPORTED_LOCALES {
        let localizer = Localizer::new(locale);
        for (bundle, key) in keys {
            assert!(
                localizer.lookup(bundle, key).is_some(),
                "{locale} is missing {key}"
            );
        }
    }
}
