//! Localized notification bodies.

/// Fallback when the requested language has no template.
const DEFAULT_LANGUAGE: &str = "en";

/// `{peer}` is replaced with the peer's display name.
const TEMPLATES: &[(&str, &str)] = &[
    ("de", "Neue Anfrage von {peer}"),
    ("en", "New request from {peer}"),
    ("es", "Nueva solicitud de {peer}"),
    ("fr", "Nouvelle demande de {peer}"),
    ("it", "Nuova richiesta da {peer}"),
    ("ja", "{peer} からの新しいリクエスト"),
    ("ko", "{peer}의 새 요청"),
    ("nl", "Nieuw verzoek van {peer}"),
    ("pt", "Novo pedido de {peer}"),
    ("ru", "Новый запрос от {peer}"),
    ("zh", "来自 {peer} 的新请求"),
];

fn template_for(language: &str) -> &'static str {
    let primary = language
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    let lookup = |lang: &str| {
        TEMPLATES
            .iter()
            .find(|(code, _)| *code == lang)
            .map(|(_, template)| *template)
    };

    lookup(&primary)
        .or_else(|| lookup(DEFAULT_LANGUAGE))
        .unwrap_or("{peer}")
}

/// Formats the notification body shown to the peer.
///
/// Only the primary language subtag is considered (`pt-BR` uses `pt`);
/// unknown languages fall back to English.
pub fn format_message(peer_name: &str, language: &str) -> String {
    template_for(language).replace("{peer}", peer_name)
}
