//! Client identifiers: the namespace key a client's videos are stored under on the CDN.

/// Danish letters and their ASCII transliterations.
const TRANSLITERATIONS: [(char, &str); 6] = [
    ('æ', "ae"),
    ('ø', "oe"),
    ('å', "aa"),
    ('Æ', "ae"),
    ('Ø', "oe"),
    ('Å', "aa"),
];

/// Characters that are never allowed in a filename.
const UNSAFE_CHARS: [char; 33] = [
    '?', '[', ']', '/', '\\', '=', '<', '>', ':', ';', ',', '\'', '"', '&', '$', '#', '*', '(',
    ')', '|', '~', '`', '!', '{', '}', '%', '+', '\u{2019}', '\u{ab}', '\u{bb}', '\u{201d}',
    '\u{201c}', '\0',
];

/// Derive the stable client identifier for a (normalized) client domain.
///
/// `børn.firma.dk` becomes `boern-firma-dk`. The mapping is pure, so the same
/// domain always lands in the same remote namespace.
pub fn client_identifier(domain: &str) -> String {
    let transliterated = transliterate(domain);
    sanitize_file_name(&transliterated).replace('.', "-")
}

fn transliterate(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match TRANSLITERATIONS.iter().find(|(from, _)| *from == ch) {
            Some((_, to)) => out.push_str(to),
            None => out.push(ch),
        }
    }
    out
}

/// Strip unsafe characters, fold whitespace and dash runs into one `-`, and
/// trim leading/trailing `.`, `-` and `_`.
fn sanitize_file_name(input: &str) -> String {
    let stripped: String = input
        .replace("%20", "-")
        .chars()
        .filter(|c| !UNSAFE_CHARS.contains(c))
        .collect();

    let mut out = String::with_capacity(stripped.len());
    let mut in_separator_run = false;
    for ch in stripped.chars() {
        if matches!(ch, '\r' | '\n' | '\t' | ' ' | '-') {
            if !in_separator_run {
                out.push('-');
                in_separator_run = true;
            }
        } else {
            out.push(ch);
            in_separator_run = false;
        }
    }

    out.trim_matches(|c| c == '.' || c == '-' || c == '_')
        .to_string()
}
