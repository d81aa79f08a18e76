/// Inserts `sep` at camel-case word boundaries, maps `/` to `-`.
///
/// A boundary sits before an ASCII uppercase letter that either follows a
/// lowercase letter or digit, or starts a capitalised word (`HTTPServer`
/// splits as `HTTP` + `Server`).
fn split_camel(name: &str, sep: char) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if i > 0 && ch.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if next_is_lower || prev.is_ascii_lowercase() || prev.is_ascii_digit() {
                result.push(sep);
            }
        }
        result.push(if ch == '/' { '-' } else { ch });
    }

    result
}

/// Converts a schema path segment to its command-line token.
///
/// - `privateDatabase` -> `private-database`
/// - `hosting/privateDatabase` -> `hosting-private-database`
/// - `IPLoadbalancing` -> `ip-loadbalancing`
#[must_use]
pub fn camel_to_hyphen(name: &str) -> String {
    split_camel(name, '-').to_lowercase()
}

/// Converts a response key to a shell variable name: `nextBillDate` -> `NEXT_BILL_DATE`.
#[must_use]
pub fn camel_to_bash(name: &str) -> String {
    split_camel(name, '_').to_uppercase()
}

/// Converts a response key to a table label: `nextBillDate` -> `Next bill date`.
#[must_use]
pub fn camel_to_human(name: &str) -> String {
    let spaced = split_camel(name, ' ').to_lowercase();
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
