use heck::ToLowerCamelCase;

/// Derive an operation name from a path and an HTTP verb.
///
/// `/` and `-` separate segments and are dropped; the first kept character of
/// each segment is upper-cased and every other character lower-cased.
/// Characters that cannot appear in an identifier (`{`, `}`, `.`) are
/// dropped. The verb is appended as its own capitalized token.
///
/// Examples:
/// - `GET /pets` → `PetsGet`
/// - `GET /user-profile/{id}` → `UserProfileIdGet`
/// - `POST /Pets/{petId}/photos` → `PetsPetidPhotosPost`
pub fn operation_name(path: &str, verb: &str) -> String {
    let mut name = String::with_capacity(path.len() + verb.len());
    let mut next_upper = true;

    for ch in path.chars() {
        if ch == '/' || ch == '-' {
            next_upper = true;
            continue;
        }
        if !is_identifier_char(ch) {
            continue;
        }
        if next_upper {
            name.extend(ch.to_uppercase());
            next_upper = false;
        } else {
            name.extend(ch.to_lowercase());
        }
    }

    name.push_str(&title_token(verb));
    name
}

/// Upper-case the first character, leave the rest byte-identical.
///
/// `snake_case` and `kebab-case` names are not converted: `pet_id` becomes
/// `Pet_id`.
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Name of the generated client class: `{Title}V{Version}HttpClient`.
///
/// Dots, spaces and other non-identifier characters are removed from the
/// title; one leading `v`/`V` is removed from the version and the remaining
/// non-identifier characters become `_`. A title starting with a digit gets a
/// leading `_`.
pub fn client_class_name(title: &str, version: &str) -> String {
    let mut title: String = title.chars().filter(|c| is_identifier_char(*c)).collect();
    if title.starts_with(|c: char| c.is_ascii_digit()) {
        title.insert(0, '_');
    }
    let version = version
        .trim()
        .strip_prefix(['v', 'V'])
        .unwrap_or(version.trim());
    let version: String = version
        .chars()
        .map(|c| if is_identifier_char(c) { c } else { '_' })
        .collect();
    format!("{title}V{version}HttpClient")
}

/// Name of the output directory: `{TitleWithoutSpaces}HttpClient`.
pub fn output_dir_name(title: &str) -> String {
    let title: String = title
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '/' | '\\'))
        .collect();
    format!("{title}HttpClient")
}

/// A lowerCamelCase identifier for a parameter name.
pub fn parameter_identifier(name: &str) -> String {
    let camel = sanitize_identifier(name).to_lower_camel_case();
    if camel.is_empty() {
        return "unnamed".to_string();
    }
    if camel.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{camel}");
    }
    camel
}

/// The final `/`-segment of a `$ref`: `#/components/schemas/Pet` → `Pet`.
pub fn ref_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}

/// Whether `name` can be used verbatim as an identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => chars.all(is_identifier_char),
        _ => false,
    }
}

fn title_token(word: &str) -> String {
    capitalize_first(&word.to_lowercase())
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Replace runs of non-identifier characters with a single `_`.
fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_separator = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if prev_was_separator && !result.is_empty() {
                result.push('_');
            }
            result.push(ch);
            prev_was_separator = false;
        } else {
            prev_was_separator = true;
        }
    }

    result
}
