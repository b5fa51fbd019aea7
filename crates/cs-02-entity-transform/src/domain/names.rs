//! Deterministic full-name splitting.

/// A full name split into given and family parts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonName {
    pub given: String,
    pub family: String,
}

/// Split a full name on its first run of whitespace.
///
/// The first token becomes the given name and the remainder (possibly empty)
/// the family name. Leading and trailing whitespace is ignored; whitespace
/// inside the family name is kept as-is.
///
/// ```
/// use cs_02_entity_transform::split_full_name;
///
/// let name = split_full_name("João da Silva");
/// assert_eq!(name.given, "João");
/// assert_eq!(name.family, "da Silva");
/// ```
#[must_use]
pub fn split_full_name(full_name: &str) -> PersonName {
    let trimmed = full_name.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((given, rest)) => PersonName {
            given: given.to_string(),
            family: rest.trim_start().to_string(),
        },
        None => PersonName {
            given: trimmed.to_string(),
            family: String::new(),
        },
    }
}
