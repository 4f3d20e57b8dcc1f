//! District canonicalization
//!
//! Only numbered Prague districts are distinguished; every other value,
//! including named cadastral areas, falls into one catch-all bucket.

/// Bucket for anything that is not a numbered district
pub const OTHER_DISTRICT: &str = "Praha - Ostatní";

const CITY_PREFIX: &str = "Praha ";

/// Longest accepted canonical form, e.g. `"Praha 22"`
const MAX_DISTRICT_CHARS: usize = 8;

/// Canonicalize a district to `"Praha <N>"` or [`OTHER_DISTRICT`]
pub fn normalize_district(value: Option<&str>) -> String {
    let Some(value) = value else {
        return OTHER_DISTRICT.to_string();
    };

    let titled = title_case(value);
    let normalized = titled.trim();

    if normalized.starts_with(CITY_PREFIX) && normalized.chars().count() <= MAX_DISTRICT_CHARS {
        if let Some(number) = normalized.split(' ').nth(1) {
            if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
                return format!("{CITY_PREFIX}{number}");
            }
        }
    }

    OTHER_DISTRICT.to_string()
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest
fn title_case(value: &str) -> String {
    let mut titled = String::with_capacity(value.len());
    let mut inside_word = false;

    for c in value.chars() {
        if c.is_alphabetic() {
            if inside_word {
                titled.extend(c.to_lowercase());
            } else {
                titled.extend(c.to_uppercase());
            }
            inside_word = true;
        } else {
            titled.push(c);
            inside_word = false;
        }
    }

    titled
}
