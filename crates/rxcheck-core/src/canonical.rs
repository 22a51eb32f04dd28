//! Drug name canonicalization.
//!
//! Table keys follow a single-capitalized-word convention: "Warfarin",
//! "Contrast dye". User input is mapped onto that convention before any
//! lookup so matching is case-insensitive.

use rxcheck_contracts::drug::DrugName;

/// Upper-case the first character and lower-case every following one.
///
/// Empty input yields an empty string. Whitespace is preserved; trimming is
/// the caller's job. Case mapping is the standard library's Unicode mapping
/// with no locale tailoring.
///
/// Idempotent whenever the first character upper-cases to a single
/// character, which covers ASCII and every name in the reference table. A
/// leading character that expands (`ß` becomes `SS`) leaves an upper-case
/// second character behind, so a second pass lowers it.
pub fn canonicalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Canonicalize `input` into a [`DrugName`].
pub fn canonical_name(input: &str) -> DrugName {
    DrugName(canonicalize(input))
}
