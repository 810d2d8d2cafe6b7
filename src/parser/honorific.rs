/// Recognized honorifics, longest first so "Assoc Prof" wins over "Prof"
/// and "Mrs" is never read as "Mr".
const HONORIFICS: &[&str] = &[
    "Assoc Prof", "A/Prof", "Prof", "Miss", "Mrs", "Dr", "Mr", "Ms",
];

/// Split a leading honorific off a cleaned-up name.
///
/// A token only counts when a space follows it, so "Drew Barry" keeps its
/// name. Exactly one of the two shapes comes back: `(Some(honorific), rest)`
/// or `(None, full)`.
pub fn split(full: &str) -> (Option<&'static str>, &str) {
    for &h in HONORIFICS {
        if let Some(rest) = full.strip_prefix(h) {
            if let Some(name) = rest.strip_prefix(' ') {
                return (Some(h), name);
            }
        }
    }
    (None, full)
}
