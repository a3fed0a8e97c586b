use smallvec::SmallVec;

pub type Fields<'a> = SmallVec<[&'a str; 15]>;

/// Splits `s` on `sep`, skipping the empty tokens.
///
/// Consecutive separators count as one and leading or trailing separators are ignored,
/// so an input made only of separators gives an empty result.
pub fn split_fields(s: &str, sep: u8) -> Fields<'_> {
    debug_assert!(sep.is_ascii());

    let mut fields = Fields::new();
    if s.is_empty() {
        return fields;
    }

    fields.extend(s.split(char::from(sep)).filter(|field| !field.is_empty()));
    fields
}
