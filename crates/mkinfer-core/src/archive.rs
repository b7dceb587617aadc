/// Split a possible archive-member reference into the archive name and the
/// member name.
///
/// The POSIX form is `lib.a(member.o)`: the archive keeps the outer suffix,
/// the member drives stem computation. Names without the member shape pass
/// through unchanged; a stray `)` without a matching `(` is not a member
/// reference.
#[must_use]
pub fn split_member(name: &str) -> (&str, Option<&str>) {
    if let Some(inner) = name.strip_suffix(')')
        && let Some(open) = inner.find('(')
        && open > 0
        && open + 1 < inner.len()
    {
        return (&inner[..open], Some(&inner[open + 1..]));
    }
    (name, None)
}
