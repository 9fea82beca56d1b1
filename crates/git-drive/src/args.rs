// Copyright 2026 Oxide Computer Company

//! Rendering argument lists.

/// Joins the present tokens with single spaces.
///
/// Absent tokens are dropped without leaving extra whitespace, and a
/// sequence with no present tokens yields an empty string.
///
/// ```
/// use git_drive::join_args;
///
/// assert_eq!(join_args([None, Some("-b test")]), "-b test");
/// assert_eq!(join_args([None::<&str>, None]), "");
/// ```
pub fn join_args<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for token in tokens.into_iter().flatten() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token.as_ref());
    }
    out
}
