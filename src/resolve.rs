use crate::error::{ProvisionError, Result};

/// Return the single item of `items` that satisfies `predicate`.
///
/// `what` and `criterion` only feed the error message, e.g. `"board"` and
/// `"project EP"`. Zero or several matches fail with
/// [`ProvisionError::Resolution`] carrying the match count.
pub fn exactly_one<T, I, P>(
    items: I,
    what: &'static str,
    criterion: impl Into<String>,
    mut predicate: P,
) -> Result<T>
where
    I: IntoIterator<Item = T>,
    P: FnMut(&T) -> bool,
{
    let mut matches = items.into_iter().filter(|item| predicate(item));
    let first = matches.next();
    let extra = matches.count();

    match (first, extra) {
        (Some(item), 0) => Ok(item),
        (first, extra) => Err(ProvisionError::Resolution {
            what,
            criterion: criterion.into(),
            matches: usize::from(first.is_some()) + extra,
        }),
    }
}
