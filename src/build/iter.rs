use std::marker::PhantomData;

use crate::{
    sequence::{Resume, Resumed, Sequence},
    step::Step,
};

/// A sequence that yields the items of an iterator.
///
/// Injected values are ignored. An iterator has no way to catch an injected
/// error, so it is raised straight back to the caller. Once the iterator is
/// exhausted the sequence completes with `()`, and keeps doing so if advanced
/// again.
pub struct FromIter<It, E> {
    iter: It,
    _error: PhantomData<fn() -> E>,
}

/// Create a sequence over the items of `iterable`.
///
/// ```rust
/// use trampoline::prelude::*;
///
/// let mut seq = from_iter::<_, String>([1, 2]);
/// assert_eq!(seq.resume_with_value("ignored"), Ok(Step::Yielded(1)));
/// assert_eq!(seq.resume_with_value("ignored"), Ok(Step::Yielded(2)));
/// assert_eq!(seq.resume_with_value("ignored"), Ok(Step::Complete(())));
/// ```
pub fn from_iter<T, E>(iterable: T) -> FromIter<T::IntoIter, E>
where
    T: IntoIterator,
{
    FromIter {
        iter: iterable.into_iter(),
        _error: PhantomData,
    }
}

impl<I, It, E> Sequence<I, It::Item> for FromIter<It, E>
where
    It: Iterator,
{
    type Return = ();
    type Error = E;

    fn advance(&mut self, resume: Resume<I, E>) -> Resumed<It::Item, (), E> {
        if let Resume::Error(error) = resume {
            return Err(error);
        }
        Ok(match self.iter.next() {
            Some(item) => Step::Yielded(item),
            None => Step::Complete(()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yields_items_then_completes_repeatedly() {
        let mut seq = from_iter::<_, String>(vec!['a', 'b']);

        assert_eq!(Sequence::<(), char>::start(&mut seq), Ok(Step::Yielded('a')));
        assert_eq!(Sequence::<(), char>::start(&mut seq), Ok(Step::Yielded('b')));
        assert_eq!(Sequence::<(), char>::start(&mut seq), Ok(Step::Complete(())));
        assert_eq!(Sequence::<(), char>::start(&mut seq), Ok(Step::Complete(())));
    }

    #[test]
    fn test_raised_error_escapes_without_consuming_item() {
        let mut seq = from_iter::<_, String>(1..=3);

        assert_eq!(seq.resume_with_value(0_u8), Ok(Step::Yielded(1)));
        assert_eq!(
            Sequence::<u8, i32>::resume_with_error(&mut seq, "nope".into()),
            Err("nope".to_string())
        );
        assert_eq!(seq.resume_with_value(0_u8), Ok(Step::Yielded(2)));
    }
}
