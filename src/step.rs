use either::Either;

/// Result of advancing a sequence: either an intermediate yield or the final result.
///
/// `Yielded` means the sequence is suspended and expects to be resumed again.
/// `Complete` carries the final result; a sequence that returned it must not be
/// advanced again.
///
/// # Examples
///
/// ```rust
/// use trampoline::Step;
///
/// let suspended: Step<i32, String> = Step::Yielded(42);
/// let finished: Step<i32, String> = Step::Complete("done".to_string());
///
/// assert!(!suspended.is_done());
/// assert!(finished.is_done());
/// assert_eq!(suspended.map_yielded(|x| x * 2), Step::Yielded(84));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step<Y, R> {
    /// The sequence suspended with an intermediate value.
    Yielded(Y),
    /// The sequence finished with its final value.
    Complete(R),
}

impl<Y, R> Step<Y, R> {
    /// Returns `true` if the step is `Yielded`.
    #[inline]
    pub const fn is_yielded(&self) -> bool {
        matches!(self, Step::Yielded(_))
    }

    /// Returns `true` if the step is `Complete`.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Step::Complete(_))
    }

    /// The `isDone` flag of the step: `true` once the sequence has completed.
    ///
    /// Same as [`is_complete`](Step::is_complete).
    #[inline]
    pub const fn is_done(&self) -> bool {
        self.is_complete()
    }

    /// Splits the step into its value and its `isDone` flag.
    ///
    /// ```rust
    /// use either::Either;
    /// use trampoline::Step;
    ///
    /// let (value, done) = Step::<i32, &str>::Yielded(1).into_parts();
    /// assert_eq!(value, Either::Left(1));
    /// assert!(!done);
    ///
    /// let (value, done) = Step::<i32, &str>::Complete("end").into_parts();
    /// assert_eq!(value, Either::Right("end"));
    /// assert!(done);
    /// ```
    #[inline]
    pub fn into_parts(self) -> (Either<Y, R>, bool) {
        let done = self.is_done();
        (self.into_either(), done)
    }

    /// Converts the step into an `Either`, yields on the left.
    #[inline]
    pub fn into_either(self) -> Either<Y, R> {
        match self {
            Step::Yielded(y) => Either::Left(y),
            Step::Complete(r) => Either::Right(r),
        }
    }

    /// Converts from `Step<Y, R>` to `Option<Y>`, discarding a final value.
    #[inline]
    pub fn yielded_value(self) -> Option<Y> {
        match self {
            Step::Yielded(y) => Some(y),
            Step::Complete(_) => None,
        }
    }

    /// Converts from `Step<Y, R>` to `Option<R>`, discarding a yielded value.
    #[inline]
    pub fn complete_value(self) -> Option<R> {
        match self {
            Step::Yielded(_) => None,
            Step::Complete(r) => Some(r),
        }
    }

    /// Maps the final value, leaving a yield untouched.
    ///
    /// ```rust
    /// use trampoline::Step;
    ///
    /// let x: Step<i32, i32> = Step::Complete(5);
    /// assert_eq!(x.map_complete(|v| v * 2), Step::Complete(10));
    /// ```
    #[inline]
    pub fn map_complete<R2, F>(self, f: F) -> Step<Y, R2>
    where
        F: FnOnce(R) -> R2,
    {
        match self {
            Step::Yielded(y) => Step::Yielded(y),
            Step::Complete(r) => Step::Complete(f(r)),
        }
    }

    /// Maps the yielded value, leaving a final value untouched.
    #[inline]
    pub fn map_yielded<Y2, F>(self, f: F) -> Step<Y2, R>
    where
        F: FnOnce(Y) -> Y2,
    {
        match self {
            Step::Yielded(y) => Step::Yielded(f(y)),
            Step::Complete(r) => Step::Complete(r),
        }
    }

    /// Converts from `&Step<Y, R>` to `Step<&Y, &R>`.
    #[inline]
    pub const fn as_ref(&self) -> Step<&Y, &R> {
        match self {
            Step::Yielded(y) => Step::Yielded(y),
            Step::Complete(r) => Step::Complete(r),
        }
    }

    /// Returns the yielded value.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the step is `Complete`.
    #[inline]
    pub fn expect_yielded(self, msg: &str) -> Y {
        match self {
            Step::Yielded(y) => y,
            Step::Complete(_) => panic!("{}", msg),
        }
    }

    /// Returns the final value.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the step is `Yielded`.
    #[inline]
    pub fn expect_complete(self, msg: &str) -> R {
        match self {
            Step::Yielded(_) => panic!("{}", msg),
            Step::Complete(r) => r,
        }
    }

    /// Returns the yielded value.
    ///
    /// # Panics
    ///
    /// Panics if the step is `Complete`.
    ///
    /// ```should_panic
    /// use trampoline::Step;
    ///
    /// let x: Step<i32, &str> = Step::Complete("complete");
    /// x.unwrap_yielded(); // panics
    /// ```
    #[inline]
    pub fn unwrap_yielded(self) -> Y {
        match self {
            Step::Yielded(y) => y,
            Step::Complete(_) => panic!("called `Step::unwrap_yielded()` on a `Complete` value"),
        }
    }

    /// Returns the final value.
    ///
    /// # Panics
    ///
    /// Panics if the step is `Yielded`.
    #[inline]
    pub fn unwrap_complete(self) -> R {
        match self {
            Step::Yielded(_) => panic!("called `Step::unwrap_complete()` on a `Yielded` value"),
            Step::Complete(r) => r,
        }
    }
}

impl<Y, R> From<Step<Y, R>> for Either<Y, R> {
    fn from(step: Step<Y, R>) -> Self {
        step.into_either()
    }
}

impl<Y, R> From<Either<Y, R>> for Step<Y, R> {
    fn from(either: Either<Y, R>) -> Self {
        match either {
            Either::Left(y) => Step::Yielded(y),
            Either::Right(r) => Step::Complete(r),
        }
    }
}
