/// Success-or-failure container for expected business-rule outcomes.
///
/// Every use case returns `Outcome` for the failures a caller is expected to
/// handle (missing product, insufficient stock, wrong transaction state,
/// gateway rejection). Infrastructure faults are *not* carried here; those
/// travel as `Err(StoreError)` on the surrounding `Result`.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T, E = String> {
    inner: Inner<T, E>,
}

#[derive(Debug, Clone, PartialEq)]
enum Inner<T, E> {
    Ok(T),
    Fail(E),
}

impl<T, E> Outcome<T, E> {
    pub fn ok(value: T) -> Self {
        Self {
            inner: Inner::Ok(value),
        }
    }

    pub fn fail(error: E) -> Self {
        Self {
            inner: Inner::Fail(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.inner, Inner::Ok(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_ok()
    }

    /// Consumes the outcome and returns the success value.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a failure; calling this without checking
    /// `is_ok` first is a programming error.
    pub fn value(self) -> T {
        match self.inner {
            Inner::Ok(value) => value,
            Inner::Fail(_) => panic!("cannot get value of a failed result"),
        }
    }

    /// Consumes the outcome and returns the failure value.
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a success.
    pub fn error(self) -> E {
        match self.inner {
            Inner::Ok(_) => panic!("cannot get error of a successful result"),
            Inner::Fail(error) => error,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U, E> {
        match self.inner {
            Inner::Ok(value) => Outcome::ok(f(value)),
            Inner::Fail(error) => Outcome::fail(error),
        }
    }

    /// Monadic bind: chains another fallible step, short-circuiting on the
    /// first failure.
    pub fn flat_map<U>(self, f: impl FnOnce(T) -> Outcome<U, E>) -> Outcome<U, E> {
        match self.inner {
            Inner::Ok(value) => f(value),
            Inner::Fail(error) => Outcome::fail(error),
        }
    }

    /// Aggregates multi-step validation: the first failure in iteration order
    /// wins, otherwise `ok(())`.
    pub fn combine(results: impl IntoIterator<Item = Outcome<T, E>>) -> Outcome<(), E> {
        for result in results {
            if let Inner::Fail(error) = result.inner {
                return Outcome::fail(error);
            }
        }
        Outcome::ok(())
    }
}
