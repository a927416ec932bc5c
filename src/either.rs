//! A value of one of two types.

use crate::{cata, TaggedSum};


/// `Left(L)` or `Right(R)`.
///
/// `Right` is the success tag: `map`, `flatten` and `flat_map` act on it and pass `Left`
/// through, which makes `Either<E, T>` behave like `Result<T, E>`.
#[derive(TaggedSum, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[sum(crate = "crate", serde, values)]
pub enum Either<L, R> {
    Left(L),
    #[sum(success)]
    Right(R),
}

impl<L, R> Either<L, R> {
    pub fn left(&self) -> Option<&L> {
        self.cata_ref(cata!(EitherCata {
            left: Some,
            right: |_| None,
        }))
    }

    pub fn right(&self) -> Option<&R> {
        self.cata_ref(cata!(EitherCata {
            left: |_| None,
            right: Some,
        }))
    }

    pub fn swap(self) -> Either<R, L> {
        self.cata(cata!(EitherCata {
            left: Either::Right,
            right: Either::Left,
        }))
    }

    pub fn map_left<L2>(self, f: impl FnOnce(L) -> L2) -> Either<L2, R> {
        self.cata(cata!(EitherCata {
            left: |l| Either::Left(f(l)),
            right: Either::Right,
        }))
    }

    pub fn into_result(self) -> Result<R, L> {
        self.cata(cata!(EitherCata {
            left: Err,
            right: Ok,
        }))
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(value: Result<R, L>) -> Self {
        match value {
            Ok(r) => Self::Right(r),
            Err(l) => Self::Left(l),
        }
    }
}
