//! The state of data fetched asynchronously.

use std::{fmt, future::Future, str::FromStr, task::Poll};

use futures::{future, FutureExt, Stream, StreamExt};
use parse_display::Display;
use serde::{Deserialize, Serialize};

use crate::{cata, TaggedSum};


/// Data that has not been requested, is being fetched, has arrived, or failed to arrive.
///
/// `Data` is the success tag. Several instances can be combined with [`AsyncData::coalesce`]
/// or [`all`], which behave like `Promise.all`: any instance that is not `Data` wins, chosen
/// by a [`Precedence`] among the other three tags.
#[derive(TaggedSum, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[sum(crate = "crate", serde, values)]
pub enum AsyncData<D, E> {
    NotAsked,
    Waiting,
    #[sum(success)]
    Data(D),
    Error(E),
}

/// Tag of an [`AsyncData`], without its payload.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    parse_display::FromStr,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum AsyncTag {
    NotAsked,
    Waiting,
    Data,
    Error,
}

impl<D, E> AsyncData<D, E> {
    pub fn kind(&self) -> AsyncTag {
        self.cata_ref(cata!(AsyncDataCata {
            not_asked: || AsyncTag::NotAsked,
            waiting: || AsyncTag::Waiting,
            data: |_| AsyncTag::Data,
            error: |_| AsyncTag::Error,
        }))
    }

    pub fn is_data(&self) -> bool {
        self.kind() == AsyncTag::Data
    }

    pub fn as_ref(&self) -> AsyncData<&D, &E> {
        self.cata_ref(cata!(AsyncDataCata {
            not_asked: || AsyncData::NotAsked,
            waiting: || AsyncData::Waiting,
            data: AsyncData::Data,
            error: AsyncData::Error,
        }))
    }

    pub fn data(self) -> Option<D> {
        self.split::<()>().ok()
    }

    /// Takes the payload of `Data`, or returns the instance retyped to another data type.
    fn split<D2>(self) -> Result<D, AsyncData<D2, E>> {
        self.cata(cata!(AsyncDataCata {
            not_asked: || Err(AsyncData::NotAsked),
            waiting: || Err(AsyncData::Waiting),
            data: Ok,
            error: |e| Err(AsyncData::Error(e)),
        }))
    }

    /// Merges two instances with the default [`Precedence`] (`Error > Waiting > NotAsked`).
    ///
    /// ```
    /// use tagsum::AsyncData;
    ///
    /// let a = AsyncData::<_, String>::Data(1);
    /// assert_eq!(a.clone().coalesce(AsyncData::Data(2), |a, b| a + b), AsyncData::Data(3));
    /// assert_eq!(
    ///     a.coalesce(AsyncData::<i32, _>::Error("boom".to_string()), |a, b| a + b),
    ///     AsyncData::Error("boom".to_string()),
    /// );
    /// ```
    pub fn coalesce<D2, M>(
        self,
        other: AsyncData<D2, E>,
        merge: impl FnOnce(D, D2) -> M,
    ) -> AsyncData<M, E> {
        self.coalesce_with(other, &Precedence::DEFAULT, merge)
    }

    /// Merges two instances.
    ///
    /// If either is not `Data`, the result is the one that ranks higher in `precedence`
    /// (`self` on a tie). If both are `Data`, the result is `Data` of `merge` applied to both
    /// payloads.
    pub fn coalesce_with<D2, M>(
        self,
        other: AsyncData<D2, E>,
        precedence: &Precedence,
        merge: impl FnOnce(D, D2) -> M,
    ) -> AsyncData<M, E> {
        match (self.split(), other.split()) {
            (Ok(a), Ok(b)) => AsyncData::Data(merge(a, b)),
            (Err(a), Ok(_)) => a,
            (Ok(_), Err(b)) => b,
            (Err(a), Err(b)) => {
                if precedence.rank(a.kind()) <= precedence.rank(b.kind()) {
                    a
                } else {
                    b
                }
            }
        }
    }
}

impl<D, E> Default for AsyncData<D, E> {
    fn default() -> Self {
        Self::NotAsked
    }
}

impl<D, E> From<Result<D, E>> for AsyncData<D, E> {
    fn from(value: Result<D, E>) -> Self {
        match value {
            Ok(d) => Self::Data(d),
            Err(e) => Self::Error(e),
        }
    }
}

impl<D, E> From<Poll<Result<D, E>>> for AsyncData<D, E> {
    fn from(value: Poll<Result<D, E>>) -> Self {
        match value {
            Poll::Ready(r) => r.into(),
            Poll::Pending => Self::Waiting,
        }
    }
}

/// Tracks `future` as `Waiting`, then `Data` or `Error` once it completes.
pub fn watch<D, E>(
    fut: impl Future<Output = Result<D, E>>,
) -> impl Stream<Item = AsyncData<D, E>> {
    futures::stream::once(future::ready(AsyncData::Waiting))
        .chain(futures::stream::once(fut.map(AsyncData::from)))
}

/// Coalesces a tuple of [`AsyncData`] into one whose data is the tuple of all payloads.
///
/// ```
/// use tagsum::{async_data, AsyncData};
///
/// let all = async_data::all((AsyncData::<_, String>::Data(1), AsyncData::Data("a")));
/// assert_eq!(all, AsyncData::Data((1, "a")));
/// ```
pub fn all<E, T: AllData<E>>(instances: T) -> AsyncData<T::Data, E> {
    instances.all()
}

/// Tuples of [`AsyncData`] sharing an error type, up to 8 elements.
///
/// Folds the tuple with [`AsyncData::coalesce_with`], so the result is the first instance of
/// the highest precedence when any instance is not `Data`.
pub trait AllData<E> {
    type Data;

    fn all_with(self, precedence: &Precedence) -> AsyncData<Self::Data, E>;

    fn all(self) -> AsyncData<Self::Data, E>
    where
        Self: Sized,
    {
        self.all_with(&Precedence::DEFAULT)
    }
}

macro_rules! impl_all_data {
    () => {
        impl<E> AllData<E> for () {
            type Data = ();

            fn all_with(self, _precedence: &Precedence) -> AsyncData<(), E> {
                AsyncData::Data(())
            }
        }
    };
    ($h:ident $hv:ident $(, $t:ident $tv:ident)*) => {
        impl<E, $h, $($t,)*> AllData<E> for (AsyncData<$h, E>, $(AsyncData<$t, E>,)*) {
            type Data = ($h, $($t,)*);

            fn all_with(self, precedence: &Precedence) -> AsyncData<Self::Data, E> {
                let ($hv, $($tv,)*) = self;
                $hv.coalesce_with(
                    ($($tv,)*).all_with(precedence),
                    precedence,
                    |$hv, ($($tv,)*)| ($hv, $($tv,)*),
                )
            }
        }
        impl_all_data!($($t $tv),*);
    };
}

impl_all_data!(D1 d1, D2 d2, D3 d3, D4 d4, D5 d5, D6 d6, D7 d7, D8 d8);

/// Order in which the tags other than `Data` win a [`AsyncData::coalesce_with`].
///
/// `Data` always ranks lowest. Parsed from and displayed as `"Error > Waiting > NotAsked"`,
/// and deserialized from a list of tag names, highest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<AsyncTag>", into = "Vec<AsyncTag>")]
pub struct Precedence([AsyncTag; 3]);

#[derive(Clone, Debug, Display, PartialEq, Eq)]
#[display("invalid precedence `{order}`: expected NotAsked, Waiting and Error, each once")]
pub struct PrecedenceError {
    order: String,
}

impl std::error::Error for PrecedenceError {}

impl Precedence {
    pub const DEFAULT: Self = Self([AsyncTag::Error, AsyncTag::Waiting, AsyncTag::NotAsked]);

    /// # Panics
    ///
    /// Panics unless `order` lists `NotAsked`, `Waiting` and `Error` exactly once each.
    pub fn new(order: [AsyncTag; 3]) -> Self {
        match Self::try_new(order) {
            Ok(p) => p,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(order: [AsyncTag; 3]) -> Result<Self, PrecedenceError> {
        Self::try_from(order.to_vec())
    }

    /// Tags from highest to lowest.
    pub fn order(&self) -> [AsyncTag; 3] {
        self.0
    }

    /// Position of `tag` in the order; `Data` ranks after every other tag.
    pub fn rank(&self, tag: AsyncTag) -> usize {
        self.0.iter().position(|t| *t == tag).unwrap_or(self.0.len())
    }
}

impl Default for Precedence {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<Vec<AsyncTag>> for Precedence {
    type Error = PrecedenceError;

    fn try_from(order: Vec<AsyncTag>) -> Result<Self, Self::Error> {
        let err = || PrecedenceError {
            order: order
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(" > "),
        };
        let [a, b, c] = <[AsyncTag; 3]>::try_from(order.as_slice()).map_err(|_| err())?;
        let tags = [a, b, c];
        if tags.contains(&AsyncTag::Data) || a == b || b == c || a == c {
            return Err(err());
        }
        Ok(Self(tags))
    }
}

impl From<Precedence> for Vec<AsyncTag> {
    fn from(value: Precedence) -> Self {
        value.0.to_vec()
    }
}

impl fmt::Display for Precedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a} > {b} > {c}")
    }
}

impl FromStr for Precedence {
    type Err = PrecedenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let order = s
            .split('>')
            .map(|t| t.trim().parse::<AsyncTag>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| PrecedenceError {
                order: s.to_string(),
            })?;
        Self::try_from(order)
    }
}
