//! A value that may be absent.

use crate::{cata, TaggedSum};

#[cfg(test)]
mod tests;

/// Either `Just` a value, or `Nothing`.
///
/// The same shape as [`Option`], defined as a tagged sum so it gets `cata`, the
/// `{ tag, values }` codec and the derived `map` / `flatten` / `flat_map`.
#[derive(TaggedSum, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[sum(crate = "crate", serde, values)]
pub enum Maybe<A> {
    Nothing,
    #[sum(success)]
    Just(A),
}

impl<A> Maybe<A> {
    pub fn is_just(&self) -> bool {
        self.cata_ref(cata!(MaybeCata {
            nothing: || false,
            just: |_| true,
        }))
    }

    pub fn is_nothing(&self) -> bool {
        !self.is_just()
    }

    pub fn unwrap_or(self, default: A) -> A {
        self.cata(cata!(MaybeCata {
            nothing: || default,
            just: |a| a,
        }))
    }

    pub fn as_ref(&self) -> Maybe<&A> {
        self.cata_ref(cata!(MaybeCata {
            nothing: || Maybe::Nothing,
            just: Maybe::Just,
        }))
    }

    pub fn into_option(self) -> Option<A> {
        self.cata(cata!(MaybeCata {
            nothing: || None,
            just: Some,
        }))
    }
}

impl<A> Default for Maybe<A> {
    fn default() -> Self {
        Self::Nothing
    }
}

impl<A> From<Option<A>> for Maybe<A> {
    fn from(value: Option<A>) -> Self {
        match value {
            Some(a) => Self::Just(a),
            None => Self::Nothing,
        }
    }
}

impl<A> From<Maybe<A>> for Option<A> {
    fn from(value: Maybe<A>) -> Self {
        value.into_option()
    }
}
