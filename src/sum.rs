use std::fmt;

use parse_display::Display;

use crate::SumError;

#[cfg(test)]
mod tests;

/// A closed set of named tags, each carrying a fixed-arity positional payload.
///
/// Implement it with `#[derive(TaggedSum)]` on an enum. The derive also generates the
/// exhaustive `cata` operator: a handlers struct with one field per tag, so a call site
/// that leaves a tag unhandled, or names a tag the sum does not have, does not compile.
///
/// ```
/// use tagsum::{cata, Maybe, MaybeCata};
///
/// let doubled = Maybe::Just(5).cata(cata!(MaybeCata {
///     just: |v| v * 2,
///     nothing: || 0,
/// }));
/// assert_eq!(doubled, 10);
/// ```
///
/// Leaving out a handler is rejected by the compiler:
///
/// ```compile_fail
/// use tagsum::{cata, Maybe, MaybeCata};
///
/// let doubled = Maybe::Just(5).cata(cata!(MaybeCata { just: |v: i32| v * 2 }));
/// ```
///
/// So is a tag that is not declared:
///
/// ```compile_fail
/// use tagsum::Maybe;
///
/// let nope = Maybe::<i32>::Nope(1);
/// ```
///
/// # Derive errors
///
/// Misuse of `#[derive(TaggedSum)]` is reported at compile time.
///
/// The derive accepts only enums:
///
/// ```compile_fail
/// use tagsum::TaggedSum;
///
/// #[derive(TaggedSum)]
/// struct Point(i32, i32);
/// ```
///
/// Payloads are positional, so struct-like variants are rejected:
///
/// ```compile_fail
/// use tagsum::TaggedSum;
///
/// #[derive(TaggedSum)]
/// enum Shape {
///     Circle { radius: f64 },
/// }
/// ```
///
/// Tag names must be unique:
///
/// ```compile_fail
/// use tagsum::TaggedSum;
///
/// #[derive(TaggedSum)]
/// enum Light {
///     On,
///     #[sum(rename = "On")]
///     Off,
/// }
/// ```
///
/// So must the handler names derived from them:
///
/// ```compile_fail
/// use tagsum::TaggedSum;
///
/// #[derive(TaggedSum)]
/// enum Fetch {
///     #[sum(rename = "not-asked")]
///     Idle,
///     NotAsked,
/// }
/// ```
///
/// A tag must map to a handler name:
///
/// ```compile_fail
/// use tagsum::TaggedSum;
///
/// #[derive(TaggedSum)]
/// enum Blank {
///     #[sum(rename = "")]
///     Empty,
/// }
/// ```
///
/// At most one tag is the success tag:
///
/// ```compile_fail
/// use tagsum::TaggedSum;
///
/// #[derive(TaggedSum)]
/// enum Pair<A, B> {
///     #[sum(success)]
///     First(A),
///     #[sum(success)]
///     Second(B),
/// }
/// ```
///
/// The success tag carries exactly one value of a bare type parameter:
///
/// ```compile_fail
/// use tagsum::TaggedSum;
///
/// #[derive(TaggedSum)]
/// enum Many<A> {
///     Empty,
///     #[sum(success)]
///     Items(Vec<A>),
/// }
/// ```
///
/// That type parameter has no bounds:
///
/// ```compile_fail
/// use tagsum::TaggedSum;
///
/// #[derive(TaggedSum)]
/// enum Bounded<A: Clone> {
///     Empty,
///     #[sum(success)]
///     Value(A),
/// }
/// ```
///
/// Nor a where clause:
///
/// ```compile_fail
/// use tagsum::TaggedSum;
///
/// #[derive(TaggedSum)]
/// enum Constrained<A>
/// where
///     A: Clone,
/// {
///     Empty,
///     #[sum(success)]
///     Value(A),
/// }
/// ```
///
/// And it appears in no other tag:
///
/// ```compile_fail
/// use tagsum::TaggedSum;
///
/// #[derive(TaggedSum)]
/// enum Leaky<A> {
///     Other(Vec<A>),
///     #[sum(success)]
///     Value(A),
/// }
/// ```
///
/// Unknown `sum` attributes are errors:
///
/// ```compile_fail
/// use tagsum::TaggedSum;
///
/// #[derive(TaggedSum)]
/// #[sum(tagged)]
/// enum Unknown {
///     A,
/// }
/// ```
pub trait TaggedSum {
    /// Declaration of this sum: its name and every tag with its arity, in declaration order.
    const DEF: SumDef;

    /// Position of the active tag in [`SumDef::tags`].
    fn tag_index(&self) -> usize;

    /// Name of the active tag.
    ///
    /// Meant for debugging. Branching on it gives up the exhaustiveness `cata` provides.
    fn tag(&self) -> &'static str {
        Self::DEF.tags[self.tag_index()].name
    }

    fn arity(&self) -> usize {
        Self::DEF.tags[self.tag_index()].arity
    }

    fn is_tag(&self, tag: &str) -> bool {
        self.tag() == tag
    }

    fn sum_name(&self) -> &'static str {
        Self::DEF.name
    }
}

/// Builds a handlers struct generated by `#[derive(TaggedSum)]`, one field per tag.
///
/// The struct also carries the payload types in a marker field so that handler closures need
/// no type annotations; this macro fills that field in.
///
/// ```
/// use tagsum::{cata, Maybe, MaybeCata};
///
/// let m = Maybe::Just("abc".to_string());
/// let len = m.cata_ref(cata!(MaybeCata {
///     just: |s| s.len(),
///     nothing: || 0,
/// }));
/// assert_eq!(len, 3);
/// ```
#[macro_export]
macro_rules! cata {
    ($($cata:ident)::+ { $($handler:ident : $f:expr),* $(,)? }) => {
        $($cata)::+ {
            $($handler: $f,)*
            __phantom: ::core::marker::PhantomData,
        }
    };
}

/// Read access to the payload of the active tag, for debugging.
///
/// Generated by `#[derive(TaggedSum)]` with `#[sum(values)]`.
pub trait SumValues {
    fn values(&self) -> Vec<&dyn fmt::Debug>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SumDef {
    pub name: &'static str,
    pub tags: &'static [TagDef],
}

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
#[display("{name}/{arity}")]
pub struct TagDef {
    pub name: &'static str,
    pub arity: usize,
}

impl SumDef {
    pub fn tag_names(&self) -> impl Iterator<Item = &'static str> {
        self.tags.iter().map(|t| t.name)
    }

    pub fn get(&self, tag: &str) -> Option<&'static TagDef> {
        self.tags.iter().find(|t| t.name == tag)
    }

    /// Resolves a tag name that arrived as a run-time value.
    pub fn index_of(&self, tag: &str) -> Result<usize, SumError> {
        self.tags
            .iter()
            .position(|t| t.name == tag)
            .ok_or_else(|| SumError::InvalidTag {
                sum: self.name,
                tag: tag.to_string(),
            })
    }

    /// Resolves a tag name and checks that `arity` values are the right payload length for it.
    pub fn check(&self, tag: &str, arity: usize) -> Result<usize, SumError> {
        let index = self.index_of(tag)?;
        if self.tags[index].arity != arity {
            return Err(self.arity_mismatch(index, arity));
        }
        Ok(index)
    }

    pub(crate) fn arity_mismatch(&self, index: usize, actual: usize) -> SumError {
        let tag = &self.tags[index];
        SumError::ArityMismatch {
            sum: self.name,
            tag: tag.name,
            expected: tag.arity,
            actual,
        }
    }
}
impl fmt::Display for SumDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} =", self.name)?;
        for (i, tag) in self.tags.iter().enumerate() {
            if i != 0 {
                write!(f, " |")?;
            }
            write!(f, " {tag}")?;
        }
        Ok(())
    }
}
