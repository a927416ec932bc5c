use derive_ex::Ex;

use crate::{SumError, TagList, TaggedSum};


/// A cata handler map keyed by tag names known only at run time.
///
/// Prefer the generated `cata`, which the compiler checks for completeness. `DynCata` is for
/// handler maps assembled from data (plugin tables, configuration), where completeness can only
/// be checked when the map is run.
///
/// Payload types differ from tag to tag, so a handler receives the instance itself. It is only
/// called with an instance that holds the handler's tag.
///
/// ```
/// use tagsum::{DynCata, Maybe};
///
/// let cata = DynCata::new()
///     .on("Just", |m: Maybe<i32>| format!("{m:?}"))?
///     .on("Nothing", |_| "none".to_string())?;
/// assert_eq!(cata.run(Maybe::Just(5))?, "Just(5)");
/// # Ok::<(), tagsum::SumError>(())
/// ```
#[derive(Ex)]
#[derive_ex(Default)]
#[default(Self::new())]
pub struct DynCata<'a, S: TaggedSum, R> {
    handlers: Vec<Option<Handler<'a, S, R>>>,
}

type Handler<'a, S, R> = Box<dyn FnOnce(S) -> R + 'a>;

impl<'a, S: TaggedSum, R> DynCata<'a, S, R> {
    pub fn new() -> Self {
        Self {
            handlers: S::DEF.tags.iter().map(|_| None).collect(),
        }
    }

    /// Registers the handler for `tag`, replacing any previous one.
    ///
    /// `f` is called only with instances whose active tag is `tag`.
    ///
    /// Fails with [`SumError::InvalidTag`] if `tag` is not declared by `S`.
    pub fn on(mut self, tag: &str, f: impl FnOnce(S) -> R + 'a) -> Result<Self, SumError> {
        let index = S::DEF.index_of(tag)?;
        self.handlers[index] = Some(Box::new(f));
        Ok(self)
    }

    /// Tags of `S` that have no handler yet, in declaration order.
    pub fn missing(&self) -> Vec<&'static str> {
        S::DEF
            .tags
            .iter()
            .zip(&self.handlers)
            .filter(|(_, h)| h.is_none())
            .map(|(t, _)| t.name)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.handlers.iter().all(|h| h.is_some())
    }

    /// Invokes the handler for the tag of `instance`.
    ///
    /// Fails with [`SumError::MissingHandler`] unless every tag of `S` has a handler, even when
    /// the handler for the active tag is present.
    pub fn run(mut self, instance: S) -> Result<R, SumError> {
        let missing = self.missing();
        if !missing.is_empty() {
            tracing::debug!(
                sum = S::DEF.name,
                tag = instance.tag(),
                ?missing,
                "incomplete cata handlers"
            );
            return Err(SumError::MissingHandler {
                sum: S::DEF.name,
                tags: TagList(missing),
            });
        }
        match self.handlers[instance.tag_index()].take() {
            Some(f) => Ok(f(instance)),
            None => Err(SumError::MissingHandler {
                sum: S::DEF.name,
                tags: TagList(vec![instance.tag()]),
            }),
        }
    }
}
