use std::fmt;

use parse_display::Display;

/// Misuse of a tagged sum: an unknown tag, a payload of the wrong length, or an incomplete
/// set of handlers.
///
/// These are programmer errors. Typed call sites cannot produce `InvalidTag` or
/// `MissingHandler` at all; they surface only where a tag name or a handler map is built at
/// run time, such as when decoding a record.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum SumError {
    #[display("\"{tag}\" is not a valid tag of sum \"{sum}\"")]
    InvalidTag { sum: &'static str, tag: String },

    #[display("tag \"{tag}\" of sum \"{sum}\" takes {expected} value(s), but {actual} were given")]
    ArityMismatch {
        sum: &'static str,
        tag: &'static str,
        expected: usize,
        actual: usize,
    },

    #[display("missing cata handlers for sum \"{sum}\": {tags}")]
    MissingHandler { sum: &'static str, tags: TagList },

    #[display("{0}")]
    Custom(String),
}

impl std::error::Error for SumError {}

impl serde::de::Error for SumError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}

/// Tag names listed by [`SumError::MissingHandler`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagList(pub Vec<&'static str>);

impl TagList {
    pub fn tags(&self) -> &[&'static str] {
        &self.0
    }
}
impl fmt::Display for TagList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{tag}\"")?;
        }
        Ok(())
    }
}
