use std::{fmt, marker::PhantomData};

use serde::{
    de::{
        self, value::SeqDeserializer, DeserializeSeed, Deserializer, IgnoredAny,
        IntoDeserializer, MapAccess, SeqAccess, Visitor,
    },
    ser::{SerializeStruct, Serializer},
    Deserialize, Serialize,
};

use crate::{SumError, TaggedSum};


/// A tag name paired with its payload, both known only at run time.
///
/// This is the wire shape of a tagged sum (`{ "tag": "Just", "values": [5] }`) and the input
/// of [`SumDecode::from_record`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record<V> {
    pub tag: String,
    pub values: Vec<V>,
}
impl<V> Record<V> {
    pub fn new(tag: impl Into<String>, values: Vec<V>) -> Self {
        Self {
            tag: tag.into(),
            values,
        }
    }
}

/// Validated construction of a tagged sum from untyped data.
///
/// Generated by `#[derive(TaggedSum)]` with `#[sum(serde)]`, together with `Serialize` and
/// `Deserialize` impls that use the `{ tag, values }` record shape. Unknown tags are rejected
/// with [`SumError::InvalidTag`] and payloads of the wrong length with
/// [`SumError::ArityMismatch`].
pub trait SumDecode<'de>: TaggedSum + Sized {
    /// Reads the payload of the tag at `index` from `seq`.
    ///
    /// Exactly the declared number of values must remain in `seq`.
    fn decode_values<A>(index: usize, seq: A) -> Result<Self, A::Error>
    where
        A: SeqAccess<'de>;

    /// Builds an instance from a tag name and payload that arrived as run-time values.
    ///
    /// ```
    /// use tagsum::{Maybe, Record, SumDecode, SumError};
    ///
    /// let m = Maybe::<i32>::from_record(Record::new("Just", vec![5])).unwrap();
    /// assert_eq!(m, Maybe::Just(5));
    ///
    /// let e = Maybe::<i32>::from_record(Record::new("Nope", Vec::<i32>::new())).unwrap_err();
    /// assert!(matches!(e, SumError::InvalidTag { .. }));
    /// ```
    fn from_record<V>(record: Record<V>) -> Result<Self, SumError>
    where
        V: IntoDeserializer<'de, SumError>,
    {
        let index = Self::DEF
            .check(&record.tag, record.values.len())
            .inspect_err(|e| log_rejected(Self::DEF.name, &record.tag, e))?;
        Self::decode_values(index, SeqDeserializer::new(record.values.into_iter()))
    }
}

fn log_rejected(sum: &'static str, tag: &str, e: &SumError) {
    tracing::debug!(sum, tag, error = %e, "rejected tagged sum record");
}

/// Writes `{ "tag": tag, "values": values }` as a struct named `sum`.
pub fn serialize_record<S, V>(
    serializer: S,
    sum: &'static str,
    tag: &'static str,
    values: &V,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize + ?Sized,
{
    let mut s = serializer.serialize_struct(sum, 2)?;
    s.serialize_field("tag", tag)?;
    s.serialize_field("values", values)?;
    s.end()
}

/// Reads a record written by [`serialize_record`], as a map or as a `[tag, values]` sequence.
pub fn deserialize_record<'de, S, D>(deserializer: D) -> Result<S, D::Error>
where
    S: SumDecode<'de>,
    D: Deserializer<'de>,
{
    deserializer.deserialize_struct(S::DEF.name, FIELDS, RecordVisitor(PhantomData))
}

#[doc(hidden)]
pub fn next_value<'de, S, T, A>(seq: &mut A, index: usize, position: usize) -> Result<T, A::Error>
where
    S: TaggedSum,
    T: Deserialize<'de>,
    A: SeqAccess<'de>,
{
    match seq.next_element()? {
        Some(value) => Ok(value),
        None => {
            let e = S::DEF.arity_mismatch(index, position);
            log_rejected(S::DEF.name, S::DEF.tags[index].name, &e);
            Err(de::Error::custom(e))
        }
    }
}

#[doc(hidden)]
pub fn end_values<'de, S, A>(seq: &mut A, index: usize) -> Result<(), A::Error>
where
    S: TaggedSum,
    A: SeqAccess<'de>,
{
    let mut extra = 0;
    while seq.next_element::<IgnoredAny>()?.is_some() {
        extra += 1;
    }
    if extra == 0 {
        return Ok(());
    }
    let e = S::DEF.arity_mismatch(index, S::DEF.tags[index].arity + extra);
    log_rejected(S::DEF.name, S::DEF.tags[index].name, &e);
    Err(de::Error::custom(e))
}

#[doc(hidden)]
pub fn invalid_index<S: TaggedSum, E: de::Error>(index: usize) -> E {
    E::custom(format_args!(
        "tag index {index} is out of range for sum \"{}\"",
        S::DEF.name
    ))
}

const FIELDS: &[&str] = &["tag", "values"];

#[derive(Deserialize)]
#[serde(field_identifier, rename_all = "lowercase")]
enum Field {
    Tag,
    Values,
}

struct RecordVisitor<S>(PhantomData<fn() -> S>);

fn record_index<S: TaggedSum, E: de::Error>(tag: &str) -> Result<usize, E> {
    S::DEF.index_of(tag).map_err(|e| {
        log_rejected(S::DEF.name, tag, &e);
        E::custom(e)
    })
}

fn decode_empty<'de, S: SumDecode<'de>, E: de::Error>(index: usize) -> Result<S, E> {
    S::decode_values(index, SeqDeserializer::new(std::iter::empty::<()>()))
}

impl<'de, S: SumDecode<'de>> Visitor<'de> for RecordVisitor<S> {
    type Value = S;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a tagged record of sum \"{}\"", S::DEF.name)
    }

    fn visit_map<A>(self, mut map: A) -> Result<S, A::Error>
    where
        A: MapAccess<'de>,
    {
        match map.next_key()? {
            Some(Field::Tag) => {
                let tag: String = map.next_value()?;
                let index = record_index::<S, _>(&tag)?;
                match map.next_key()? {
                    Some(Field::Values) => map.next_value_seed(ValuesSeed::<S>::new(index)),
                    Some(Field::Tag) => Err(de::Error::duplicate_field("tag")),
                    None => decode_empty(index),
                }
            }
            Some(Field::Values) => {
                // The tag is needed to know the payload types, so the values are buffered.
                let values: serde_json::Value = map.next_value()?;
                match map.next_key()? {
                    Some(Field::Tag) => {}
                    Some(Field::Values) => return Err(de::Error::duplicate_field("values")),
                    None => return Err(de::Error::missing_field("tag")),
                }
                let tag: String = map.next_value()?;
                let index = record_index::<S, _>(&tag)?;
                ValuesSeed::<S>::new(index)
                    .deserialize(values)
                    .map_err(de::Error::custom)
            }
            None => Err(de::Error::missing_field("tag")),
        }
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<S, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let Some(tag) = seq.next_element::<String>()? else {
            return Err(de::Error::invalid_length(0, &self));
        };
        let index = record_index::<S, _>(&tag)?;
        match seq.next_element_seed(ValuesSeed::<S>::new(index))? {
            Some(value) => Ok(value),
            None => decode_empty(index),
        }
    }
}

struct ValuesSeed<S> {
    index: usize,
    _phantom: PhantomData<fn() -> S>,
}
impl<S> ValuesSeed<S> {
    fn new(index: usize) -> Self {
        Self {
            index,
            _phantom: PhantomData,
        }
    }
}

impl<'de, S: SumDecode<'de>> DeserializeSeed<'de> for ValuesSeed<S> {
    type Value = S;

    fn deserialize<D>(self, deserializer: D) -> Result<S, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(self)
    }
}

impl<'de, S: SumDecode<'de>> Visitor<'de> for ValuesSeed<S> {
    type Value = S;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let tag = &S::DEF.tags[self.index];
        write!(formatter, "{} value(s) of tag \"{}\"", tag.arity, tag.name)
    }

    fn visit_seq<A>(self, seq: A) -> Result<S, A::Error>
    where
        A: SeqAccess<'de>,
    {
        S::decode_values(self.index, seq)
    }
}
