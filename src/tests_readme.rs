// #![include_doc("../README.md", start)]
//! # tagsum
//!
//! `tagsum` is a library for tagged sums: enums whose variants are addressed by tag name, consumed
//! through exhaustive handler records, and carried over the wire as `{ "tag": ..., "values": [...] }`.
//!
//! ## Features
//!
//! - `#[derive(TaggedSum)]` for any enum with unit or tuple variants
//! - A generated cata record per sum, built with `cata!`, so a missing handler is a compile error
//! - `map`, `flat_map` and `flatten` over the variant marked as the success tag
//! - Validated construction from run-time data, rejecting unknown tags and wrong arities
//! - Ready-made `Maybe`, `Either` and `AsyncData`
//!
//! ## Example
//!
//! ```rust
//! use tagsum::{cata, Maybe, MaybeCata, Record, SumDecode, SumError};
//!
//! let double = |m: Maybe<i32>| {
//!     m.cata(cata!(MaybeCata {
//!         just: |v| v * 2,
//!         nothing: || 0,
//!     }))
//! };
//! assert_eq!(double(Maybe::Just(5)), 10);
//! assert_eq!(double(Maybe::Nothing), 0);
//!
//! assert_eq!(Maybe::Just(2).map(|x| x + 1), Maybe::Just(3));
//!
//! let e = Maybe::<i32>::from_record(Record::new("Nope", Vec::<i32>::new())).unwrap_err();
//! assert!(matches!(e, SumError::InvalidTag { .. }));
//! ```
//!
//! A custom sum:
//!
//! ```rust
//! use tagsum::{cata, TaggedSum};
//!
//! #[derive(TaggedSum, Debug, PartialEq)]
//! #[sum(serde)]
//! enum Shape {
//!     Circle(f64),
//!     Rect(f64, f64),
//!     Empty,
//! }
//!
//! let area = |s: Shape| {
//!     s.cata(cata!(ShapeCata {
//!         circle: |r| 3.0 * r * r,
//!         rect: |w, h| w * h,
//!         empty: || 0.0,
//!     }))
//! };
//! assert_eq!(area(Shape::Rect(2.0, 3.0)), 6.0);
//!
//! let json = serde_json::to_string(&Shape::Rect(2.0, 3.0)).unwrap();
//! assert_eq!(json, r#"{"tag":"Rect","values":[2.0,3.0]}"#);
//! assert_eq!(serde_json::from_str::<Shape>(&json).unwrap(), Shape::Rect(2.0, 3.0));
//! ```
//!
//! `AsyncData` combines like `Promise.all`:
//!
//! ```rust
//! use tagsum::{async_data, AsyncData};
//!
//! let a = async_data::all((AsyncData::<_, &str>::Data(1), AsyncData::Data("a")));
//! assert_eq!(a, AsyncData::Data((1, "a")));
//!
//! let b = async_data::all((AsyncData::<i32, _>::Waiting, AsyncData::<i32, _>::Error("boom")));
//! assert_eq!(b, AsyncData::Error("boom"));
//! ```
// #![include_doc("../README.md", end)]
