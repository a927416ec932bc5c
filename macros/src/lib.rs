use proc_macro::TokenStream;
use syn_utils::into_macro_output;

#[macro_use]
mod syn_utils;

mod tagged_sum_impl;

/// Derives `tagsum::TaggedSum` for an enum whose variants are the tags of a closed sum.
///
/// Each variant must be a unit variant or a tuple variant; its fields are the tag's
/// positional payload. Besides the trait impl, the derive emits a handlers struct
/// (`<Enum>Cata` by default) with one field per tag, and the exhaustive
/// `cata` / `cata_ref` methods that consume it.
///
/// # Attributes
///
/// On the enum, `#[sum(...)]` accepts:
///
/// | Key                | Effect                                                      |
/// |--------------------|-------------------------------------------------------------|
/// | `name = "..."`     | Sum name reported by `TaggedSum::DEF` (defaults to the enum) |
/// | `cata = Ident`     | Name of the handlers struct                                  |
/// | `serde`            | `Serialize` / `Deserialize` as a validated `{ tag, values }` record |
/// | `values`           | Implements `SumValues` (payload accessor for debugging)      |
/// | `crate = "path"`   | Path of the `tagsum` crate (defaults to `::tagsum`)          |
///
/// On a variant, `#[sum(...)]` accepts:
///
/// | Key                | Effect                                                      |
/// |--------------------|-------------------------------------------------------------|
/// | `rename = "..."`   | Tag name (defaults to the variant)                           |
/// | `success`          | Marks the success tag and emits `map`, `flatten`, `flat_map` |
///
/// The success tag must carry exactly one value whose type is a bare type parameter of
/// the enum that appears in no other tag.
#[proc_macro_derive(TaggedSum, attributes(sum))]
pub fn derive_tagged_sum(input: TokenStream) -> TokenStream {
    into_macro_output(tagged_sum_impl::derive_tagged_sum(input.into()))
}
