use std::fmt::Display;

use tagsum::{cata, TaggedSum};

#[derive(TaggedSum)]
pub enum Labeled<K, V>
where
    K: Display,
{
    Empty,
    #[sum(success)]
    Value(V),
    Key(K),
}

fn main() {
    let l: Labeled<&str, i32> = Labeled::Value(1);
    let s = l.map(|v| v * 3).cata(cata!(LabeledCata {
        empty: String::new,
        value: |v| v.to_string(),
        key: |k| k.to_string(),
    }));
    assert_eq!(s, "3");
}
