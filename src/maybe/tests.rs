use assert_call::{call, CallRecorder};

use crate::{cata, Maybe, MaybeCata, SumValues};

#[test]
fn cata_just() {
    let n = Maybe::Just(5).cata(cata!(MaybeCata {
        just: |v| v * 2,
        nothing: || 0,
    }));
    assert_eq!(n, 10);
}

#[test]
fn cata_nothing() {
    let n = Maybe::<i32>::Nothing.cata(cata!(MaybeCata {
        just: |v| v * 2,
        nothing: || 0,
    }));
    assert_eq!(n, 0);
}

#[test]
fn cata_calls_only_the_active_handler() {
    let mut cr = CallRecorder::new();
    Maybe::Just("x").cata(cata!(MaybeCata {
        just: |v| call!("just {v}"),
        nothing: || call!("nothing"),
    }));
    cr.verify("just x");

    Maybe::<&str>::Nothing.cata(cata!(MaybeCata {
        just: |v| call!("just {v}"),
        nothing: || call!("nothing"),
    }));
    cr.verify("nothing");
}

#[test]
fn cata_ref_leaves_instance() {
    let m = Maybe::Just(String::from("abc"));
    let len = m.cata_ref(cata!(MaybeCata {
        just: |s| s.len(),
        nothing: || 0,
    }));
    assert_eq!(len, 3);
    assert_eq!(m, Maybe::Just(String::from("abc")));
}

#[test]
fn map() {
    assert_eq!(Maybe::Just(2).map(|x| x + 1), Maybe::Just(3));
    assert_eq!(Maybe::<i32>::Nothing.map(|x| x + 1), Maybe::Nothing);
}

#[test]
fn map_changes_type() {
    let m: Maybe<String> = Maybe::Just(7).map(|x| x.to_string());
    assert_eq!(m, Maybe::Just("7".to_string()));
}

#[test]
fn flatten() {
    assert_eq!(Maybe::Just(Maybe::Just(1)).flatten(), Maybe::Just(1));
    assert_eq!(Maybe::Just(Maybe::<i32>::Nothing).flatten(), Maybe::Nothing);
    assert_eq!(Maybe::<Maybe<i32>>::Nothing.flatten(), Maybe::Nothing);
}

#[test]
fn flat_map() {
    let half = |x: i32| {
        if x % 2 == 0 {
            Maybe::Just(x / 2)
        } else {
            Maybe::Nothing
        }
    };
    assert_eq!(Maybe::Just(4).flat_map(half), Maybe::Just(2));
    assert_eq!(Maybe::Just(3).flat_map(half), Maybe::Nothing);
    assert_eq!(Maybe::Nothing.flat_map(half), Maybe::Nothing);
}

#[test]
fn option_conversions() {
    assert_eq!(Maybe::from(Some(1)), Maybe::Just(1));
    assert_eq!(Maybe::<i32>::from(None), Maybe::Nothing);
    assert_eq!(Option::<i32>::from(Maybe::Just(1)), Some(1));
    assert_eq!(Maybe::<i32>::Nothing.into_option(), None);
}

#[test]
fn helpers() {
    assert!(Maybe::Just(1).is_just());
    assert!(Maybe::<i32>::Nothing.is_nothing());
    assert_eq!(Maybe::Just(1).unwrap_or(9), 1);
    assert_eq!(Maybe::Nothing.unwrap_or(9), 9);
    assert_eq!(Maybe::Just(1).as_ref(), Maybe::Just(&1));
    assert_eq!(Maybe::<u8>::default(), Maybe::Nothing);
}

#[test]
fn values() {
    assert_eq!(format!("{:?}", Maybe::Just(5).values()), "[5]");
    assert_eq!(Maybe::<i32>::Nothing.values().len(), 0);
}
