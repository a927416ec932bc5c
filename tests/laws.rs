use rstest::rstest;
use tagsum::{AsyncData, Either, Maybe, SumValues, TaggedSum};

fn inc(x: i32) -> i32 {
    x + 1
}
fn double(x: i32) -> i32 {
    x * 2
}
fn half(x: i32) -> Maybe<i32> {
    if x % 2 == 0 {
        Maybe::Just(x / 2)
    } else {
        Maybe::Nothing
    }
}

#[rstest]
#[case(Maybe::Just(3))]
#[case(Maybe::Nothing)]
fn maybe_functor_composition(#[case] m: Maybe<i32>) {
    assert_eq!(m.map(inc).map(double), m.map(|x| double(inc(x))));
}

#[rstest]
#[case(AsyncData::NotAsked)]
#[case(AsyncData::Waiting)]
#[case(AsyncData::Data(3))]
#[case(AsyncData::Error("e"))]
fn async_data_functor_composition(#[case] a: AsyncData<i32, &str>) {
    assert_eq!(a.map(inc).map(double), a.map(|x| double(inc(x))));
}

#[rstest]
#[case(AsyncData::NotAsked)]
#[case(AsyncData::Waiting)]
#[case(AsyncData::Error("e"))]
fn map_keeps_other_tags(#[case] a: AsyncData<i32, &str>) {
    let mapped = a.map(|x| x.to_string());
    assert_eq!(mapped.tag(), a.tag());
    assert_eq!(format!("{:?}", mapped.values()), format!("{:?}", a.values()));
}

#[test]
fn either_functor_on_left_is_identity() {
    let e = Either::<&str, i32>::Left("l");
    assert_eq!(e.map(inc), e);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(8)]
fn maybe_left_identity(#[case] x: i32) {
    assert_eq!(Maybe::Just(x).flat_map(half), half(x));
}

#[rstest]
#[case(Maybe::Just(3))]
#[case(Maybe::Nothing)]
fn maybe_right_identity(#[case] m: Maybe<i32>) {
    assert_eq!(m.flat_map(Maybe::Just), m);
}

#[rstest]
#[case(Either::Left("l"))]
#[case(Either::Right(3))]
fn either_right_identity(#[case] e: Either<&str, i32>) {
    assert_eq!(e.flat_map(Either::Right), e);
}

#[rstest]
#[case(AsyncData::Waiting)]
#[case(AsyncData::Data(3))]
#[case(AsyncData::Error("e"))]
fn async_data_right_identity(#[case] a: AsyncData<i32, &str>) {
    assert_eq!(a.flat_map(AsyncData::Data), a);
}

#[test]
fn async_data_left_identity() {
    let f = |x: i32| -> AsyncData<i32, &str> {
        if x > 0 {
            AsyncData::Data(x)
        } else {
            AsyncData::Error("not positive")
        }
    };
    assert_eq!(AsyncData::Data(2).flat_map(f), f(2));
    assert_eq!(AsyncData::Data(-2).flat_map(f), f(-2));
}

#[rstest]
#[case(Maybe::Just(7), "Just", "[7]")]
#[case(Maybe::Nothing, "Nothing", "[]")]
fn construction_round_trip(#[case] m: Maybe<i32>, #[case] tag: &str, #[case] values: &str) {
    assert_eq!(m.tag(), tag);
    assert_eq!(format!("{:?}", m.values()), values);
}
