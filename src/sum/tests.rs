use rstest::rstest;

use crate::{AsyncData, Maybe, SumDef, SumError, TagDef, TaggedSum};

#[test]
fn maybe_def() {
    assert_eq!(
        Maybe::<u8>::DEF,
        SumDef {
            name: "Maybe",
            tags: &[
                TagDef {
                    name: "Nothing",
                    arity: 0
                },
                TagDef {
                    name: "Just",
                    arity: 1
                },
            ],
        }
    );
}

#[test]
fn def_display() {
    assert_eq!(
        AsyncData::<u8, u8>::DEF.to_string(),
        "AsyncData = NotAsked/0 | Waiting/0 | Data/1 | Error/1"
    );
}

#[test]
fn tag_names() {
    let names: Vec<_> = AsyncData::<(), ()>::DEF.tag_names().collect();
    assert_eq!(names, ["NotAsked", "Waiting", "Data", "Error"]);
}

#[rstest]
#[case("NotAsked", 0)]
#[case("Waiting", 1)]
#[case("Data", 2)]
#[case("Error", 3)]
fn index_of(#[case] tag: &str, #[case] index: usize) {
    assert_eq!(AsyncData::<(), ()>::DEF.index_of(tag), Ok(index));
}

#[test]
fn index_of_unknown() {
    assert_eq!(
        Maybe::<()>::DEF.index_of("Nope"),
        Err(SumError::InvalidTag {
            sum: "Maybe",
            tag: "Nope".to_string()
        })
    );
}

#[test]
fn index_of_is_case_sensitive() {
    assert!(Maybe::<()>::DEF.index_of("just").is_err());
}

#[test]
fn check_arity() {
    let def = Maybe::<()>::DEF;
    assert_eq!(def.check("Just", 1), Ok(1));
    assert_eq!(def.check("Nothing", 0), Ok(0));
    assert_eq!(
        def.check("Just", 2),
        Err(SumError::ArityMismatch {
            sum: "Maybe",
            tag: "Just",
            expected: 1,
            actual: 2
        })
    );
    assert_eq!(
        def.check("Nothing", 1),
        Err(SumError::ArityMismatch {
            sum: "Maybe",
            tag: "Nothing",
            expected: 0,
            actual: 1
        })
    );
}

#[test]
fn check_reports_unknown_tag_before_arity() {
    assert!(matches!(
        Maybe::<()>::DEF.check("Nope", 7),
        Err(SumError::InvalidTag { .. })
    ));
}

#[test]
fn get() {
    assert_eq!(
        Maybe::<()>::DEF.get("Just"),
        Some(&TagDef {
            name: "Just",
            arity: 1
        })
    );
    assert_eq!(Maybe::<()>::DEF.get("Nope"), None);
}

#[rstest]
#[case(AsyncData::NotAsked, "NotAsked", 0)]
#[case(AsyncData::Waiting, "Waiting", 0)]
#[case(AsyncData::Data(1), "Data", 1)]
#[case(AsyncData::Error("e"), "Error", 1)]
fn instance_tag(#[case] value: AsyncData<i32, &str>, #[case] tag: &str, #[case] arity: usize) {
    assert_eq!(value.tag(), tag);
    assert_eq!(value.arity(), arity);
    assert!(value.is_tag(tag));
    assert_eq!(value.sum_name(), "AsyncData");
}

#[test]
fn is_tag_rejects_other_tags() {
    let m = Maybe::Just(1);
    assert!(!m.is_tag("Nothing"));
    assert!(!m.is_tag("Nope"));
}
