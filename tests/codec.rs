use serde_json::json;
use tagsum::{AsyncData, Either, Maybe, Record, SumDecode, SumError, TaggedSum};

#[derive(TaggedSum, Debug, PartialEq)]
#[sum(serde)]
enum Command {
    Quit,
    Move(i32, i32),
    #[sum(rename = "say")]
    Say(String),
}

#[test]
fn serialize() {
    assert_eq!(
        serde_json::to_value(Command::Move(1, -2)).unwrap(),
        json!({ "tag": "Move", "values": [1, -2] })
    );
    assert_eq!(
        serde_json::to_value(Command::Quit).unwrap(),
        json!({ "tag": "Quit", "values": [] })
    );
    assert_eq!(
        serde_json::to_value(Command::Say("hi".into())).unwrap(),
        json!({ "tag": "say", "values": ["hi"] })
    );
}

#[test]
fn round_trip_through_json_text() {
    for c in [Command::Quit, Command::Move(3, 4), Command::Say("x".into())] {
        let text = serde_json::to_string(&c).unwrap();
        assert_eq!(serde_json::from_str::<Command>(&text).unwrap(), c);
    }
}

#[test]
fn deserialize_rejects_wrong_arity() {
    let e = serde_json::from_value::<Command>(json!({ "tag": "Move", "values": [1] })).unwrap_err();
    assert!(e
        .to_string()
        .contains("tag \"Move\" of sum \"Command\" takes 2 value(s), but 1 were given"));
}

#[test]
fn deserialize_rejects_variant_name_of_renamed_tag() {
    assert!(serde_json::from_value::<Command>(json!({ "tag": "Say", "values": ["x"] })).is_err());
}

#[test]
fn deserialize_from_sequence() {
    let c: Command = serde_json::from_str(r#"["Move", [5, 6]]"#).unwrap();
    assert_eq!(c, Command::Move(5, 6));
}

#[test]
fn from_record() {
    let c = Command::from_record(Record::new("Move", vec![1, 2]));
    assert_eq!(c, Ok(Command::Move(1, 2)));
}

#[test]
fn from_record_checks_arity_before_types() {
    let c = Command::from_record(Record::new("say", vec![1, 2]));
    assert_eq!(
        c,
        Err(SumError::ArityMismatch {
            sum: "Command",
            tag: "say",
            expected: 1,
            actual: 2,
        })
    );
}

#[test]
fn record_can_be_decoded_first() {
    let record: Record<String> =
        serde_json::from_str(r#"{"tag":"say","values":["hello"]}"#).unwrap();
    assert_eq!(
        Command::from_record(record),
        Ok(Command::Say("hello".to_string()))
    );
}

#[test]
fn round_trip_through_bincode() {
    for c in [Command::Quit, Command::Move(3, -4), Command::Say("x".into())] {
        let bytes = bincode::serialize(&c).unwrap();
        assert_eq!(bincode::deserialize::<Command>(&bytes).unwrap(), c);
    }
}

#[test]
fn standard_sums_round_trip_through_bincode() {
    let m = Maybe::Just(5u32);
    assert_eq!(bincode::deserialize::<Maybe<u32>>(&bincode::serialize(&m).unwrap()).unwrap(), m);

    let m = Maybe::<u32>::Nothing;
    assert_eq!(bincode::deserialize::<Maybe<u32>>(&bincode::serialize(&m).unwrap()).unwrap(), m);

    let e = Either::<String, u8>::Right(7);
    assert_eq!(
        bincode::deserialize::<Either<String, u8>>(&bincode::serialize(&e).unwrap()).unwrap(),
        e
    );

    let a = AsyncData::<(u8, u8), String>::Error("boom".into());
    assert_eq!(
        bincode::deserialize::<AsyncData<(u8, u8), String>>(&bincode::serialize(&a).unwrap())
            .unwrap(),
        a
    );
}

#[test]
fn values_are_a_length_prefixed_sequence() {
    let bytes = bincode::serialize(&Command::Move(1, 2)).unwrap();
    let (tag, values): (String, Vec<i32>) = bincode::deserialize(&bytes).unwrap();
    assert_eq!(tag, "Move");
    assert_eq!(values, [1, 2]);
}

#[test]
fn values_may_precede_tag() {
    let c: Command = serde_json::from_str(r#"{"values":[1,2],"tag":"Move"}"#).unwrap();
    assert_eq!(c, Command::Move(1, 2));
}
