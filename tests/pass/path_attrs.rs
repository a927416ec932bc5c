mod inner {
    pub use tagsum as renamed;
}

#[derive(inner::renamed::TaggedSum)]
#[sum(crate = "inner::renamed", cata = Handle)]
pub(crate) enum Signal {
    On,
    Off,
    Level(u8),
}

fn main() {
    let n = Signal::Level(4).cata(inner::renamed::cata!(Handle {
        on: || 1,
        off: || 0,
        level: |l| l,
    }));
    assert_eq!(n, 4);
}
