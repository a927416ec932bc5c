use tagsum::TaggedSum;

#[derive(TaggedSum, Debug, PartialEq)]
#[sum(serde, values)]
pub enum Tree<T> {
    Leaf,
    #[sum(success)]
    Node(T),
    Branch(Box<Tree<u8>>, Box<Tree<u8>>),
}

fn main() {
    let t = Tree::Node(1u32).map(|x| x + 1);
    assert_eq!(t, Tree::Node(2));
    let _ = serde_json::to_string(&Tree::<u8>::Leaf);
}
