#![allow(dead_code)]

use balanced_trees::{AvlTree, BinaryTree, Color, RedBlackTree, VertexRef};
use simplelog::{Config, LevelFilter, TestLogger};

pub fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

/// Checks the ordered-tree invariant, the parent back-links and the element count.
pub fn check_ordered<B>(tree: &B)
where
    B: BinaryTree<u32>,
{
    let mut count = 0;
    tree.pre_order(|vertex| {
        count += 1;
        if let Ok(left) = vertex.left() {
            assert_eq!(left.parent().unwrap().id(), vertex.id());
        }
        if let Ok(right) = vertex.right() {
            assert_eq!(right.parent().unwrap().id(), vertex.id());
        }
    });
    assert_eq!(count, tree.len());
    if let Ok(root) = tree.root() {
        assert!(!root.has_parent());
    }

    let elements = tree.iter().collect::<Vec<&u32>>();
    assert_eq!(elements.len(), tree.len());
    assert!(
        elements.windows(2).all(|pair| pair[0] <= pair[1]),
        "elements out of order: {:?}",
        elements,
    );
}

pub fn check_avl(tree: &AvlTree<u32>) {
    check_ordered(tree);
    tree.post_order(|vertex| {
        let left = vertex.left().map(|left| left.height()).unwrap_or(-1);
        let right = vertex.right().map(|right| right.height()).unwrap_or(-1);
        assert_eq!(vertex.height(), 1 + left.max(right));
        assert!(
            vertex.balance().abs() <= 1,
            "vertex {} has balance {}",
            vertex.element(),
            vertex.balance(),
        );
    });
}

fn black_height(vertex: Option<VertexRef<'_, u32, Color>>) -> usize {
    let vertex = match vertex {
        Some(vertex) => vertex,
        None => return 1,
    };
    let left = vertex.left().ok();
    let right = vertex.right().ok();
    if vertex.color() == Color::Red {
        for child in left.iter().chain(right.iter()) {
            assert_eq!(child.color(), Color::Black, "red {} has a red child", vertex.element());
        }
    }

    let left_height = black_height(left);
    let right_height = black_height(right);
    assert_eq!(left_height, right_height, "black heights differ below {}", vertex.element());
    match vertex.color() {
        Color::Black => left_height + 1,
        Color::Red => left_height,
    }
}

pub fn check_red_black(tree: &RedBlackTree<u32>) {
    check_ordered(tree);
    if let Ok(root) = tree.root() {
        assert_eq!(root.color(), Color::Black);
    }
    let root_black_height = black_height(tree.root().ok());

    // A red black tree with n vertices has height at most 2 * log2(n + 1).
    let bound = 2.0 * ((tree.len() + 1) as f64).log2();
    assert!(tree.height() as f64 <= bound);
    assert!(root_black_height >= 1);
}
