extern crate balanced_trees;
extern crate rand;

mod common;

const NUM_OF_OPERATIONS: usize = 20_000;
const NUM_OF_CHECKED_OPERATIONS: usize = 2_000;

macro_rules! binary_tree_tests {
    ($($module_name:ident: $type_name:ident => $check:path,)*) => {
        $(
            mod $module_name {
                use balanced_trees::{BinaryTree, $type_name};
                use rand::Rng;
                use super::{NUM_OF_CHECKED_OPERATIONS, NUM_OF_OPERATIONS};

                fn remove_first(expected: &mut Vec<u32>, element: u32) -> Option<u32> {
                    let index = expected.binary_search(&element).ok()?;
                    Some(expected.remove(index))
                }

                #[test]
                fn int_test_tree() {
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
                    let mut tree = $type_name::new();
                    let mut expected = Vec::new();

                    for _ in 0..NUM_OF_OPERATIONS {
                        let element = rng.gen::<u32>();

                        tree.insert(element);
                        let index = match expected.binary_search(&element) {
                            Ok(index) | Err(index) => index,
                        };
                        expected.insert(index, element);
                    }

                    assert_eq!(tree.len(), expected.len());
                    assert_eq!(
                        tree.iter().collect::<Vec<&u32>>(),
                        expected.iter().collect::<Vec<&u32>>(),
                    );

                    let mut order = expected.clone();
                    rng.shuffle(&mut order);
                    for element in order {
                        assert_eq!(tree.delete(&element), Some(element));
                        remove_first(&mut expected, element);
                        assert_eq!(tree.len(), expected.len());
                    }
                    assert!(tree.is_empty());
                    assert!(tree.root().is_err());
                }

                #[test]
                fn int_test_invariants() {
                    super::common::init_logger();
                    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([2, 2, 2, 2]);
                    let mut tree = $type_name::new();
                    let mut expected = Vec::new();

                    for _ in 0..NUM_OF_CHECKED_OPERATIONS {
                        // A small key space forces duplicates and deletions of present keys.
                        let element: u32 = rng.gen_range(0, 64);
                        if rng.gen_weighted_bool(3) {
                            assert_eq!(tree.delete(&element), remove_first(&mut expected, element));
                        } else {
                            tree.insert(element);
                            let index = match expected.binary_search(&element) {
                                Ok(index) | Err(index) => index,
                            };
                            expected.insert(index, element);
                            assert_eq!(tree.last_inserted().unwrap().element(), &element);
                        }

                        $check(&tree);
                        assert_eq!(tree.iter().cloned().collect::<Vec<u32>>(), expected);
                    }
                }
            }
        )*
    }
}

binary_tree_tests!(
    ordered_tree: OrderedTree => super::common::check_ordered,
    avl_tree: AvlTree => super::common::check_avl,
    red_black_tree: RedBlackTree => super::common::check_red_black,
);
