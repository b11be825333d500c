// Constructors and conversion traits shared by every public tree type. The type must be a
// struct with a single `tree: Tree<T, $augment>` field that implements `BinaryTree<T>`.
macro_rules! impl_tree_common {
    ($type_name:ident, $augment:ty) => {
        impl<T> $type_name<T>
        where
            T: Ord,
        {
            /// Constructs a new, empty tree.
            pub fn new() -> Self {
                Self::with_chunk_size($crate::arena::DEFAULT_CHUNK_SIZE)
            }

            /// Constructs a new, empty tree whose vertex storage grows by `chunk_size` vertices
            /// at a time.
            pub fn with_chunk_size(chunk_size: usize) -> Self {
                $type_name {
                    tree: $crate::bst::Tree::new(chunk_size),
                }
            }
        }

        impl<T> Default for $type_name<T>
        where
            T: Ord,
        {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T> std::iter::FromIterator<T> for $type_name<T>
        where
            T: Ord,
        {
            fn from_iter<I>(iter: I) -> Self
            where
                I: IntoIterator<Item = T>,
            {
                let mut tree = Self::new();
                tree.extend(iter);
                tree
            }
        }

        impl<T> Extend<T> for $type_name<T>
        where
            T: Ord,
        {
            fn extend<I>(&mut self, iter: I)
            where
                I: IntoIterator<Item = T>,
            {
                for element in iter {
                    $crate::bst::BinaryTree::insert(self, element);
                }
            }
        }

        impl<T> IntoIterator for $type_name<T>
        where
            T: Ord,
        {
            type Item = T;
            type IntoIter = $crate::bst::IntoIter<T>;

            fn into_iter(self) -> Self::IntoIter {
                self.tree.into_iter()
            }
        }

        impl<'a, T> IntoIterator for &'a $type_name<T>
        where
            T: 'a + Ord,
        {
            type Item = &'a T;
            type IntoIter = $crate::bst::Iter<'a, T, $augment>;

            fn into_iter(self) -> Self::IntoIter {
                self.tree.iter()
            }
        }

        impl<T> std::fmt::Display for $type_name<T>
        where
            T: std::fmt::Display,
        {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.tree, f)
            }
        }

        impl<T> serde::Serialize for $type_name<T>
        where
            T: serde::Serialize,
        {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serde::Serialize::serialize(&self.tree, serializer)
            }
        }
    };
}
