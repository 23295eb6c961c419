pub mod context_tree;
