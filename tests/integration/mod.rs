mod partial_rebuild;
mod test_utils;
mod tree_determinism;
mod visibility_pruning;
