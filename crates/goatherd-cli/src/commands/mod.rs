pub mod analysis;
pub mod check;
pub mod model;
pub mod tree;

#[cfg(test)]
mod model_tests;
#[cfg(test)]
mod tree_tests;
