pub(crate) mod block;
pub(crate) mod relocate;
pub mod sym_vec;
