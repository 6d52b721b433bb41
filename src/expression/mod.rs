pub mod node;
pub mod select;
pub mod vector_ops;
