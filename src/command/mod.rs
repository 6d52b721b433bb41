pub mod draw;
pub mod lifecycle;
pub mod queue;
pub mod text;
