pub mod parse;
pub mod slice;
