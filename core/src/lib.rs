//! An optional-value container: a value that is either [present](Optional::Present) or
//! [absent](Optional::Absent), with total combinators over that possibility.

pub mod optional;
pub mod collection;
pub mod error;
pub mod repr;
pub mod structured;
pub mod util;
pub mod app;

pub use collection::{filter_map, first_present, map2, sequence, traverse};
pub use error::EmptyUnwrap;
pub use optional::{absent, from_nullable, present, Handlers, Optional};
pub use structured::{Kind, Structured};
