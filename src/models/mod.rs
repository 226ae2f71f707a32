pub mod catalog;
pub mod chart;
pub mod comparison;
pub mod criteria;
pub mod record;
pub mod summary;

pub use catalog::*;
pub use chart::*;
pub use comparison::*;
pub use criteria::*;
pub use record::*;
pub use summary::*;
