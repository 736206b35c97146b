pub mod report;
pub mod sentiment;
pub mod soap;
pub mod summary;
pub mod transcript;

pub use report::*;
pub use sentiment::*;
pub use soap::*;
pub use summary::*;
pub use transcript::*;
