pub mod stage1_summary;
pub mod stage2_sentiment;
pub mod stage3_soap;

pub use stage1_summary::*;
pub use stage2_sentiment::*;
pub use stage3_soap::*;
