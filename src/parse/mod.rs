pub mod task_codec;

pub use task_codec::*;
