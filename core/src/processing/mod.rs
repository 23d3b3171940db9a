pub mod buffer_pool;
pub mod normalize;
pub mod quantize;

pub use buffer_pool::BufferPool;
pub use normalize::NormalizeStage;
pub use quantize::QuantizeStage;
