pub mod keys;
pub mod redis_store;
pub mod seed;

pub use redis_store::RedisStore;
pub use seed::StanceSeed;
