mod rate_limit;

pub use rate_limit::{is_limited_path, rate_limit, RateLimiter, LIMITED_PREFIX};
