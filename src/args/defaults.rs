/// Grace period after batch completion, in seconds.
pub const DEFAULT_GRACE_PERIOD_SECS: u64 = 10;

pub const DEFAULT_USER_AGENT: &str = concat!("httpstat-probe/", env!("CARGO_PKG_VERSION"));
