/// Retrofit toolkit version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sentinel form for any token containing a digit.
pub const NUM_TOKEN: &str = "---num---";

/// Sentinel form for any token without alphanumeric characters.
pub const PUNCT_TOKEN: &str = "---punc---";

/// Additive epsilon under the square root when L2-normalizing loaded vectors.
pub const NORM_EPSILON: f64 = 1e-6;

/// Default number of retrofitting iterations.
pub const DEFAULT_ITERATIONS: usize = 10;

/// Decimal places used when writing vector components.
pub const OUTPUT_PRECISION: usize = 4;

/// Prefix prepended to a pattern label to name its reverse direction.
pub const REVERSE_PATTERN_PREFIX: &str = "r";

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "RETROFIT_LOG";
