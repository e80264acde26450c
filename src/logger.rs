use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Verbosity {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl Verbosity {
    pub fn from_u8(level: u8) -> Self {
        match level {
            0 => Verbosity::Low,
            1 => Verbosity::Medium,
            2 => Verbosity::High,
            _ => Verbosity::Low,
        }
    }

    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Low => LevelFilter::INFO,
            Verbosity::Medium => LevelFilter::DEBUG,
            Verbosity::High => LevelFilter::TRACE,
        }
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `level` when set.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(level: Verbosity) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.level_filter().into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
