use slog::{Drain, Logger, o};
use slog_async::OverflowStrategy;

/// Records buffered before the async drain starts dropping (and reporting) them.
const LOG_CHANNEL_SIZE: usize = 4096;

/// Terminal logger for a service, filtered through `RUST_LOG`.
pub fn init_root_logger(service: &str) -> Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let format = slog_term::FullFormat::new(decorator).build().fuse();
    let filtered = slog_envlogger::new(format).fuse();
    let drain = slog_async::Async::new(filtered)
        .chan_size(LOG_CHANNEL_SIZE)
        .overflow_strategy(OverflowStrategy::DropAndReport)
        .build()
        .fuse();

    Logger::root(
        drain,
        o!("service" => service.to_string(), "version" => env!("CARGO_PKG_VERSION")),
    )
}

pub fn create_child_logger(root: &Logger, module: &str) -> Logger {
    root.new(o!("module" => module.to_string()))
}

/// Logger that drops everything, for tests and embedding.
pub fn discard_logger() -> Logger {
    Logger::root(slog::Discard, o!())
}
