use ansi_term::Colour;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Diagnostics go to stderr, dimmed so they stand apart from program
/// output on stdout.
struct TermLogger;

static LOGGER: TermLogger = TermLogger;

impl Log for TermLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("{:<5} {}", record.level(), record.args());
        match record.level() {
            Level::Error | Level::Warn => eprintln!("{}", Colour::Yellow.paint(line)),
            _ => eprintln!("{}", Colour::Fixed(8).paint(line)),
        }
    }

    fn flush(&self) {}
}

pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
