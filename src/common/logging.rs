//! Terminal logging. Records go to stderr so the documents the binaries print on stdout stay machine-readable.

use owo_colors::{OwoColorize, Stream::Stderr};

/// Enable the logger
pub fn enable_logger(verbose: bool) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{}{}: {}",
                // Level messages are padded to keep the output looking somewhat sane
                match record.level() {
                    log::Level::Error => "ERROR"
                        .if_supports_color(Stderr, |text| text.red())
                        .if_supports_color(Stderr, |text| text.bold())
                        .to_string(),
                    log::Level::Warn => "WARN "
                        .if_supports_color(Stderr, |text| text.yellow())
                        .if_supports_color(Stderr, |text| text.bold())
                        .to_string(),
                    log::Level::Info => "INFO "
                        .if_supports_color(Stderr, |text| text.green())
                        .if_supports_color(Stderr, |text| text.bold())
                        .to_string(),
                    log::Level::Debug => "DEBUG"
                        .if_supports_color(Stderr, |text| text.bright_blue())
                        .if_supports_color(Stderr, |text| text.bold())
                        .to_string(),
                    log::Level::Trace => "TRACE"
                        .if_supports_color(Stderr, |text| text.bright_white())
                        .if_supports_color(Stderr, |text| text.bold())
                        .to_string(),
                },
                // Only show the outer package name if verbose logging is enabled (otherwise nothing)
                match verbose {
                    true => format!(" [{}]", record.target().split("::").next().unwrap_or_default()),
                    false => String::new(),
                }
                .if_supports_color(Stderr, |text| text.bright_black()),
                message
            ))
        })
        // Set the correct log level based on CLI flags
        .level(match std::env::var("WGADDR_TRACE") {
            Ok(_) => log::LevelFilter::Trace,
            Err(_) => match verbose {
                true => log::LevelFilter::Debug,
                false => log::LevelFilter::Info,
            },
        })
        // Output to STDERR. STDOUT is reserved for the generated document
        .chain(std::io::stderr())
        .apply()
}
