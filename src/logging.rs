// src/logging.rs
use env_logger::WriteStyle;
use log::LevelFilter;
use std::io::Write;

/// Map the `-v` level onto a log filter. Silent mode disables logging.
pub fn level_for(verbosity: u8, silent: bool) -> LevelFilter {
    if silent {
        return LevelFilter::Off;
    }
    match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger. `RUST_LOG` still takes precedence when set.
pub fn init(verbosity: u8, silent: bool, no_color: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for(verbosity, silent))
        .parse_default_env()
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "{} {style}[{}]{style:#} {}",
                chrono::Local::now().format("%Y/%m/%d %H:%M:%S%.6f"),
                record.level(),
                record.args()
            )
        });

    if no_color {
        builder.write_style(WriteStyle::Never);
    }

    let _ = builder.try_init();
}
