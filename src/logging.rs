use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;


/// The environment variable selecting the log level.
pub const LOG_LEVEL_VAR: &str = "SUBNETCALC_LOG";

const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;


/// Interprets the value of [`LOG_LEVEL_VAR`]; unknown or missing values yield the default level.
fn level_from_env(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_LEVEL)
}

/// Installs a logger writing to standard error at the level given by [`LOG_LEVEL_VAR`].
pub fn init() {
    let level = level_from_env(std::env::var(LOG_LEVEL_VAR).ok().as_deref());

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l:<5} {M} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level));

    match config {
        Ok(c) => {
            if let Err(e) = log4rs::init_config(c) {
                eprintln!("failed to initialize logging: {}", e);
            }
        },
        Err(e) => {
            eprintln!("failed to configure logging: {}", e);
        },
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_level_from_env() {
        assert_eq!(LevelFilter::Warn, level_from_env(None));
        assert_eq!(LevelFilter::Debug, level_from_env(Some("debug")));
        assert_eq!(LevelFilter::Trace, level_from_env(Some(" TRACE ")));
        assert_eq!(LevelFilter::Off, level_from_env(Some("off")));
        assert_eq!(LevelFilter::Warn, level_from_env(Some("chatty")));
    }
}
