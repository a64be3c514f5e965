use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::errors::ConfigError;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

/// Sets up logging to stdout, and additionally to a log file if one is given
///
/// # Arguments
///
/// * 'log_file' - optional path to a log file
pub fn setup_logging(log_file: Option<&str>) -> Result<(), ConfigError> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let mut config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)));
    let mut root = Root::builder().appender("stdout");

    if let Some(path) = log_file {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(path)?;

        config = config.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    log4rs::init_config(config.build(root.build(LevelFilter::Info))?)?;

    Ok(())
}
