use log::LevelFilter;
use log4rs::{
    Config,
    append::{
        console::{ConsoleAppender, Target},
        rolling_file::{
            RollingFileAppender,
            policy::compound::{
                CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
            },
        },
    },
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};
use thiserror::Error;

use crate::config::LogFileConfig;

const LOG_SIZE_LIMIT: u64 = 10 * 1024 * 1024; // 10 MB

const LOG_FILE_COUNT: u32 = 3;

const STDERR_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}";

const FILE_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%S%.3f%z)} {l} {t} - {m}{n}";

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to set up log roller: {0}")]
    Roller(String),

    #[error("failed to open log file: {0}")]
    File(#[from] std::io::Error),

    #[error("invalid logger config: {0}")]
    Config(String),

    #[error("logger already initialized: {0}")]
    Init(#[from] log::SetLoggerError),
}

fn build_config(log_file: Option<&LogFileConfig>) -> Result<Config, LoggerError> {
    let stderr_level = LevelFilter::Info;
    let file_level = LevelFilter::Debug;

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(STDERR_PATTERN)))
        .build();

    let mut builder = Config::builder().appender(
        Appender::builder()
            .filter(Box::new(ThresholdFilter::new(stderr_level)))
            .build("stderr", Box::new(stderr)),
    );
    let mut root = Root::builder().appender("stderr");

    if let Some(log_file) = log_file {
        let trigger = SizeTrigger::new(LOG_SIZE_LIMIT);
        let roller = FixedWindowRoller::builder()
            .build(&log_file.archive_pattern, LOG_FILE_COUNT)
            .map_err(|e| LoggerError::Roller(e.to_string()))?;
        let policy = CompoundPolicy::new(Box::new(trigger), Box::new(roller));

        let logfile = RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
            .build(&log_file.path, Box::new(policy))?;

        builder = builder.appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(file_level)))
                .build("logfile", Box::new(logfile)),
        );
        root = root.appender("logfile");
    }

    builder
        .build(root.build(LevelFilter::Debug))
        .map_err(|e| LoggerError::Config(e.to_string()))
}

pub fn init_logger(log_file: Option<&LogFileConfig>) -> Result<(), LoggerError> {
    let config = build_config(log_file)?;
    let _handle = log4rs::init_config(config)?;
    Ok(())
}
