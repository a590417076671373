use crate::logging::encoder::JsonEncoder;
use anyhow::Context;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::encode::Encode;
use log4rs::{Config, Handle};
use std::path::Path;

mod encoder;
mod log_message;

pub const DEFAULT_LOG_FILE: &str = "logs/thumbnail_creator.log";
const MAX_LOG_BYTES: u64 = 5_000_000;
const LOG_BACKUPS: u32 = 5;
const FILE_PATTERN: &str = "{d} - {l} - {m}{n}";
const CONSOLE_PATTERN: &str = "{l} - {m}{n}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn file_encoder(self) -> Box<dyn Encode> {
        match self {
            LogFormat::Text => Box::new(PatternEncoder::new(FILE_PATTERN)),
            LogFormat::Json => Box::new(JsonEncoder::new()),
        }
    }

    fn console_encoder(self) -> Box<dyn Encode> {
        match self {
            LogFormat::Text => Box::new(PatternEncoder::new(CONSOLE_PATTERN)),
            LogFormat::Json => Box::new(JsonEncoder::without_timestamps()),
        }
    }
}

/// Log to stdout and to a size-rotated file with numbered backups.
pub fn logger_config(log_file: &Path, format: LogFormat) -> anyhow::Result<Config> {
    let level = LevelFilter::Debug;

    let roll_pattern = format!("{}.{{}}", log_file.display());
    let roller = FixedWindowRoller::builder()
        .build(&roll_pattern, LOG_BACKUPS)
        .context("could not build log roller")?;
    let policy = CompoundPolicy::new(
        Box::new(SizeTrigger::new(MAX_LOG_BYTES)),
        Box::new(roller),
    );
    let file = RollingFileAppender::builder()
        .encoder(format.file_encoder())
        .build(log_file, Box::new(policy))
        .with_context(|| format!("could not open log file {}", log_file.display()))?;

    let stdout = ConsoleAppender::builder()
        .target(Target::Stdout)
        .encoder(format.console_encoder())
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)))
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(
            Root::builder()
                .appender("file")
                .appender("stdout")
                .build(level),
        )
        .context("invalid logger configuration")?;
    Ok(config)
}

pub fn logger_setup(log_file: &Path, format: LogFormat) -> anyhow::Result<Handle> {
    let config = logger_config(log_file, format)?;
    log4rs::init_config(config).context("logger already initialised")
}
