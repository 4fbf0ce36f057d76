use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

const CONFIG_FILE_PATH: &str = "log4rs.yaml";
const FALLBACK_APPENDER_NAME: &str = "stderr";
const FALLBACK_PATTERN: &str = "{d(%H:%M:%S)} {h({l})} {M} - {m}{n}";

#[ctor::ctor]
fn init() {
    if log4rs::init_file(CONFIG_FILE_PATH, Default::default()).is_ok() {
        return;
    }
    if let Some(config) = create_fallback_config() {
        let _ = log4rs::init_config(config);
    }
}

/// Console logging to stderr at warn level, used when no config file is present.
fn create_fallback_config() -> Option<Config> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(FALLBACK_PATTERN)))
        .build();
    Config::builder()
        .appender(Appender::builder().build(FALLBACK_APPENDER_NAME, Box::new(stderr)))
        .build(
            Root::builder()
                .appender(FALLBACK_APPENDER_NAME)
                .build(LevelFilter::Warn),
        )
        .ok()
}
