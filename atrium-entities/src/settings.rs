use config::{Config, ConfigError, File};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Settings {
    pub max_edit_packet_bytes: usize,
    pub domain_size: f32,
    pub default_lifetime_secs: f32,
}

impl Settings {
    fn new() -> Result<Settings, ConfigError> {
        let config = Config::builder()
            .set_default("max_edit_packet_bytes", 1400)?
            .set_default("domain_size", 32768.0)?
            .set_default("default_lifetime_secs", -1.0)?
            .add_source(File::with_name("config.yaml").required(false))
            .build()?;

        config.try_deserialize()
    }
}

lazy_static! {
    pub static ref GLOBAL_CONFIG: Settings = Settings::new().expect("failed to read config file");
}
