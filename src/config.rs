//! Configuration file parsing and validation

pub mod gostcheck_toml;

pub use gostcheck_toml::{
    CONFIG_FILE_NAME, CheckerSection, ColorOption, Config, OutputConfig, OutputFormat,
};
