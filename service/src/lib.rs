use config::Config;
use domain::ArchiveParser;
use log::info;

pub mod config;
pub mod logging;

// Service-level state shared by every request.
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub parser: ArchiveParser,
}

impl AppState {
    pub fn new(app_config: Config) -> Self {
        let parser = ArchiveParser::new(app_config.step_delay());
        info!(
            "Archive parser configured: {} draws per run, {:?} per step",
            parser.total(),
            parser.step_delay()
        );

        Self {
            config: app_config,
            parser,
        }
    }

    pub fn parser(&self) -> &ArchiveParser {
        &self.parser
    }
}
