// cli.rs - Command-line interface configuration
use clap::Parser;

use crate::scenes::DEFAULT_TOURIST_COUNT;
use crate::settings::SceneSettings;

#[derive(Parser, Debug, Clone)]
#[command(name = "liberty-lens")]
#[command(about = "Interactive Statue of Liberty visualization", long_about = None)]
pub struct Cli {
    /// Hide the control panel, chat and overlays
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Initial sun azimuth in degrees (0-360)
    #[arg(long, default_value_t = SceneSettings::DEFAULT.sun_azimuth)]
    pub azimuth: f32,

    /// Initial sun elevation in degrees (0-90)
    #[arg(long, default_value_t = SceneSettings::DEFAULT.sun_elevation)]
    pub elevation: f32,

    /// Initial wind intensity (0-1)
    #[arg(long, default_value_t = SceneSettings::DEFAULT.wind_intensity)]
    pub wind: f32,

    /// Start with the crowd hidden
    #[arg(long = "no-tourists", default_value = "false")]
    pub no_tourists: bool,

    /// Number of tourists around the pedestal
    #[arg(long, default_value_t = DEFAULT_TOURIST_COUNT)]
    pub tourists: usize,

    /// Seed for the crowd and skyline layout
    #[arg(long)]
    pub seed: Option<u64>,

    /// Chat model name, overrides LIBERTY_MODEL
    #[arg(long)]
    pub model: Option<String>,

    /// Print the frame composed at this time (seconds) as JSON and exit
    #[arg(long = "dump-frame", value_name = "SECONDS")]
    pub dump_frame: Option<f32>,
}

impl Cli {
    /// Starting settings, pulled into the ranges the controls allow
    pub fn settings(&self) -> SceneSettings {
        SceneSettings::clamped(self.azimuth, self.elevation, self.wind, !self.no_tourists)
    }
}
