// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

use crate::config::ViewerConfig;
use crate::demos::DemoKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "motion-viewer")]
#[command(about = "Animated 3D scene viewer", long_about = None)]
pub struct Cli {
    /// Scene to show
    #[arg(long, value_enum, default_value_t = DemoKind::Pen)]
    pub demo: DemoKind,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory containing the model files (overrides the config)
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Run headless for this many frames and print the final state
    #[arg(long)]
    pub frames: Option<u64>,

    /// Fixed animation rate in Hz instead of one tick per frame
    #[arg(long = "tick-rate")]
    pub tick_rate: Option<f32>,

    /// Disable the window title FPS readout
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

impl Cli {
    /// Fold command-line overrides into a loaded configuration
    pub fn apply(&self, config: &mut ViewerConfig) {
        if let Some(assets) = &self.assets {
            config.asset_dir = assets.clone();
        }
        if self.tick_rate.is_some() {
            config.tick_rate = self.tick_rate;
        }
    }
}
