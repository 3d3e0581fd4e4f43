use anyhow::Result;

use aster_platform::core::NullAudio;
use aster_platform::logging::{init_logging, LogConfig};
use aster_platform::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

mod game;
mod quad;

fn main() -> Result<()> {
    init_logging(LogConfig::default());

    let config = RuntimeConfig {
        title: "aster pulse".to_string(),
        initial_size: LogicalSize::new(960.0, 540.0),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, game::Pulse::new(), NullAudio::new())
}
