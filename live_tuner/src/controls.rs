// The control panel owns the tuning values. OpenCV trackbars are the only
// writers; the main loop reads them once per frame through `snapshot`, which
// yields a self-contained `PipelineConfig` for that frame.

use crate::display::Surface;
use chroma_tracker::{Parameter, PipelineConfig};
use opencv::{highgui, Result};

pub struct ControlPanel {
    window: &'static str,
}

impl ControlPanel {
    /// Creates one trackbar per parameter on the control window, starting at `initial`.
    pub fn create(initial: &PipelineConfig) -> Result<Self> {
        let window = Surface::Control.name();
        for parameter in Parameter::ALL {
            highgui::create_trackbar(parameter.label(), window, None, parameter.max(), None)?;
            highgui::set_trackbar_pos(parameter.label(), window, initial.get(parameter))?;
        }
        Ok(Self { window })
    }

    /// Reads every trackbar position into a fresh configuration.
    pub fn snapshot(&self) -> Result<PipelineConfig> {
        let mut config = PipelineConfig::default();
        for parameter in Parameter::ALL {
            let position = highgui::get_trackbar_pos(parameter.label(), self.window)?;
            config.set(parameter, position);
        }
        Ok(config)
    }
}
