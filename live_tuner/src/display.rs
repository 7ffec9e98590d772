use chroma_tracker::FrameReport;
use opencv::{highgui, Result};

/// The five windows of the tuner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Captured frame with accepted blobs drawn on it.
    Original,
    Gaussian,
    Hsv,
    /// Trackbars only, no image.
    Control,
    Mask,
}

impl Surface {
    pub const ALL: [Surface; 5] = [
        Surface::Original,
        Surface::Gaussian,
        Surface::Hsv,
        Surface::Control,
        Surface::Mask,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Surface::Original => "originalVideo",
            Surface::Gaussian => "gaussianFrame",
            Surface::Hsv => "hsvVideo",
            Surface::Control => "control",
            Surface::Mask => "mask",
        }
    }

    fn window_flags(self) -> i32 {
        match self {
            // resizable so long trackbar labels fit
            Surface::Control => highgui::WINDOW_NORMAL,
            _ => highgui::WINDOW_AUTOSIZE,
        }
    }
}

pub struct Display;

impl Display {
    pub fn open() -> Result<Self> {
        for surface in Surface::ALL {
            highgui::named_window(surface.name(), surface.window_flags())?;
        }
        Ok(Self)
    }

    /// Shows every image surface for one processed frame.
    pub fn render(&self, report: &FrameReport) -> Result<()> {
        highgui::imshow(Surface::Original.name(), &report.annotated)?;
        highgui::imshow(Surface::Gaussian.name(), &report.blurred)?;
        highgui::imshow(Surface::Hsv.name(), &report.hsv)?;
        highgui::imshow(Surface::Mask.name(), &report.mask)?;
        Ok(())
    }

    pub fn close(self) -> Result<()> {
        highgui::destroy_all_windows()
    }
}
