// THEORY:
// The `parameters` module holds the tunable state of the tracker. In a tuning
// harness these values change while the video is running, so they are modelled
// as a plain value type (`PipelineConfig`) that the UI layer writes and the
// pipeline reads. The control panel takes a snapshot at the top of every frame
// and hands it to the stages by reference; a frame never observes a partially
// updated set.
//
// Every value is addressable through the `Parameter` enum, which also carries
// the trackbar label, range and default. The trackbar panel and the command
// line both iterate `Parameter::ALL`, so a new knob only has to be added here.

use crate::core_modules::segmentation::HsvRange;
use crate::error::{Result, TrackerError};
use std::fmt;
use std::str::FromStr;

/// A single named, integer-valued tuning knob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    HueLow,
    HueHigh,
    SaturationLow,
    SaturationHigh,
    ValueLow,
    ValueHigh,
    GaussianFilterSize,
    ErodeSize,
    DilateSize,
    AreaThreshold,
}

impl Parameter {
    /// All parameters in trackbar order.
    pub const ALL: [Parameter; 10] = [
        Parameter::HueLow,
        Parameter::HueHigh,
        Parameter::SaturationLow,
        Parameter::SaturationHigh,
        Parameter::ValueLow,
        Parameter::ValueHigh,
        Parameter::GaussianFilterSize,
        Parameter::ErodeSize,
        Parameter::DilateSize,
        Parameter::AreaThreshold,
    ];

    /// The trackbar label, also accepted on the command line.
    pub fn label(self) -> &'static str {
        match self {
            Parameter::HueLow => "hLow",
            Parameter::HueHigh => "hHigh",
            Parameter::SaturationLow => "sLow",
            Parameter::SaturationHigh => "sHigh",
            Parameter::ValueLow => "vLow",
            Parameter::ValueHigh => "vHigh",
            Parameter::GaussianFilterSize => "gaussianFilterSize",
            Parameter::ErodeSize => "erodeSize",
            Parameter::DilateSize => "dilateSize",
            Parameter::AreaThreshold => "areaThreshold",
        }
    }

    /// Upper bound of the trackbar. The lower bound is always 0.
    pub fn max(self) -> i32 {
        match self {
            Parameter::HueLow
            | Parameter::HueHigh
            | Parameter::SaturationLow
            | Parameter::SaturationHigh
            | Parameter::ValueLow
            | Parameter::ValueHigh => 255,
            Parameter::GaussianFilterSize | Parameter::ErodeSize | Parameter::DilateSize => 200,
            Parameter::AreaThreshold => 1000,
        }
    }

    pub fn default_value(self) -> i32 {
        PipelineConfig::default().get(self)
    }

    pub fn from_label(label: &str) -> Option<Parameter> {
        Parameter::ALL.into_iter().find(|p| p.label() == label)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One `label=value` override, as given with `--set` on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterOverride {
    pub parameter: Parameter,
    pub value: i32,
}

impl FromStr for ParameterOverride {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TrackerError::InvalidParameter {
            name: s.split('=').next().unwrap_or(s).trim().to_string(),
            value: s.split_once('=').map(|(_, v)| v.trim()).unwrap_or("").to_string(),
        };

        let (label, raw_value) = s.split_once('=').ok_or_else(invalid)?;
        let parameter = Parameter::from_label(label.trim()).ok_or_else(invalid)?;
        let value: i32 = raw_value.trim().parse().map_err(|_| invalid())?;
        if !(0..=parameter.max()).contains(&value) {
            return Err(invalid());
        }
        Ok(Self { parameter, value })
    }
}

/// The full parameter set read by the pipeline for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub h_low: i32,
    pub h_high: i32,
    pub s_low: i32,
    pub s_high: i32,
    pub v_low: i32,
    pub v_high: i32,
    /// Gaussian blur radius; the kernel is `2r+1` wide.
    pub gaussian_filter_size: i32,
    /// Erosion radius; the structuring element is `2r+1` wide.
    pub erode_size: i32,
    /// Dilation radius; the structuring element is `2r+1` wide.
    pub dilate_size: i32,
    /// Contours must enclose strictly more than this many square pixels to be drawn.
    pub area_threshold: i32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            h_low: 0,
            h_high: 50,
            s_low: 92,
            s_high: 255,
            v_low: 135,
            v_high: 255,
            gaussian_filter_size: 28,
            erode_size: 28,
            dilate_size: 28,
            area_threshold: 500,
        }
    }
}

impl PipelineConfig {
    pub fn get(&self, parameter: Parameter) -> i32 {
        match parameter {
            Parameter::HueLow => self.h_low,
            Parameter::HueHigh => self.h_high,
            Parameter::SaturationLow => self.s_low,
            Parameter::SaturationHigh => self.s_high,
            Parameter::ValueLow => self.v_low,
            Parameter::ValueHigh => self.v_high,
            Parameter::GaussianFilterSize => self.gaussian_filter_size,
            Parameter::ErodeSize => self.erode_size,
            Parameter::DilateSize => self.dilate_size,
            Parameter::AreaThreshold => self.area_threshold,
        }
    }

    /// Writes a value, clamped into the parameter's trackbar range.
    pub fn set(&mut self, parameter: Parameter, value: i32) {
        let value = value.clamp(0, parameter.max());
        let slot = match parameter {
            Parameter::HueLow => &mut self.h_low,
            Parameter::HueHigh => &mut self.h_high,
            Parameter::SaturationLow => &mut self.s_low,
            Parameter::SaturationHigh => &mut self.s_high,
            Parameter::ValueLow => &mut self.v_low,
            Parameter::ValueHigh => &mut self.v_high,
            Parameter::GaussianFilterSize => &mut self.gaussian_filter_size,
            Parameter::ErodeSize => &mut self.erode_size,
            Parameter::DilateSize => &mut self.dilate_size,
            Parameter::AreaThreshold => &mut self.area_threshold,
        };
        *slot = value;
    }

    pub fn apply(&mut self, overrides: &[ParameterOverride]) {
        for o in overrides {
            self.set(o.parameter, o.value);
        }
    }

    /// The inclusive HSV box used by the segmentation stage.
    pub fn hsv_range(&self) -> HsvRange {
        HsvRange {
            low: [self.h_low, self.s_low, self.v_low],
            high: [self.h_high, self.s_high, self.v_high],
        }
    }
}
