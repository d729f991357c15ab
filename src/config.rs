use serde::{Deserialize, Serialize};

use crate::error::WarmupError;
use crate::machine::MachineClass;
use crate::tool::Tool;

fn percent_25() -> u32 {
    25
}
fn percent_100() -> u32 {
    100
}

/// Ramp percentages echoed into the program's parameter block. May be
/// supplied partially as JSON; omitted fields keep the stock values.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RampParameters {
    #[serde(default = "percent_25")]
    pub start_feed_percent: u32,
    #[serde(default = "percent_100")]
    pub finish_feed_percent: u32,
    #[serde(default = "percent_25")]
    pub start_rpm_percent: u32,
    #[serde(default = "percent_100")]
    pub finish_rpm_percent: u32,
}

impl Default for RampParameters {
    fn default() -> Self {
        RampParameters {
            start_feed_percent: percent_25(),
            finish_feed_percent: percent_100(),
            start_rpm_percent: percent_25(),
            finish_rpm_percent: percent_100(),
        }
    }
}

impl RampParameters {
    fn validate(&self) -> Result<(), WarmupError> {
        let pairs = [
            ("feed", self.start_feed_percent, self.finish_feed_percent),
            ("RPM", self.start_rpm_percent, self.finish_rpm_percent),
        ];
        for (label, start, finish) in pairs {
            for value in [start, finish] {
                if value == 0 || value > 100 {
                    return Err(WarmupError::InvalidRamp {
                        reason: format!("{} percentage {} out of range 1-100", label, value),
                    });
                }
            }
            if start > finish {
                return Err(WarmupError::InvalidRamp {
                    reason: format!("start {} percentage {} above finish {}", label, start, finish),
                });
            }
        }
        Ok(())
    }
}

/// Everything the generator needs, validated once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarmupConfig {
    pub machine: MachineClass,
    pub tool: Tool,
    pub duration_min: u32,
    pub use_coolant: bool,
    pub ramp: RampParameters,
}

impl WarmupConfig {
    pub fn new(
        machine: MachineClass,
        tool: Tool,
        duration_min: u32,
        use_coolant: bool,
        ramp: RampParameters,
    ) -> Result<WarmupConfig, WarmupError> {
        if !(1..=120).contains(&duration_min) {
            return Err(WarmupError::InvalidDuration(duration_min));
        }
        ramp.validate()?;
        Ok(WarmupConfig {
            machine,
            tool,
            duration_min,
            use_coolant,
            ramp,
        })
    }
}
