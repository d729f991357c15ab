//! Warmup program assembly for Heidenhain-style controllers.
//!
//! Output is the literal dialect: every move carries pre-computed integer
//! coordinates, truncated toward zero, with explicit sign prefixes.

use crate::compensation::{check_tool_fit, feed_adjustment, safe_z, TRAVEL_MARGIN};
use crate::config::WarmupConfig;
use crate::error::WarmupError;
use crate::machine::MachineProfile;

/// Nominal duration of one warmup cycle.
pub const CYCLE_MINUTES: u32 = 2;

/// Number of cycles needed to fill the requested duration, at least one.
pub fn plan_cycles(duration_min: u32) -> u32 {
    duration_min.div_ceil(CYCLE_MINUTES).max(1)
}

/// Scaling factor for cycle `cycle` of `cycles`: a linear ramp from 30% to
/// 100%, or full intensity when there is only one cycle.
pub fn intensity(cycle: u32, cycles: u32) -> f64 {
    if cycles > 1 {
        0.3 + 0.7 * cycle as f64 / (cycles - 1) as f64
    } else {
        1.0
    }
}

/// Holds a validated configuration together with its machine profile.
/// Construction runs the tool-fit gate; `generate` cannot fail after that.
pub struct WarmupGenerator {
    config: WarmupConfig,
    machine: MachineProfile,
}

impl WarmupGenerator {
    pub fn new(config: WarmupConfig) -> Result<WarmupGenerator, WarmupError> {
        let machine = config.machine.profile();
        WarmupGenerator::with_profile(config, machine)
    }

    /// Pair a configuration with an explicit profile instead of the stock
    /// table. The machine class inside `config` is ignored.
    pub fn with_profile(
        config: WarmupConfig,
        machine: MachineProfile,
    ) -> Result<WarmupGenerator, WarmupError> {
        check_tool_fit(&config.tool, &machine)?;
        Ok(WarmupGenerator { config, machine })
    }

    pub fn machine(&self) -> &MachineProfile {
        &self.machine
    }

    /// Produce the complete program. Deterministic: identical inputs yield
    /// identical lines.
    pub fn generate(&self) -> Vec<String> {
        let safe_z = safe_z(&self.config.tool, &self.machine);
        let feed_adjust = feed_adjustment(self.config.tool.length, &self.machine);
        let cycles = plan_cycles(self.config.duration_min);
        let coolant = self.config.use_coolant && self.machine.coolant_available;

        let mut lines = self.header(safe_z, feed_adjust);
        if coolant {
            lines.push("M8 ; Flood coolant ON".to_string());
        }
        lines.extend(self.warmup_cycles(safe_z, cycles, feed_adjust));
        if coolant {
            lines.push("M9 ; Flood coolant OFF".to_string());
        }
        lines.extend(self.cooldown(safe_z, feed_adjust));
        lines.extend(self.axis_sweeps(safe_z, feed_adjust));
        lines.extend(self.footer());
        lines.retain(|line| !line.trim().is_empty());
        lines
    }

    fn header(&self, safe_z: f64, feed_adjust: f64) -> Vec<String> {
        let tool = &self.config.tool;
        let ramp = &self.config.ramp;
        let [feed_x, feed_y, feed_z] = self.machine.feedrates_mm_min();
        let mut lines = vec![
            format!("BEGIN PGM {} MM", self.machine.program_name()),
            ";-- Clear Moves --".to_string(),
            "L Z+0 R0 FMAX ; Retract Z before any XY motion".to_string(),
            "L X+0 Y+0 R0 FMAX ; Move to machine origin".to_string(),
            "M5 ; Stop spindle".to_string(),
            format!("; TOOL: #{} L{:.1}mm R{:.1}mm", tool.number, tool.length, tool.radius),
            format!(
                "; FEEDRATE ADJUSTMENT: {:.1}% (tool length compensation)",
                feed_adjust * 100.0
            ),
            format!("BLK FORM 0.1 Z X+0 Y+0 Z-{:.0}", (safe_z * 0.1).max(10.0)),
            format!(
                "BLK FORM 0.2 X+{:.0} Y+{:.0} Z+0",
                self.machine.x_limits.1, self.machine.y_limits.1
            ),
            format!("TOOL DEF {} L+{:.1} R{:.1}", tool.number, tool.length, tool.radius),
            format!("TOOL CALL {} Z S0", tool.number),
        ];

        lines.push(";-- Warmup Parameters --".to_string());
        lines.push(format!("START_FEED_PERCENT = {}", ramp.start_feed_percent));
        lines.push(format!("FINISH_FEED_PERCENT = {}", ramp.finish_feed_percent));
        lines.push(format!("START_RPM_PERCENT = {}", ramp.start_rpm_percent));
        lines.push(format!("FINISH_RPM_PERCENT = {}", ramp.finish_rpm_percent));
        lines.push(format!(
            "WARMUP_DURATION_MINUTES = {}",
            self.config.duration_min
        ));

        lines.push(format!(
            ";-- Machine Limits (using {:.0}% of travels to stay away from limits) --",
            TRAVEL_MARGIN * 100.0
        ));
        let x_lim = (self.machine.x_limits.1 * TRAVEL_MARGIN) as i64;
        let y_lim = (self.machine.y_limits.1 * TRAVEL_MARGIN) as i64;
        let z_lim = (self.machine.z_travel() * TRAVEL_MARGIN) as i64;
        lines.push(format!("X_MAX = +{}", x_lim));
        lines.push(format!("X_MIN = -{}", x_lim));
        lines.push(format!("Y_MAX = +{}", y_lim));
        lines.push(format!("Y_MIN = -{}", y_lim));
        lines.push("Z_MAX = +0".to_string());
        lines.push(format!("Z_MIN = -{}", z_lim));

        lines.push(format!(
            ";-- Feedrate adjusted to {:.1}% (tool length compensation) --",
            feed_adjust * 100.0
        ));
        lines.push(format!("MAX_FEED_X = {}", (feed_x * feed_adjust) as i64));
        lines.push(format!("MAX_FEED_Y = {}", (feed_y * feed_adjust) as i64));
        lines.push(format!("MAX_FEED_Z = {}", (feed_z * feed_adjust) as i64));
        lines.push(format!("MAX_RPM = {}", self.machine.max_rpm));
        lines
    }

    fn warmup_cycles(&self, safe_z: f64, cycles: u32, feed_adjust: f64) -> Vec<String> {
        let tool = self.config.tool.number;
        let [_, feed_y, feed_z] = self.machine.feedrates_mm_min();
        let mut lines = Vec::new();
        for cycle in 0..cycles {
            let intensity = intensity(cycle, cycles);
            let xy_feed = (feed_y * feed_adjust * intensity) as i64;
            let plunge_feed = (feed_z * feed_adjust * intensity) as i64;
            let x = (self.machine.x_limits.1 * 0.7 * intensity) as i64;
            let y = (self.machine.y_limits.1 * 0.7 * intensity) as i64;

            lines.push(format!(
                "; --- CYCLE {}/{} ({:.0}% intensity) ---",
                cycle + 1,
                cycles,
                intensity * 100.0
            ));
            lines.push(format!(
                "L X+{} Y+{} Z-{} F{}",
                x,
                y,
                (safe_z * 0.5 * intensity) as i64,
                xy_feed
            ));
            lines.push(format!(
                "L X-{} Y-{} Z-{} F{}",
                x,
                y,
                (safe_z * 0.7 * intensity) as i64,
                xy_feed
            ));
            lines.push(format!(
                "TOOL CALL {} Z S{} M3",
                tool,
                (self.machine.max_rpm as f64 * intensity) as i64
            ));
            lines.push(format!(
                "L Z-{} F{}",
                (safe_z * 0.9 * intensity) as i64,
                plunge_feed
            ));
            if cycle + 1 < cycles {
                lines.push("M0 ; Pause 10 sec".to_string());
            }
        }
        lines
    }

    fn cooldown(&self, safe_z: f64, feed_adjust: f64) -> Vec<String> {
        let tool = self.config.tool.number;
        let [_, feed_y, _] = self.machine.feedrates_mm_min();
        let feed = (feed_y * feed_adjust * 0.4) as i64;
        vec![
            "; === COOLDOWN PHASE ===".to_string(),
            format!("TOOL CALL {} Z S{} M3", tool, self.machine.max_rpm / 3),
            format!(
                "L X+{} Y+{} Z-{} F{}",
                (self.machine.x_limits.1 * 0.3) as i64,
                (self.machine.y_limits.1 * 0.3) as i64,
                (safe_z * 0.3) as i64,
                feed
            ),
            "M0 ; Pause 30 sec".to_string(),
            format!("TOOL CALL {} Z S{} M3", tool, self.machine.max_rpm / 6),
            format!(
                "L X+{} Y+{} Z-{} F{}",
                (self.machine.x_limits.1 * 0.15) as i64,
                (self.machine.y_limits.1 * 0.15) as i64,
                (safe_z * 0.15) as i64,
                feed / 2
            ),
            "M0 ; Pause 30 sec".to_string(),
        ]
    }

    // One full sweep per axis at finish feed. Knocks coolant off the ways
    // and leaves each axis exercised over its whole travel.
    fn axis_sweeps(&self, safe_z: f64, feed_adjust: f64) -> Vec<String> {
        let [feed_x, feed_y, feed_z] = self.machine.feedrates_mm_min();
        let x = (self.machine.x_limits.1 * TRAVEL_MARGIN) as i64;
        let y = (self.machine.y_limits.1 * TRAVEL_MARGIN) as i64;
        let z = (safe_z * TRAVEL_MARGIN) as i64;
        let finish_x = (feed_x * feed_adjust) as i64;
        let finish_y = (feed_y * feed_adjust) as i64;
        let finish_z = (feed_z * feed_adjust) as i64;
        vec![
            ";-- Single Axis Sweeps --".to_string(),
            format!("L X-{} Y+0 Z+0 F{}", x, finish_x),
            format!("L X+{} F{}", x, finish_x),
            format!("L X-{} F{}", x, finish_x),
            format!("L X+0 Y-{} Z+0 F{}", y, finish_y),
            format!("L Y+{} F{}", y, finish_y),
            format!("L Y-{} F{}", y, finish_y),
            format!("L X+0 Y+0 Z-{} F{}", z, finish_z),
            format!("L Z+0 F{}", finish_z),
            format!("L Z-{} F{}", z, finish_z),
        ]
    }

    fn footer(&self) -> Vec<String> {
        vec![
            format!("TOOL CALL {} Z S0", self.config.tool.number),
            "L Z+100 FMAX M91".to_string(),
            "L X+0 Y+0 FMAX M30".to_string(),
            format!("END PGM {} MM", self.machine.program_name()),
        ]
    }
}
