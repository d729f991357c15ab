//! Tool length compensation: the fit gate that must pass before any line is
//! generated, and the feedrate de-rating applied to long tools.

use crate::error::WarmupError;
use crate::machine::MachineProfile;
use crate::tool::Tool;

/// Tools longer than this fraction of Z travel are refused outright.
pub const TOOL_LENGTH_MARGIN: f64 = 0.85;
/// Standard tool length (mm); no de-rating at or below this.
pub const NOMINAL_TOOL_LENGTH: f64 = 100.0;
/// Fraction of Z travel treated as the longest recommended tool when
/// scaling the de-rating curve.
pub const LONG_TOOL_TRAVEL_FACTOR: f64 = 0.7;
/// Fraction of each travel axis usable in the emitted limit constants; the
/// rest is a buffer in front of the limit switches.
pub const TRAVEL_MARGIN: f64 = 0.95;

/// Ensure the tool can operate within the machine's Z travel.
pub fn check_tool_fit(tool: &Tool, machine: &MachineProfile) -> Result<(), WarmupError> {
    let travel = machine.z_travel();
    if tool.length > travel * TOOL_LENGTH_MARGIN {
        return Err(WarmupError::ToolTooLong {
            length: tool.length,
            travel,
        });
    }
    Ok(())
}

/// Feedrate multiplier in [0.5, 1.0]. Long tools flex, so feed drops on a
/// log10 curve as length grows past nominal, never below half of nominal.
pub fn feed_adjustment(tool_length: f64, machine: &MachineProfile) -> f64 {
    if tool_length <= NOMINAL_TOOL_LENGTH {
        return 1.0;
    }
    let max_recommended = machine.z_travel() * LONG_TOOL_TRAVEL_FACTOR;
    let length_ratio = (tool_length - NOMINAL_TOOL_LENGTH) / (max_recommended - NOMINAL_TOOL_LENGTH);
    (1.0 - 0.5 * (1.0 + length_ratio * 9.0).log10()).max(0.5)
}

/// Deepest Z the program may command with this tool mounted.
pub fn safe_z(tool: &Tool, machine: &MachineProfile) -> f64 {
    machine.z_travel() - tool.length
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nominal_length_has_no_reduction() {
        let machine = MachineProfile::medium();
        assert_eq!(feed_adjustment(100.0, &machine), 1.0);
        assert_eq!(feed_adjustment(50.0, &machine), 1.0);
    }

    #[test]
    fn adjustment_matches_curve() {
        // 500mm travel: max recommended is 350mm, so a 225mm tool sits at
        // ratio 0.5 on the curve.
        let machine = MachineProfile::medium();
        let factor = feed_adjustment(225.0, &machine);
        assert!((factor - 0.6298186552528781).abs() < 1e-12);
    }

    #[test]
    fn adjustment_is_monotonically_non_increasing() {
        let machine = MachineProfile::medium();
        let mut last = 1.0;
        for length in [100.0, 120.0, 150.0, 200.0, 280.0, 360.0, 425.0] {
            let factor = feed_adjustment(length, &machine);
            assert!(factor <= last, "factor rose at {}mm", length);
            last = factor;
        }
    }

    #[test]
    fn adjustment_never_drops_below_half() {
        let machine = MachineProfile::medium();
        assert!(feed_adjustment(425.0, &machine) >= 0.5);
        assert!(feed_adjustment(10_000.0, &machine) >= 0.5);
    }

    #[test]
    fn fit_check_enforces_safety_margin() {
        let machine = MachineProfile::medium();
        // 85% of the 500mm travel: 425mm is the last length that fits.
        let at_limit = Tool::new(1, 425.0, 5.0).unwrap();
        assert!(check_tool_fit(&at_limit, &machine).is_ok());

        let too_long = Tool::new(1, 425.1, 5.0).unwrap();
        assert_eq!(
            check_tool_fit(&too_long, &machine),
            Err(WarmupError::ToolTooLong {
                length: 425.1,
                travel: 500.0
            })
        );
    }

    #[test]
    fn safe_z_subtracts_tool_length() {
        let machine = MachineProfile::medium();
        let tool = Tool::new(1, 100.0, 5.0).unwrap();
        assert_eq!(safe_z(&tool, &machine), 400.0);
    }
}
