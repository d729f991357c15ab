use clap::ValueEnum;

/// Physical limits of one machine. All travels in mm; Z is measured down
/// from the gauge plane, so `z_limits.1` is 0 and `z_limits.0` is negative.
pub struct MachineProfile {
    pub name: &'static str,
    pub x_limits: (f64, f64),
    pub y_limits: (f64, f64),
    pub z_limits: (f64, f64),
    pub max_rpm: u32,
    /// X/Y/Z feedrates in m/min.
    pub feedrates_m_min: [f64; 3],
    pub coolant_available: bool,
}

impl MachineProfile {
    pub fn small() -> Self {
        Self {
            name: "Small CNC Machine",
            x_limits: (-381.0, 381.0),
            y_limits: (-254.0, 254.0),
            z_limits: (-500.0, 0.0),
            max_rpm: 16000,
            feedrates_m_min: [45.0, 45.0, 40.0],
            coolant_available: true,
        }
    }
    pub fn medium() -> Self {
        Self {
            name: "Medium CNC Machine",
            x_limits: (-508.0, 508.0),
            y_limits: (-330.0, 330.0),
            z_limits: (-500.0, 0.0),
            max_rpm: 16000,
            feedrates_m_min: [45.0, 45.0, 40.0],
            coolant_available: true,
        }
    }
    pub fn large() -> Self {
        Self {
            name: "Large CNC Machine",
            x_limits: (-635.0, 635.0),
            y_limits: (-254.0, 254.0),
            z_limits: (-500.0, 0.0),
            max_rpm: 16000,
            feedrates_m_min: [45.0, 45.0, 40.0],
            coolant_available: true,
        }
    }

    /// Feedrates converted to the mm/min the controller expects in F words.
    pub fn feedrates_mm_min(&self) -> [f64; 3] {
        self.feedrates_m_min.map(|feed| feed * 1000.0)
    }

    /// Usable Z travel below the gauge plane, as a positive depth.
    pub fn z_travel(&self) -> f64 {
        self.z_limits.0.abs()
    }

    /// Name as it appears in BEGIN/END PGM lines.
    pub fn program_name(&self) -> String {
        self.name.replace(' ', "_")
    }
}

/// The fixed set of machine sizes a program can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MachineClass {
    Small,
    Medium,
    Large,
}

impl MachineClass {
    pub const ALL: [MachineClass; 3] = [
        MachineClass::Small,
        MachineClass::Medium,
        MachineClass::Large,
    ];

    pub fn profile(self) -> MachineProfile {
        match self {
            MachineClass::Small => MachineProfile::small(),
            MachineClass::Medium => MachineProfile::medium(),
            MachineClass::Large => MachineProfile::large(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_class_has_a_profile() {
        let names: Vec<_> = MachineClass::ALL
            .iter()
            .map(|class| class.profile().name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Small CNC Machine",
                "Medium CNC Machine",
                "Large CNC Machine"
            ]
        );
    }

    #[test]
    fn z_runs_downward_from_zero() {
        for class in MachineClass::ALL {
            let profile = class.profile();
            assert_eq!(profile.z_limits.1, 0.0);
            assert!(profile.z_limits.0 < 0.0);
            assert_eq!(profile.z_travel(), 500.0);
        }
    }

    #[test]
    fn feedrates_convert_to_mm_min() {
        assert_eq!(
            MachineProfile::medium().feedrates_mm_min(),
            [45000.0, 45000.0, 40000.0]
        );
    }

    #[test]
    fn program_name_has_no_spaces() {
        assert_eq!(
            MachineProfile::small().program_name(),
            "Small_CNC_Machine"
        );
    }
}
