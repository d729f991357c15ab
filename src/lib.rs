use config::WarmupConfig;
use error::WarmupError;
use program::WarmupGenerator;

pub mod compensation;
pub mod config;
pub mod error;
pub mod machine;
pub mod program;
pub mod tool;

/// Validate `config` against its machine profile and produce the full
/// warmup program, one command per line.
pub fn generate_program(config: WarmupConfig) -> Result<Vec<String>, WarmupError> {
    Ok(WarmupGenerator::new(config)?.generate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RampParameters;
    use crate::machine::MachineClass;
    use crate::tool::Tool;

    #[test]
    fn generates_program_for_every_class() {
        for class in MachineClass::ALL {
            let tool = Tool::new(5, 180.0, 6.0).unwrap();
            let config =
                WarmupConfig::new(class, tool, 30, true, RampParameters::default()).unwrap();
            let generator = WarmupGenerator::new(config).unwrap();
            let name = generator.machine().program_name();
            let lines = generator.generate();
            assert_eq!(*lines.first().unwrap(), format!("BEGIN PGM {} MM", name));
            assert_eq!(*lines.last().unwrap(), format!("END PGM {} MM", name));
        }
    }

    #[test]
    fn surfaces_validation_errors() {
        let tool = Tool::new(5, 450.0, 6.0).unwrap();
        let config =
            WarmupConfig::new(MachineClass::Large, tool, 30, false, RampParameters::default())
                .unwrap();
        assert!(matches!(
            generate_program(config),
            Err(WarmupError::ToolTooLong { .. })
        ));
    }
}
