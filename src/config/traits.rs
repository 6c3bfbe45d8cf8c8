use crate::error::CgpError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), CgpError>;
}

/// Checks that a probability lies in `[0, 1]`
pub(crate) fn validate_chance(name: &str, value: f32) -> Result<(), CgpError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(CgpError::Configuration(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(())
}
