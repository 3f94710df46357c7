use boid_shared::{BoidSettings, SettingsUpdate};

use crate::error::{FlockError, Result};
use crate::geometry::Domain;

/// Checks every field of a full settings value.
pub fn validate(settings: &BoidSettings) -> Result<()> {
    Domain::new(settings.width, settings.height)?;

    let non_negative = [
        ("distMax", settings.dist_max),
        ("velocityMax", settings.velocity_max),
        ("separationFactor", settings.separation_factor),
        ("cohesionFactor", settings.cohesion_factor),
        ("alignmentFactor", settings.alignment_factor),
        ("randomFactor", settings.random_factor),
        ("fearFactor", settings.fear_factor),
    ];
    for (name, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            return Err(FlockError::config(format!(
                "{} must be finite and non-negative, got {}",
                name, value
            )));
        }
    }
    Ok(())
}

/// Holds the last valid settings. Rejected updates leave it untouched.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    settings: BoidSettings,
}

impl ConfigStore {
    pub fn new(settings: BoidSettings) -> Result<Self> {
        validate(&settings)?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &BoidSettings {
        &self.settings
    }

    pub fn domain(&self) -> Domain {
        Domain {
            width: self.settings.width,
            height: self.settings.height,
        }
    }

    /// Validated result of applying `update`, without committing it.
    pub fn preview(&self, update: &SettingsUpdate) -> Result<BoidSettings> {
        let merged = update.merged_into(&self.settings);
        validate(&merged)?;
        Ok(merged)
    }

    /// Replaces the settings with a value returned by [`ConfigStore::preview`].
    pub fn commit(&mut self, settings: BoidSettings) {
        if settings != self.settings {
            log::debug!("settings changed: {:?}", settings);
        }
        self.settings = settings;
    }

    pub fn apply(&mut self, update: &SettingsUpdate) -> Result<&BoidSettings> {
        let merged = self.preview(update)?;
        self.commit(merged);
        Ok(&self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&BoidSettings::default()).is_ok());
    }

    #[test]
    fn test_partial_update() {
        let mut store = ConfigStore::default();
        let update = SettingsUpdate {
            dist_max: Some(5.0),
            ..Default::default()
        };
        let settings = *store.apply(&update).unwrap();

        assert_eq!(settings.dist_max, 5.0);
        assert_eq!(settings.separation_factor, 3.0);
        assert_eq!(settings.alignment_factor, 3.0);

        store.apply(&SettingsUpdate::default()).unwrap();
        assert_eq!(store.settings().dist_max, 5.0);
    }

    #[test]
    fn test_negative_rejected_without_change() {
        let mut store = ConfigStore::default();
        let before = *store.settings();

        for update in [
            SettingsUpdate { dist_max: Some(-1.0), ..Default::default() },
            SettingsUpdate { velocity_max: Some(-0.1), ..Default::default() },
            SettingsUpdate { cohesion_factor: Some(-2.0), ..Default::default() },
            SettingsUpdate { random_factor: Some(f64::NAN), ..Default::default() },
            SettingsUpdate { width: Some(0.0), ..Default::default() },
        ] {
            let err = store.apply(&update).unwrap_err();
            assert!(matches!(err, FlockError::InvalidConfig(_)));
            assert_eq!(*store.settings(), before);
        }
    }

    #[test]
    fn test_rejection_is_all_or_nothing() {
        let mut store = ConfigStore::default();
        let update = SettingsUpdate {
            dist_max: Some(10.0),
            alignment_factor: Some(-1.0),
            ..Default::default()
        };
        assert!(store.apply(&update).is_err());
        assert_eq!(store.settings().dist_max, 50.0);
    }

    #[test]
    fn test_zero_values_allowed() {
        let store = ConfigStore::new(BoidSettings {
            dist_max: 0.0,
            velocity_max: 0.0,
            separation_factor: 0.0,
            cohesion_factor: 0.0,
            alignment_factor: 0.0,
            random_factor: 0.0,
            fear_factor: 0.0,
            ..BoidSettings::default()
        });
        assert!(store.is_ok());
    }
}
