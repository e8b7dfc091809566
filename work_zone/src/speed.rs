use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use geom::Distance;

use crate::ConfigError;

/// How to lay out a closure for one posted speed limit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedProfile {
    /// Spacing between consecutive advance warning signs, and between the first sign and the
    /// start of the taper.
    pub advance_sign_spacing: Distance,
    pub taper_length: Distance,
    /// Empty space between the end of the taper and the active work.
    pub buffer_length: Distance,
    /// Spacing between devices around the closed area.
    pub device_spacing: Distance,
    pub taper_device_count: usize,
}

impl SpeedProfile {
    /// Lengths are in meters.
    pub fn new(
        advance_sign_spacing: f64,
        taper_length: f64,
        buffer_length: f64,
        device_spacing: f64,
        taper_device_count: usize,
    ) -> SpeedProfile {
        SpeedProfile {
            advance_sign_spacing: Distance::meters(advance_sign_spacing),
            taper_length: Distance::meters(taper_length),
            buffer_length: Distance::meters(buffer_length),
            device_spacing: Distance::meters(device_spacing),
            taper_device_count,
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.advance_sign_spacing <= Distance::ZERO {
            return Err(format!(
                "advance sign spacing {} must be positive",
                self.advance_sign_spacing
            ));
        }
        if self.device_spacing <= Distance::ZERO {
            return Err(format!(
                "device spacing {} must be positive",
                self.device_spacing
            ));
        }
        if self.taper_length < Distance::ZERO {
            return Err(format!("taper length {} is negative", self.taper_length));
        }
        if self.buffer_length < Distance::ZERO {
            return Err(format!("buffer length {} is negative", self.buffer_length));
        }
        Ok(())
    }
}

/// Speed profiles, keyed by the posted speed limit. The unit (km/h or mph) is whatever the table
/// was built with. Lookups are exact; there's no interpolation between speeds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpeedTable {
    profiles: BTreeMap<u32, SpeedProfile>,
}

/// The form profiles take in JSON. Both the short names from field manuals and descriptive names
/// are accepted.
#[derive(Deserialize)]
struct RawProfile {
    #[serde(rename = "A", alias = "advance_sign_spacing")]
    advance_sign_spacing: f64,
    #[serde(rename = "L", alias = "taper_length")]
    taper_length: f64,
    #[serde(rename = "B", alias = "buffer_length")]
    buffer_length: f64,
    #[serde(rename = "D", alias = "device_spacing")]
    device_spacing: f64,
    #[serde(rename = "barrels_in_taper", alias = "taper_device_count")]
    taper_device_count: usize,
}

impl SpeedTable {
    pub fn new() -> SpeedTable {
        SpeedTable::default()
    }

    /// Urban and rural closure distances for speeds 50 to 90.
    pub fn reference() -> SpeedTable {
        let mut profiles = BTreeMap::new();
        profiles.insert(50, SpeedProfile::new(50.0, 30.0, 35.0, 9.0, 5));
        profiles.insert(60, SpeedProfile::new(50.0, 40.0, 45.0, 9.0, 5));
        profiles.insert(70, SpeedProfile::new(75.0, 60.0, 50.0, 10.0, 6));
        profiles.insert(80, SpeedProfile::new(100.0, 80.0, 60.0, 12.0, 8));
        profiles.insert(90, SpeedProfile::new(100.0, 105.0, 65.0, 12.0, 8));
        SpeedTable { profiles }
    }

    /// Parses a table like `{"60": {"A": 50, "L": 40, "B": 45, "D": 9, "barrels_in_taper": 5}}`.
    pub fn from_json(json: &str) -> Result<SpeedTable, ConfigError> {
        let raw: BTreeMap<String, RawProfile> = serde_json::from_str(json)?;
        let mut table = SpeedTable::new();
        for (key, profile) in raw {
            let speed = key
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::BadSpeedKey { key: key.clone() })?;
            for (name, value) in [
                ("A", profile.advance_sign_spacing),
                ("L", profile.taper_length),
                ("B", profile.buffer_length),
                ("D", profile.device_spacing),
            ] {
                if !value.is_finite() {
                    return Err(ConfigError::InvalidProfile {
                        speed,
                        reason: format!("{} isn't a finite number", name),
                    });
                }
            }
            table.insert(
                speed,
                SpeedProfile::new(
                    profile.advance_sign_spacing,
                    profile.taper_length,
                    profile.buffer_length,
                    profile.device_spacing,
                    profile.taper_device_count,
                ),
            )?;
        }
        Ok(table)
    }

    /// Adds or replaces the profile for a speed, after checking it makes sense.
    pub fn insert(&mut self, speed: u32, profile: SpeedProfile) -> Result<(), ConfigError> {
        profile
            .validate()
            .map_err(|reason| ConfigError::InvalidProfile { speed, reason })?;
        self.profiles.insert(speed, profile);
        Ok(())
    }

    pub fn get(&self, speed: u32) -> Result<&SpeedProfile, ConfigError> {
        self.profiles
            .get(&speed)
            .ok_or(ConfigError::UnknownSpeed { speed })
    }

    /// All known speeds, in increasing order.
    pub fn speeds(&self) -> Vec<u32> {
        self.profiles.keys().cloned().collect()
    }
}
