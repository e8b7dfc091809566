use crate::PolygonRole;

/// Anything that stops a plan from being generated.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Problems with the speed table.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no speed profile for speed {speed}")]
    UnknownSpeed { speed: u32 },
    #[error("bad speed profile for speed {speed}: {reason}")]
    InvalidProfile { speed: u32, reason: String },
    #[error("couldn't parse speed table: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("speed table key {key:?} isn't a whole number")]
    BadSpeedKey { key: String },
}

#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("{role} polygon is degenerate: {reason}")]
    DegeneratePolygon { role: PolygonRole, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = PlanError::from(ConfigError::UnknownSpeed { speed: 65 });
        assert_eq!(err.to_string(), "no speed profile for speed 65");

        let err = ConfigError::InvalidProfile {
            speed: 55,
            reason: "device spacing must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "bad speed profile for speed 55: device spacing must be positive"
        );

        let err = PlanError::from(GeometryError::DegeneratePolygon {
            role: PolygonRole::Road,
            reason: "Ring collapses to a line or point".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "road polygon is degenerate: Ring collapses to a line or point"
        );
    }
}
