use super::{DEFAULT_CAPACITY, DEFAULT_IP_CEILING, SCRATCH};
use std::path::PathBuf;

/// ## Machine settings
///
/// Every field has a working default. `from_env` lets an operator
/// override them without a command line.
#[derive(Debug, Clone)]
pub struct Config {
    /// Memory size in cells.
    pub capacity: usize,
    /// Execution faults once the instruction pointer passes this.
    pub ip_ceiling: i64,
    pub scratch: usize,
    pub stack_limit: usize,
    pub prompt: String,
    pub image: PathBuf,
    /// Fenced source built after the image is loaded.
    pub source: Option<PathBuf>,
    pub log_level: log::LevelFilter,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            capacity: DEFAULT_CAPACITY,
            ip_ceiling: DEFAULT_IP_CEILING,
            scratch: SCRATCH,
            stack_limit: u16::max_value() as usize,
            prompt: "POW4TH> ".to_string(),
            image: PathBuf::from(".firmware/ngaImage"),
            source: None,
            log_level: log::LevelFilter::Warn,
        }
    }
}

impl Config {
    pub fn from_env() -> Config {
        Config::default().overlay(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any `POW4TH_*` lookup. Unparsable numbers
    /// keep the default.
    pub fn overlay<F: Fn(&str) -> Option<String>>(mut self, var: F) -> Config {
        if let Some(image) = var("POW4TH_IMAGE") {
            self.image = PathBuf::from(image);
        }
        if let Some(source) = var("POW4TH_SOURCE") {
            self.source = Some(PathBuf::from(source));
        }
        if let Some(Ok(capacity)) = var("POW4TH_MEMORY").map(|s| s.parse::<usize>()) {
            self.capacity = capacity;
        }
        if let Some(Ok(ceiling)) = var("POW4TH_CEILING").map(|s| s.parse::<i64>()) {
            self.ip_ceiling = ceiling;
        }
        if let Some(Ok(level)) = var("POW4TH_LOG").map(|s| s.parse::<log::LevelFilter>()) {
            self.log_level = level;
        }
        self
    }

    pub fn with_capacity(self, capacity: usize) -> Config {
        Config { capacity, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay() {
        let c = Config::default().overlay(|key| match key {
            "POW4TH_MEMORY" => Some("100".to_string()),
            "POW4TH_LOG" => Some("trace".to_string()),
            "POW4TH_CEILING" => Some("lots".to_string()),
            _ => None,
        });
        assert_eq!(c.capacity, 100);
        assert_eq!(c.log_level, log::LevelFilter::Trace);
        assert_eq!(c.ip_ceiling, DEFAULT_IP_CEILING);
        assert_eq!(c.source, None);
    }
}
