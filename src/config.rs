#[derive(Debug, Clone)]
pub struct LogConfig {
    pub filter: String,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log: LogConfig,
    pub run_demo: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let log = LogConfig {
            filter: std::env::var("RUST_LOG").unwrap_or_else(|_| "usermgmt=debug".into()),
            json: std::env::var("LOG_FORMAT")
                .map(|v| v == "json")
                .unwrap_or(false),
        };
        let run_demo = match std::env::var("USERMGMT_DEMO") {
            Ok(v) => parse_flag(&v)?,
            Err(std::env::VarError::NotPresent) => true,
            Err(e) => return Err(e.into()),
        };
        Ok(Self { log, run_demo })
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("invalid boolean flag: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert!(parse_flag("true").unwrap());
        assert!(parse_flag(" YES ").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert!(!parse_flag("off").unwrap());
    }

    #[test]
    fn parse_flag_rejects_garbage() {
        let err = parse_flag("maybe").unwrap_err();
        assert!(err.to_string().contains("maybe"));
    }
}
