use clap::Parser;
use coffee_finder::map::RendererKind;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "coffee-finder", version, about = "Discover coffees and where to buy them")]
pub struct CliArgs {
    /// Print catalogue stats and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override database path
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Map renderer: canvas or text
    #[arg(long, value_name = "KIND")]
    pub map: Option<RendererKind>,

    /// Insert demo roasters, coffees and locations into an empty database
    #[arg(long)]
    pub seed: bool,

    /// Headless coffee search by name or origin
    #[arg(long, value_name = "TERM", requires = "headless")]
    pub search: Option<String>,
}

impl CliArgs {
    /// Environment keys the flags override, applied before configuration
    /// is read.
    pub fn env_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();
        if let Some(db) = &self.db {
            overrides.push(("DATABASE_NAME", db.display().to_string()));
        }
        if let Some(kind) = self.map {
            overrides.push(("MAP_RENDERER", kind.to_string()));
        }
        overrides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_become_env_overrides() {
        let args = CliArgs::parse_from(["coffee-finder", "--db", "beans.db", "--map", "text"]);
        assert_eq!(
            args.env_overrides(),
            vec![
                ("DATABASE_NAME", "beans.db".to_string()),
                ("MAP_RENDERER", "text".to_string())
            ]
        );
        assert!(!args.headless);
    }

    #[test]
    fn search_requires_headless() {
        assert!(CliArgs::try_parse_from(["coffee-finder", "--search", "kenya"]).is_err());
        let args =
            CliArgs::try_parse_from(["coffee-finder", "--headless", "--search", "kenya"]);
        assert!(args.is_ok_and(|a| a.search.as_deref() == Some("kenya")));
    }

    #[test]
    fn unknown_renderer_is_rejected() {
        assert!(CliArgs::try_parse_from(["coffee-finder", "--map", "svg"]).is_err());
    }
}
