use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "micro-webserver")]
#[command(about = "Micro-webserver answers every HTTP request with the same page, one client at a time")]
#[command(version)]
pub struct Cli {
    /// Port to listen on (ports below 1024 usually need elevated privileges)
    #[arg(short, long, env = "MICRO_WEBSERVER_PORT", help = "Listening port [default: 80]")]
    pub port: Option<u16>,

    /// IP address to bind to
    #[arg(short, long, env = "MICRO_WEBSERVER_ADDRESS", help = "Bind address [default: 0.0.0.0]")]
    pub address: Option<String>,

    /// JSON config file; flags take precedence over its values
    #[arg(short, long, env = "MICRO_WEBSERVER_CONFIG", help = "Path to a JSON config file")]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(short, long, help = "Log level (error, warn, info, debug, trace)")]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_short_and_long_flags() {
        let cli = Cli::try_parse_from([
            "micro-webserver",
            "-p",
            "8080",
            "--address",
            "127.0.0.1",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.address.as_deref(), Some("127.0.0.1"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn rejects_out_of_range_port() {
        assert!(Cli::try_parse_from(["micro-webserver", "--port", "70000"]).is_err());
    }
}
