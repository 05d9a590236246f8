use error_stack::{Report, ResultExt};
use kernel::KernelError;

static SERVER_PORT: &str = "SERVER_PORT";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, Report<KernelError>> {
        Self::parse(dotenvy::var(SERVER_PORT).ok())
    }

    fn parse(port: Option<String>) -> Result<Self, Report<KernelError>> {
        let port = match port {
            None => DEFAULT_PORT,
            Some(port) => port
                .trim()
                .parse::<u16>()
                .change_context_lazy(|| KernelError::Internal)
                .attach_printable_lazy(|| format!("Invalid {}: {}", SERVER_PORT, port))?,
        };
        Ok(Self { port })
    }
}
