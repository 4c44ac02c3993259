//! Serve command implementation

use std::sync::Arc;

use crate::cli::Cli;
use crate::context::AppContext;
use crate::error::Result;
use crate::server;

/// Build the application context and run the server until shutdown
pub async fn run(cli: &Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    let ctx = Arc::new(AppContext::new(config)?);
    server::serve(ctx).await
}
