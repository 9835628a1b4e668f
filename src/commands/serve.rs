//! `repotest serve` command.

use crate::context::ServiceContext;
use crate::server;

/// Execute the `serve` command.
///
/// # Errors
///
/// Returns an error string if the port cannot be bound or the server fails.
pub async fn run(ctx: ServiceContext, port: u16) -> Result<(), String> {
    server::serve(ctx, port).await
}
