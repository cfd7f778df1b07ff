use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::protocol;
use crate::state::AppState;

/// Owns the server tasks and their shutdown.
pub struct AppController {
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn bind(&self) -> anyhow::Result<TcpListener> {
        let addr = &self.state.config.network.addr;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        tracing::info!("API listening on ws://{}", listener.local_addr()?);
        Ok(listener)
    }

    pub fn spawn_tasks(&self, listener: TcpListener) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        let state = self.state.clone();
        tasks.spawn(juba_io::serve_ws(
            listener,
            self.cancel_token.child_token(),
            move |text: String| {
                let state = state.clone();
                async move { protocol::handle(&state, &text).await }
            },
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
