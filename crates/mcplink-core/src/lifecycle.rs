//! Request lifecycle
//!
//! One controller handles each incoming query: fresh session registry,
//! best-effort connect, conversation loop, and teardown, all under a
//! single wall-clock deadline. Teardown runs exactly once on every exit
//! path: once a session is registered, its close is guaranteed to be
//! attempted, whether the request succeeds, fails, or times out.

use std::sync::Arc;
use std::time::Duration;

use crate::backend::ModelBackend;
use crate::catalog::ToolCatalog;
use crate::conversation::ConversationDriver;
use crate::dispatch::ToolDispatcher;
use crate::error::{BridgeError, BridgeResult};
use crate::logging::Logger;
use crate::session::{McpConfig, SessionConnector, SessionRegistry};
use crate::settings::RequestSettings;

/// Handles one query end to end
pub struct RequestController {
    backend: Arc<dyn ModelBackend>,
    connector: Arc<dyn SessionConnector>,
    settings: RequestSettings,
    logger: Arc<dyn Logger>,
}

impl RequestController {
    /// Create a controller; one instance serves many requests
    pub fn new(
        backend: Arc<dyn ModelBackend>,
        connector: Arc<dyn SessionConnector>,
        settings: RequestSettings,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            backend,
            connector,
            settings,
            logger,
        }
    }

    /// Run one request: connect, loop, teardown
    ///
    /// The deadline covers connect and loop together. Expiry cancels the
    /// in-flight operation and reports `Timeout`; sessions registered
    /// before the expiry are still torn down.
    pub async fn handle(&self, query: &str, config: &McpConfig) -> BridgeResult<String> {
        let mut registry =
            SessionRegistry::new(Arc::clone(&self.connector), Arc::clone(&self.logger));
        let deadline = Duration::from_secs(self.settings.deadline_secs);

        let result =
            tokio::time::timeout(deadline, self.drive(&mut registry, query, config)).await;

        registry.teardown().await;

        match result {
            Ok(outcome) => outcome,
            Err(_elapsed) => {
                self.logger.error(&format!(
                    "[RequestController] Request exceeded {}s deadline",
                    self.settings.deadline_secs
                ));
                Err(BridgeError::Timeout)
            }
        }
    }

    async fn drive(
        &self,
        registry: &mut SessionRegistry,
        query: &str,
        config: &McpConfig,
    ) -> BridgeResult<String> {
        registry.connect(config).await;

        if registry.is_empty() {
            self.logger
                .error("[RequestController] No provider connected, rejecting request");
            return Err(BridgeError::EmptyCatalog);
        }

        let catalog = ToolCatalog::build(registry);
        self.logger.info(&format!(
            "[RequestController] Advertising {} tools from {} providers",
            catalog.len(),
            registry.len()
        ));

        let dispatcher = ToolDispatcher::new(registry, &catalog, Arc::clone(&self.logger));
        let driver = ConversationDriver::new(
            self.backend.as_ref(),
            &dispatcher,
            catalog.tools(),
            self.settings.max_rounds,
            Arc::clone(&self.logger),
        );

        driver.run(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::logging::NoOpLogger;
    use crate::session::testing::{FakeConnector, FakeSession};
    use crate::session::ProviderTransport;
    use crate::types::{ToolCall, ToolOutput};
    use serde_json::json;
    use std::sync::atomic::Ordering;

    fn sse_config(names: &[&str]) -> McpConfig {
        let mut config = McpConfig::default();
        for name in names {
            config.providers.insert(
                name.to_string(),
                ProviderTransport::Sse {
                    url: format!("http://{}/sse", name),
                },
            );
        }
        config
    }

    fn controller(backend: MockBackend, connector: FakeConnector) -> RequestController {
        RequestController::new(
            Arc::new(backend),
            Arc::new(connector),
            RequestSettings {
                deadline_secs: 300,
                max_rounds: 25,
            },
            Arc::new(NoOpLogger),
        )
    }

    #[tokio::test]
    async fn test_single_provider_tool_round_trip() {
        let session = FakeSession::new(&["search"]).on_invoke(|tool, args| {
            assert_eq!(tool, "search");
            assert_eq!(args["q"], "cats");
            Ok(ToolOutput::success("3 results"))
        });
        let closes = session.close_counter();

        let backend = MockBackend::new()
            .then_tool_calls(vec![ToolCall::new(
                "call_1",
                "server_0_search",
                json!({"q": "cats"}),
            )])
            .then_text("Found 3 results.");

        let controller = controller(backend, FakeConnector::new().with_session("prov", session));
        let response = controller
            .handle("how many cats?", &sse_config(&["prov"]))
            .await
            .unwrap();

        assert_eq!(response, "Found 3 results.");
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_connected_provider_rejects_before_any_model_call() {
        let backend = MockBackend::new().then_text("should never be used");
        let connector = FakeConnector::new().with_failure("prov", "refused");
        let controller = RequestController::new(
            Arc::new(backend),
            Arc::new(connector),
            RequestSettings::default(),
            Arc::new(NoOpLogger),
        );

        let err = controller.handle("q", &sse_config(&["prov"])).await.unwrap_err();
        assert!(matches!(err, BridgeError::EmptyCatalog));
        assert_eq!(err.status(), 400);
    }

    #[tokio::test]
    async fn test_out_of_range_identifier_fails_without_invoking() {
        let session = FakeSession::new(&["search"]);
        let calls = session.call_log();
        let closes = session.close_counter();

        let backend = MockBackend::new()
            .then_tool_calls(vec![ToolCall::new("c1", "server_3_search", json!({}))]);

        let controller = controller(backend, FakeConnector::new().with_session("prov", session));
        let err = controller.handle("q", &sse_config(&["prov"])).await.unwrap_err();

        assert!(matches!(err, BridgeError::InvalidIdentifier(_)));
        assert!(calls.lock().is_empty());
        // Teardown still ran
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_teardown_runs_when_the_driver_fails() {
        let session = FakeSession::new(&["search"]);
        let closes = session.close_counter();

        let backend = MockBackend::new().then_error("auth expired");
        let controller = controller(backend, FakeConnector::new().with_session("prov", session));

        let err = controller.handle("q", &sse_config(&["prov"])).await.unwrap_err();
        assert!(matches!(err, BridgeError::Backend(_)));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_model_call_times_out_and_still_tears_down() {
        let session = FakeSession::new(&["search"]);
        let closes = session.close_counter();

        let controller = RequestController::new(
            Arc::new(MockBackend::hanging()),
            Arc::new(FakeConnector::new().with_session("prov", session)),
            RequestSettings {
                deadline_secs: 5,
                max_rounds: 25,
            },
            Arc::new(NoOpLogger),
        );

        let err = controller.handle("q", &sse_config(&["prov"])).await.unwrap_err();
        assert!(matches!(err, BridgeError::Timeout));
        assert_eq!(err.status(), 504);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_two_providers_with_identical_tool_names_route_separately() {
        let alpha = FakeSession::new(&["lookup"])
            .on_invoke(|_, _| Ok(ToolOutput::success("from alpha")));
        let beta = FakeSession::new(&["lookup"])
            .on_invoke(|_, _| Ok(ToolOutput::success("from beta")));
        let alpha_calls = alpha.call_log();
        let beta_calls = beta.call_log();

        let backend = MockBackend::new()
            .then_tool_calls(vec![ToolCall::new("c1", "server_1_lookup", json!({}))])
            .then_text("done");

        let controller = controller(
            backend,
            FakeConnector::new()
                .with_session("alpha", alpha)
                .with_session("beta", beta),
        );
        let response = controller
            .handle("q", &sse_config(&["alpha", "beta"]))
            .await
            .unwrap();

        assert_eq!(response, "done");
        // BTreeMap order: alpha is ordinal 0, beta is ordinal 1
        assert!(alpha_calls.lock().is_empty());
        assert_eq!(beta_calls.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_partial_connect_failure_still_serves_the_request() {
        let good = FakeSession::new(&["search"])
            .on_invoke(|_, _| Ok(ToolOutput::success("hit")));

        let backend = MockBackend::new()
            .then_tool_calls(vec![ToolCall::new("c1", "server_0_search", json!({}))])
            .then_text("answer");

        let controller = controller(
            backend,
            FakeConnector::new()
                .with_failure("broken", "refused")
                .with_session("good", good),
        );
        let response = controller
            .handle("q", &sse_config(&["broken", "good"]))
            .await
            .unwrap();

        assert_eq!(response, "answer");
    }
}
