//! The service catalog endpoint: one invocation in, one SQL statement
//! against the store, one response envelope out.

use axum::http::StatusCode;
use serde_json::json;

use super::envelope::{InvocationRequest, InvocationResponse};
use crate::errors::HandlerError;
use crate::models::service::{NewService, ServicePayload};
use crate::store::{Connector, ServiceStore};

/// A parsed, validated request. Building one never touches the store.
#[derive(Debug)]
enum Action {
    List,
    Create(NewService),
    Update(NewService),
    Delete(String),
}

impl Action {
    async fn execute<S: ServiceStore>(
        self,
        store: &mut S,
    ) -> Result<InvocationResponse, HandlerError> {
        match self {
            Action::List => {
                let services = store.list_services().await?;
                tracing::debug!(count = services.len(), "listed services");
                Ok(InvocationResponse::json(
                    StatusCode::OK,
                    serde_json::to_value(&services)?,
                ))
            }
            Action::Create(svc) => {
                let id = store.insert_service(&svc).await?;
                tracing::info!(id = %id, "service created");
                Ok(InvocationResponse::json(
                    StatusCode::CREATED,
                    json!({ "id": id, "message": "Service created" }),
                ))
            }
            Action::Update(svc) => {
                let rows = store.update_service(&svc).await?;
                if rows == 0 {
                    tracing::debug!(id = %svc.id, "update matched no rows");
                }
                Ok(InvocationResponse::json(
                    StatusCode::OK,
                    json!({ "message": "Service updated" }),
                ))
            }
            Action::Delete(id) => {
                let rows = store.delete_service(&id).await?;
                if rows == 0 {
                    tracing::debug!(id = %id, "delete matched no rows");
                }
                Ok(InvocationResponse::json(
                    StatusCode::OK,
                    json!({ "message": "Service deleted" }),
                ))
            }
        }
    }
}

/// Stateless between invocations: all it holds is the means to open a
/// store session.
pub struct ServiceCatalogHandler<C> {
    connector: C,
}

impl<C: Connector> ServiceCatalogHandler<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub async fn handle(&self, request: InvocationRequest) -> InvocationResponse {
        tracing::debug!(method = %request.method, "invocation");

        let action = match request.method.as_str() {
            "OPTIONS" => return InvocationResponse::preflight(),
            "GET" => Ok(Action::List),
            "POST" => ServicePayload::parse(request.body.as_deref())
                .map(|p| Action::Create(p.into_record()))
                .map_err(HandlerError::from),
            "PUT" => ServicePayload::parse(request.body.as_deref())
                .map(|p| Action::Update(p.into_record()))
                .map_err(HandlerError::from),
            "DELETE" => request
                .query_parameters
                .get("id")
                .cloned()
                .map(Action::Delete)
                .ok_or(HandlerError::MissingParameter("id")),
            other => {
                tracing::debug!(method = other, "method not allowed");
                return InvocationResponse::json(
                    StatusCode::METHOD_NOT_ALLOWED,
                    json!({ "error": "Method not allowed" }),
                );
            }
        };

        let outcome = match action {
            Ok(action) => self.run(action).await,
            Err(e) => Err(e),
        };

        outcome.unwrap_or_else(HandlerError::into_response)
    }

    /// Open a session, run the one statement, and close the session on
    /// every path before the outcome is returned.
    async fn run(&self, action: Action) -> Result<InvocationResponse, HandlerError> {
        let mut session = self.connector.connect().await?;
        let outcome = action.execute(&mut session).await;
        if let Err(e) = session.close().await {
            tracing::warn!("failed to close store session: {}", e);
        }
        outcome
    }
}
