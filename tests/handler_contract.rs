//! Contract tests for the service catalog handler.
//!
//! These run the full create/list/update/delete cycle through
//! `ServiceCatalogHandler` against the in-memory store, so they need no
//! database. `tests/postgres_store.rs` repeats the round-trip on Postgres.

use serde_json::{json, Value};
use service_catalog::api::envelope::{InvocationRequest, InvocationResponse};
use service_catalog::api::handler::ServiceCatalogHandler;
use service_catalog::store::memory::MemoryStore;

fn handler() -> ServiceCatalogHandler<MemoryStore> {
    ServiceCatalogHandler::new(MemoryStore::new())
}

fn card(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Card A",
        "type": "card",
        "category": "payments",
        "icon": "i",
        "description": "d",
        "price": "10",
        "cta": "Buy"
    })
}

fn body_of(resp: &InvocationResponse) -> Value {
    serde_json::from_str(&resp.body).unwrap()
}

async fn create(h: &ServiceCatalogHandler<MemoryStore>, payload: &Value) -> InvocationResponse {
    h.handle(InvocationRequest::new("POST").with_body(payload.to_string()))
        .await
}

async fn list(h: &ServiceCatalogHandler<MemoryStore>) -> Vec<Value> {
    let resp = h.handle(InvocationRequest::new("GET")).await;
    assert_eq!(resp.status_code, 200);
    match body_of(&resp) {
        Value::Array(items) => items,
        other => panic!("expected array, got {}", other),
    }
}

fn ids(items: &[Value]) -> Vec<&str> {
    items.iter().map(|s| s["id"].as_str().unwrap()).collect()
}

mod create_and_list {
    use super::*;

    #[tokio::test]
    async fn test_create_minimal_then_list_shows_defaults() {
        let h = handler();
        let resp = create(&h, &card("x1")).await;

        assert_eq!(resp.status_code, 201);
        assert_eq!(body_of(&resp), json!({ "id": "x1", "message": "Service created" }));
        assert_eq!(resp.header("Content-Type"), Some("application/json"));
        assert_eq!(resp.header("Access-Control-Allow-Origin"), Some("*"));

        let items = list(&h).await;
        assert_eq!(items.len(), 1);
        let svc = &items[0];
        assert_eq!(svc["id"], "x1");
        assert_eq!(svc["name"], "Card A");
        assert_eq!(svc["type"], "card");
        assert_eq!(svc["price"], "10");
        assert_eq!(svc["acceptsVisa"], false);
        assert_eq!(svc["acceptsMastercard"], false);
        assert_eq!(svc["swift"], false);
        assert_eq!(svc["supportedCurrencies"], json!([]));
        assert_eq!(svc["billingRegions"], json!([]));
        assert_eq!(svc["priority"], 0);
        assert_eq!(svc["line1"], Value::Null);
        assert_eq!(svc["backgroundImage"], Value::Null);
        assert_eq!(svc["logoSvg"], Value::Null);
    }

    #[tokio::test]
    async fn test_full_payload_round_trips_exactly() {
        let h = handler();
        let payload = json!({
            "id": "full",
            "name": "Virtual Card",
            "type": "card",
            "category": "cards",
            "icon": "CreditCard",
            "description": "Multi-currency card",
            "line1": "Instant issue",
            "line2": "No FX fee",
            "line3": "24/7 support",
            "price": "25 USDT",
            "cta": "Order",
            "backgroundImage": "https://cdn.example/bg.png",
            "logoSvg": "<svg/>",
            "acceptsVisa": true,
            "acceptsMastercard": true,
            "acceptsApplePay": true,
            "acceptsGooglePay": false,
            "cardReissue": true,
            "highPaymentApproval": true,
            "cryptoSupport": true,
            "sepaIban": false,
            "achUsd": true,
            "swift": true,
            "supportedCurrencies": ["USD", "EUR"],
            "billingRegions": ["EU"],
            "priority": 3
        });
        assert_eq!(create(&h, &payload).await.status_code, 201);

        let items = list(&h).await;
        assert_eq!(items, vec![payload]);
    }

    #[tokio::test]
    async fn test_empty_catalog_lists_empty_array() {
        let h = handler();
        let resp = h.handle(InvocationRequest::new("GET")).await;
        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.body, "[]");
    }

    #[tokio::test]
    async fn test_duplicate_id_is_generic_500() {
        let h = handler();
        assert_eq!(create(&h, &card("dup")).await.status_code, 201);

        let resp = create(&h, &card("dup")).await;
        assert_eq!(resp.status_code, 500);
        assert!(body_of(&resp)["error"].is_string());
        assert_eq!(list(&h).await.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_required_field_is_500() {
        let h = handler();
        for key in ["id", "name", "type", "category", "icon", "description", "price", "cta"] {
            let mut payload = card("x1");
            payload.as_object_mut().unwrap().remove(key);

            let resp = create(&h, &payload).await;
            assert_eq!(resp.status_code, 500, "missing {}", key);
            let message = body_of(&resp)["error"].as_str().unwrap().to_string();
            assert!(message.contains(key), "{} not in {}", key, message);
        }
        assert!(list(&h).await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_500() {
        let h = handler();
        let resp = h
            .handle(InvocationRequest::new("POST").with_body("{\"id\": "))
            .await;
        assert_eq!(resp.status_code, 500);
        assert!(body_of(&resp)["error"].is_string());

        let resp = h.handle(InvocationRequest::new("POST")).await;
        assert_eq!(resp.status_code, 500);
    }
}

mod ordering {
    use super::*;

    #[tokio::test]
    async fn test_priority_desc_then_newest_first() {
        let h = handler();
        let rows = [
            ("low-old", 0),
            ("high-old", 10),
            ("low-new", 0),
            ("mid", 5),
            ("high-new", 10),
        ];
        for (id, priority) in rows {
            let mut payload = card(id);
            payload["priority"] = json!(priority);
            assert_eq!(create(&h, &payload).await.status_code, 201);
        }

        let items = list(&h).await;
        assert_eq!(ids(&items), vec!["high-new", "high-old", "mid", "low-new", "low-old"]);
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn test_update_replaces_every_field_and_keeps_id() {
        let h = handler();
        let mut original = card("u1");
        original["acceptsVisa"] = json!(true);
        original["supportedCurrencies"] = json!(["USD"]);
        original["line1"] = json!("first");
        create(&h, &original).await;

        let updated = json!({
            "id": "u1",
            "name": "Card B",
            "type": "esim",
            "category": "travel",
            "icon": "Globe",
            "description": "updated",
            "price": 12,
            "cta": "Get",
            "cryptoSupport": true,
            "priority": 2
        });
        let resp = h
            .handle(InvocationRequest::new("PUT").with_body(updated.to_string()))
            .await;
        assert_eq!(resp.status_code, 200);
        assert_eq!(body_of(&resp), json!({ "message": "Service updated" }));

        let items = list(&h).await;
        assert_eq!(items.len(), 1);
        let svc = &items[0];
        assert_eq!(svc["id"], "u1");
        assert_eq!(svc["name"], "Card B");
        assert_eq!(svc["type"], "esim");
        assert_eq!(svc["category"], "travel");
        assert_eq!(svc["price"], "12");
        assert_eq!(svc["cryptoSupport"], true);
        assert_eq!(svc["priority"], 2);
        // absent optionals reset to defaults: full replacement, not a patch
        assert_eq!(svc["acceptsVisa"], false);
        assert_eq!(svc["supportedCurrencies"], json!([]));
        assert_eq!(svc["line1"], Value::Null);
    }

    #[tokio::test]
    async fn test_update_unknown_id_still_succeeds() {
        let h = handler();
        create(&h, &card("real")).await;

        let resp = h
            .handle(InvocationRequest::new("PUT").with_body(card("ghost").to_string()))
            .await;
        assert_eq!(resp.status_code, 200);
        assert_eq!(body_of(&resp), json!({ "message": "Service updated" }));
        assert_eq!(ids(&list(&h).await), vec!["real"]);
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn test_delete_removes_only_matching_row() {
        let h = handler();
        for id in ["a", "b", "c"] {
            create(&h, &card(id)).await;
        }

        let resp = h
            .handle(InvocationRequest::new("DELETE").with_query("id", "b"))
            .await;
        assert_eq!(resp.status_code, 200);
        assert_eq!(body_of(&resp), json!({ "message": "Service deleted" }));
        assert_eq!(ids(&list(&h).await), vec!["c", "a"]);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_still_succeeds() {
        let h = handler();
        create(&h, &card("a")).await;

        let resp = h
            .handle(InvocationRequest::new("DELETE").with_query("id", "nope"))
            .await;
        assert_eq!(resp.status_code, 200);
        assert_eq!(list(&h).await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_without_id_is_500() {
        let h = handler();
        create(&h, &card("a")).await;

        let resp = h.handle(InvocationRequest::new("DELETE")).await;
        assert_eq!(resp.status_code, 500);
        assert_eq!(body_of(&resp), json!({ "error": "missing query parameter `id`" }));
        assert_eq!(list(&h).await.len(), 1);
    }
}

mod protocol {
    use super::*;

    #[tokio::test]
    async fn test_preflight_ignores_request_content() {
        let h = handler();
        let resp = h
            .handle(
                InvocationRequest::new("OPTIONS")
                    .with_body("garbage")
                    .with_query("id", "x"),
            )
            .await;

        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.body, "");
        assert_eq!(resp.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(
            resp.header("Access-Control-Allow-Methods"),
            Some("GET, POST, PUT, DELETE, OPTIONS")
        );
        assert_eq!(resp.header("Access-Control-Allow-Headers"), Some("Content-Type"));
    }

    #[tokio::test]
    async fn test_unsupported_method_is_405() {
        let h = handler();
        for method in ["PATCH", "HEAD", "TRACE"] {
            let resp = h.handle(InvocationRequest::new(method)).await;
            assert_eq!(resp.status_code, 405);
            assert_eq!(body_of(&resp), json!({ "error": "Method not allowed" }));
            assert_eq!(resp.header("Access-Control-Allow-Origin"), Some("*"));
        }
    }

    #[tokio::test]
    async fn test_runtime_event_shape_is_accepted() {
        let h = handler();
        create(&h, &card("evt")).await;

        let event: InvocationRequest = serde_json::from_value(json!({
            "httpMethod": "DELETE",
            "queryStringParameters": { "id": "evt" },
            "body": null
        }))
        .unwrap();
        let resp = h.handle(event).await;
        assert_eq!(resp.status_code, 200);
        assert!(list(&h).await.is_empty());
    }
}
