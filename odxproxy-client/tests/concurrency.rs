// Many calls in flight against one client: every call must resolve with the
// response to its own request, in whatever order they complete.

use async_trait::async_trait;
use futures::future::join_all;
use odxproxy_client::{
    params, Client, ClientInfo, HttpTransport, InstanceInfo, KeywordRequest, PendingCall,
    RequestId, TransportError,
};
use odxproxy_transport::{HttpRequest, HttpResponse};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Echoes the first positional param back as the result, after a delay that
/// makes later requests finish first.
#[derive(Debug, Default)]
struct EchoTransport {
    served: AtomicUsize,
}

#[async_trait]
impl HttpTransport for EchoTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let envelope: Value = serde_json::from_slice(&request.body)
            .map_err(|e| TransportError::Request(Box::new(e)))?;
        let n = envelope["params"][0].as_u64().unwrap_or(0);

        tokio::time::sleep(Duration::from_millis(50u64.saturating_sub(n))).await;
        self.served.fetch_add(1, Ordering::SeqCst);

        let body = json!({
            "jsonrpc": "2.0",
            "id": envelope["id"],
            "result": envelope["params"][0],
        });
        Ok(HttpResponse::new(200, body.to_string()))
    }
}

fn client(transport: Arc<EchoTransport>) -> Client {
    let client = Client::with_transport(transport);
    client
        .init(ClientInfo::new(
            InstanceInfo::new("https://erp", 1, "demo", "secret"),
            "odx-key",
        ))
        .unwrap();
    client
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_do_not_cross_talk() {
    const CALLS: u64 = 50;
    let transport = Arc::new(EchoTransport::default());
    let client = client(transport.clone());

    let calls: Vec<PendingCall<u64>> = (0..CALLS)
        .map(|n| {
            client.call_method::<u64>(
                "res.partner",
                "echo",
                &params![n],
                KeywordRequest::new(),
                Some(RequestId::from(format!("call-{n}"))),
            )
        })
        .collect();

    let results = join_all(calls).await;

    assert_eq!(transport.served.load(Ordering::SeqCst), CALLS as usize);
    for (n, result) in results.into_iter().enumerate() {
        let response = result.unwrap();
        assert_eq!(response.result, Some(n as u64));
        assert_eq!(response.id.unwrap().as_str(), format!("call-{n}"));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_calls_from_many_tasks() {
    let transport = Arc::new(EchoTransport::default());
    let client = Arc::new(client(transport.clone()));

    let tasks: Vec<_> = (0..20u64)
        .map(|n| {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                let response = client
                    .call_method::<u64>("res.partner", "echo", &params![n], KeywordRequest::new(), None)
                    .await
                    .unwrap();
                (n, response.result)
            })
        })
        .collect();

    for task in tasks {
        let (n, result) = task.await.unwrap();
        assert_eq!(result, Some(n));
    }
}

#[tokio::test]
async fn test_call_proceeds_without_being_polled() {
    let transport = Arc::new(EchoTransport::default());
    let client = client(transport.clone());

    let pending = client.call_method::<u64>(
        "res.partner",
        "echo",
        &params![49u64],
        KeywordRequest::new(),
        None,
    );
    assert!(pending.id().is_some());

    // The call was already dispatched; give it time to complete unpolled
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(transport.served.load(Ordering::SeqCst), 1);
    assert!(pending.is_finished());
    assert_eq!(pending.await.unwrap().result, Some(49));
}

#[tokio::test]
async fn test_cancelled_call_is_never_served() {
    let transport = Arc::new(EchoTransport::default());
    let client = client(transport.clone());

    let pending = client.call_method::<u64>(
        "res.partner",
        "echo",
        &params![0u64],
        KeywordRequest::new(),
        None,
    );
    pending.cancel();

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(transport.served.load(Ordering::SeqCst), 0);
}
