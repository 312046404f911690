use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use staffdir::staffdir_config::RemoteConfig;
use staffdir::staffdir_models::LoginDto;
use staffdir::{DirectoryClient, RemoteCall, RemoteEnvelope, RemoteFunction, Transport};

pub const TEST_URL: &str = "https://script.example.com/exec";
pub const TEST_TOKEN: &str = "tok-123";

/// Records every call and answers from a queue of canned replies. An empty
/// queue answers with a plain success.
#[derive(Default)]
pub struct FakeTransport {
    calls: Mutex<Vec<RemoteCall>>,
    replies: Mutex<VecDeque<Result<RemoteEnvelope, String>>>,
}

#[allow(dead_code)]
impl FakeTransport {
    pub fn reply(&self, envelope: RemoteEnvelope) {
        self.replies.lock().unwrap().push_back(Ok(envelope));
    }

    pub fn reply_json(&self, value: Value) {
        self.reply(serde_json::from_value(value).unwrap());
    }

    pub fn fail(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> RemoteCall {
        self.calls().pop().expect("no remote call was made")
    }

    pub fn functions(&self) -> Vec<RemoteFunction> {
        self.calls().iter().map(|c| c.function).collect()
    }
}

impl Transport for FakeTransport {
    fn send(&self, call: &RemoteCall) -> anyhow::Result<RemoteEnvelope> {
        self.calls.lock().unwrap().push(call.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(envelope)) => Ok(envelope),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Ok(RemoteEnvelope::success("OK")),
        }
    }
}

pub type TestClient = DirectoryClient<Arc<FakeTransport>>;

pub fn test_config() -> RemoteConfig {
    RemoteConfig {
        url: TEST_URL.to_string(),
        fallback_photo_url: "https://cdn.example.com/blank.png".to_string(),
    }
}

pub fn setup_client() -> (TestClient, Arc<FakeTransport>) {
    let transport = Arc::new(FakeTransport::default());
    let client = DirectoryClient::new(test_config(), Arc::clone(&transport)).unwrap();
    (client, transport)
}

/// Logs in with the given permission object and returns a client whose
/// transport call log starts empty.
#[allow(dead_code)]
pub fn logged_in_client(permissions: Value) -> (TestClient, Arc<FakeTransport>) {
    let (client, transport) = setup_client();
    transport.reply_json(json!({
        "verified": true,
        "token": TEST_TOKEN,
        "email": "ops@example.com",
        "permissions": permissions
    }));
    client
        .login(&LoginDto {
            email: "ops@example.com".to_string(),
            password: "secret".to_string(),
        })
        .unwrap();
    transport.clear_calls();
    (client, transport)
}

#[allow(dead_code)]
pub fn super_admin() -> Value {
    json!({ "isSuperAdmin": true })
}

#[allow(dead_code)]
pub fn scoped(rights: &[&str], branches: &[&str]) -> Value {
    let rights: serde_json::Map<String, Value> = rights
        .iter()
        .map(|r| (r.to_string(), Value::Bool(true)))
        .collect();
    json!({ "isSuperAdmin": false, "rights": rights, "branches": branches })
}
