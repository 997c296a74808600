//! Browser background worker (`firebase-messaging-sw.js`) rendering.

use serde::Serialize;
use serde_json::json;

use crate::config::{FallbackPolicy, ReceiverSettings, WorkerConfig};

const TEMPLATE: &str = include_str!("firebase-messaging-sw.js.tmpl");

/// Path the worker must be served from for the messaging SDK to find it
pub const WORKER_SCRIPT_PATH: &str = "/firebase-messaging-sw.js";

/// Web-app configuration object passed to `firebase.initializeApp`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FirebaseWebConfig<'a> {
    api_key: &'a str,
    auth_domain: &'a str,
    project_id: &'a str,
    storage_bucket: &'a str,
    messaging_sender_id: &'a str,
    app_id: &'a str,
}

fn js_literal<T: Serialize + ?Sized>(value: &T) -> String {
    // JSON text is a valid JavaScript expression; serializing a string or a
    // struct of strings cannot fail.
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

/// Renders the worker script with the project identifiers, icon and
/// fallback policy baked in.
pub fn render_worker_script(worker: &WorkerConfig, receiver: &ReceiverSettings) -> String {
    let firebase_config = FirebaseWebConfig {
        api_key: &worker.api_key,
        auth_domain: &worker.auth_domain,
        project_id: &worker.project_id,
        storage_bucket: &worker.storage_bucket,
        messaging_sender_id: &worker.messaging_sender_id,
        app_id: &worker.app_id,
    };

    let fallback = match receiver.fallback {
        FallbackPolicy::Drop => "null".to_string(),
        FallbackPolicy::Generic => js_literal(&json!({
            "title": receiver.generic_title,
            "body": receiver.generic_body,
        })),
    };

    TEMPLATE
        .replace("{{SDK_VERSION}}", &worker.sdk_version)
        .replace("{{FIREBASE_CONFIG}}", &js_literal(&firebase_config))
        .replace("{{ICON}}", &js_literal(&receiver.icon))
        .replace("{{FALLBACK}}", &fallback)
}
