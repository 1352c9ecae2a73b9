//! Nitrolite RPC wire format
//!
//! Requests are `{"req": [id, method, params, timestamp], "sig": [...]}`,
//! responses are `{"res": [id, method, result, timestamp], "sig": [...]}`.
//! Signed requests must transmit the exact canonical string that was hashed;
//! re-serializing after signing can reorder keys and invalidate the signature.

use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::error::Result;

/// An outbound request tuple before canonicalization.
#[derive(Debug, Clone)]
pub struct RpcRequest {
    pub id: u64,
    pub method: String,
    pub params: Value,
    pub timestamp: i64,
}

impl RpcRequest {
    /// Build a request tuple with the current timestamp.
    pub fn new(id: u64, method: &str, params: Value) -> Self {
        Self {
            id,
            method: method.to_string(),
            params,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// The `[id, method, params, timestamp]` array form.
    pub fn to_value(&self) -> Value {
        json!([self.id, self.method, self.params, self.timestamp])
    }

    /// Canonical serialization of the request tuple (sorted keys at all depths).
    pub fn canonical(&self) -> Result<String> {
        let sorted = sort_keys(&self.to_value());
        Ok(serde_json::to_string(&sorted)?)
    }
}

/// A parsed inbound response or push notification.
///
/// `id` is 0 for unsolicited pushes (`bu`, `cu`, `tr`, `asu`).
#[derive(Debug, Clone)]
pub struct RpcResponse {
    pub id: u64,
    pub method: String,
    pub result: Value,
}

impl RpcResponse {
    /// Parse a raw frame. Returns `None` for anything that is not a
    /// well-formed `res` envelope; the caller logs and ignores those.
    pub fn parse(raw: &str) -> Option<Self> {
        let msg: Value = serde_json::from_str(raw).ok()?;
        let res = msg.get("res")?.as_array()?;
        if res.len() < 3 {
            return None;
        }
        Some(Self {
            id: res[0].as_u64().unwrap_or(0),
            method: res[1].as_str()?.to_string(),
            result: res[2].clone(),
        })
    }
}

/// Recursively sort object keys. Arrays preserve element order; object keys
/// are sorted lexicographically at every nesting level.
pub fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                sorted.insert(key.clone(), sort_keys(&map[key]));
            }
            Value::Object(sorted)
        }
        other => other.clone(),
    }
}

/// Assemble the wire frame around an already-canonical request string.
///
/// The canonical string is spliced in verbatim so the transmitted bytes are
/// exactly what the signature covers.
pub fn build_frame(canonical_req: &str, sigs: &[String]) -> Result<String> {
    let sig_json = serde_json::to_string(sigs)?;
    Ok(format!("{{\"req\":{canonical_req},\"sig\":{sig_json}}}"))
}

/// Build an unsigned frame (empty signature list) for methods the clearnode
/// accepts without a session signature: auth_request and read-only queries.
pub fn build_unsigned_frame(request: &RpcRequest) -> Result<String> {
    build_frame(&request.canonical()?, &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalization_idempotent() {
        let req = RpcRequest {
            id: 7,
            method: "transfer".to_string(),
            params: json!({"destination": "0xabc", "allocations": [{"asset": "ytest.usd", "amount": "0.0001"}]}),
            timestamp: 1700000000000,
        };
        let first = req.canonical().unwrap();
        let second = req.canonical().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_canonicalization_key_order_independent() {
        let a = RpcRequest {
            id: 1,
            method: "transfer".to_string(),
            params: json!({"destination": "0xabc", "allocations": [{"asset": "ytest.usd", "amount": "1"}]}),
            timestamp: 42,
        };
        // Same fields, declared in the opposite order
        let b = RpcRequest {
            id: 1,
            method: "transfer".to_string(),
            params: json!({"allocations": [{"amount": "1", "asset": "ytest.usd"}], "destination": "0xabc"}),
            timestamp: 42,
        };
        assert_eq!(a.canonical().unwrap(), b.canonical().unwrap());
    }

    #[test]
    fn test_canonical_sorts_nested_keys() {
        let req = RpcRequest {
            id: 1,
            method: "m".to_string(),
            params: json!({"b": {"z": 1, "a": 2}, "a": 3}),
            timestamp: 0,
        };
        assert_eq!(
            req.canonical().unwrap(),
            r#"[1,"m",{"a":3,"b":{"a":2,"z":1}},0]"#
        );
    }

    #[test]
    fn test_frame_splices_canonical_string() {
        let req = RpcRequest {
            id: 3,
            method: "auth_verify".to_string(),
            params: json!({"challenge": "abc123"}),
            timestamp: 99,
        };
        let canonical = req.canonical().unwrap();
        let frame = build_frame(&canonical, &["0xsig".to_string()]).unwrap();
        assert_eq!(
            frame,
            r#"{"req":[3,"auth_verify",{"challenge":"abc123"},99],"sig":["0xsig"]}"#
        );
    }

    #[test]
    fn test_parse_response() {
        let raw = r#"{"res":[5,"transfer",{"transactions":[{"id":77}]},1700000000000],"sig":[]}"#;
        let res = RpcResponse::parse(raw).unwrap();
        assert_eq!(res.id, 5);
        assert_eq!(res.method, "transfer");
        assert_eq!(res.result["transactions"][0]["id"], 77);
    }

    #[test]
    fn test_parse_push_notification() {
        // Pushes arrive with id 0
        let raw = r#"{"res":[0,"bu",{"balance_updates":[]},1700000000000],"sig":[]}"#;
        let res = RpcResponse::parse(raw).unwrap();
        assert_eq!(res.id, 0);
        assert_eq!(res.method, "bu");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(RpcResponse::parse("not json").is_none());
        assert!(RpcResponse::parse(r#"{"req":[1,"m",{},0],"sig":[]}"#).is_none());
        assert!(RpcResponse::parse(r#"{"res":[1],"sig":[]}"#).is_none());
    }
}
