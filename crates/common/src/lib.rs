//! Pieces shared by the server crate and the binary: log setup and the
//! small response types that are not tied to a store.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn health_serializes_status_field() {
        let body = serde_json::to_value(types::Health::ok()).unwrap();
        assert_eq!(body, serde_json::json!({"status": "ok"}));
    }
}
