use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{header::USER_AGENT, request::Parts},
};
use axum_extra::{TypedHeader, headers::UserAgent};

use crate::cache::SessionKey;

/// 请求方标识，取 User-Agent 和客户端 IP
#[derive(Debug, Clone)]
pub struct Client(pub SessionKey);

impl<S> FromRequestParts<S> for Client
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let agent = match TypedHeader::<UserAgent>::from_request_parts(parts, state).await {
            Ok(TypedHeader(agent)) => agent.as_str().to_string(),
            // 非标准的 User-Agent 按原始字节保留
            Err(_) => parts
                .headers
                .get(USER_AGENT)
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .unwrap_or_default(),
        };

        Ok(Client(SessionKey::new(agent, client_ip(parts))))
    }
}

/// X-Forwarded-For 优先，其次是连接地址
pub fn client_ip(parts: &Parts) -> String {
    parts
        .headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .or_else(|| {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ci| ci.0.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn client_of(req: Request<()>) -> SessionKey {
        let (mut parts, _) = req.into_parts();
        let Client(key) = Client::from_request_parts(&mut parts, &()).await.unwrap();
        key
    }

    #[tokio::test]
    async fn forwarded_header_wins_over_connection() {
        let mut req = Request::builder()
            .header("user-agent", "Mozilla/5.0")
            .header("x-forwarded-for", " 203.0.113.9 ")
            .body(())
            .unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([10, 0, 0, 1], 4000))));

        let key = client_of(req).await;
        assert_eq!(key, SessionKey::new("Mozilla/5.0", "203.0.113.9"));
    }

    #[tokio::test]
    async fn falls_back_to_connection_address() {
        let mut req = Request::builder().body(()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([10, 0, 0, 1], 4000))));

        let key = client_of(req).await;
        assert_eq!(key, SessionKey::new("", "10.0.0.1"));
    }

    #[tokio::test]
    async fn unknown_without_any_address() {
        let key = client_of(Request::builder().body(()).unwrap()).await;
        assert_eq!(key.ip, "unknown");
    }
}
