use crate::config::{resolve_region, resolve_service_name};
use crate::constants::{NEPTUNE_DB_SERVICE, NEPTUNE_GRAPH_SERVICE};
use crate::hash::{hex_sha256, EMPTY_PAYLOAD_SHA256};
use crate::sign::RequestSigner;
use crate::{
    Context, Credential, Error, ErrorKind, HttpSend, ProvideCredential, Result,
    SigningCredential,
};
use bytes::Bytes;
use std::sync::Arc;

/// SigningHttpClient decorates an HTTP transport with SigV4 signing.
///
/// Every outgoing request gets a freshly resolved credential, a payload hash
/// over the exact bytes handed to the transport, and the merged
/// `authorization` / `x-amz-date` headers. Nothing is cached between sends,
/// so credential rotation on the provider side takes effect immediately.
///
/// The transport is opaque: pooling, TLS, and redirects stay its concern.
/// Cloning the client is cheap and clones share the transport and provider.
///
/// ## Example
///
/// ```no_run
/// use neptune_sigv4::{
///     Context, OsEnv, DefaultCredentialProvider, ReqwestHttpSend, SigningHttpClient,
/// };
///
/// # async fn example() -> neptune_sigv4::Result<()> {
/// let ctx = Context::new().with_env(OsEnv);
/// let client = SigningHttpClient::for_neptune(
///     ctx,
///     DefaultCredentialProvider::new(),
///     "us-east-1",
///     ReqwestHttpSend::default(),
/// );
///
/// let req = neptune_sigv4::sparql::query_get(
///     "https://db.cluster.us-east-1.neptune.amazonaws.com:8182/sparql",
///     "SELECT * { ?s ?p ?o } LIMIT 10",
/// )?;
/// let resp = client.send(req).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SigningHttpClient {
    ctx: Context,
    provider: Arc<dyn ProvideCredential<Credential = Credential>>,
    signer: RequestSigner,
    transport: Arc<dyn HttpSend>,
}

impl SigningHttpClient {
    /// Create a new signing client for an explicit service/region pair.
    pub fn new(
        ctx: Context,
        provider: impl ProvideCredential<Credential = Credential>,
        service: &str,
        region: &str,
        transport: impl HttpSend,
    ) -> Self {
        Self {
            ctx,
            provider: Arc::new(provider),
            signer: RequestSigner::new(service, region),
            transport: Arc::new(transport),
        }
    }

    /// Create a signing client for Neptune database clusters (`neptune-db`).
    pub fn for_neptune(
        ctx: Context,
        provider: impl ProvideCredential<Credential = Credential>,
        region: &str,
        transport: impl HttpSend,
    ) -> Self {
        Self::new(ctx, provider, NEPTUNE_DB_SERVICE, region, transport)
    }

    /// Create a signing client for Neptune Analytics graphs (`neptune-graph`).
    pub fn for_neptune_analytics(
        ctx: Context,
        provider: impl ProvideCredential<Credential = Credential>,
        region: &str,
        transport: impl HttpSend,
    ) -> Self {
        Self::new(ctx, provider, NEPTUNE_GRAPH_SERVICE, region, transport)
    }

    /// Create a signing client with service name and region resolved from the
    /// environment.
    ///
    /// Service name falls back to `neptune-db`; an unresolvable region fails
    /// here with [`ErrorKind::ConfigInvalid`], before anything is sent.
    pub async fn with_defaults(
        ctx: Context,
        provider: impl ProvideCredential<Credential = Credential>,
        transport: impl HttpSend,
    ) -> Result<Self> {
        let service = resolve_service_name(&ctx, None);
        let region = resolve_region(&ctx, None).await?;

        Ok(Self::new(ctx, provider, &service, &region, transport))
    }

    /// The service name requests are signed for.
    pub fn service(&self) -> &str {
        self.signer.service()
    }

    /// The region requests are signed for.
    pub fn region(&self) -> &str {
        self.signer.region()
    }

    /// Resolve a credential and sign the request, returning it with the
    /// authorization headers merged in and the body re-attached untouched.
    ///
    /// The payload hash covers exactly the `Bytes` carried by `req`, so the
    /// signature can never disagree with what the transport will send.
    pub async fn signed_request(&self, req: http::Request<Bytes>) -> Result<http::Request<Bytes>> {
        let cred = self
            .provider
            .provide_credential(&self.ctx)
            .await?
            .ok_or_else(|| {
                Error::credential_invalid("no credentials resolved for signing")
            })?;
        if !cred.is_valid() {
            return Err(if cred.expires_in.is_some() {
                Error::credential_expired("resolved credentials are expired or about to expire")
            } else {
                Error::credential_invalid("resolved credentials are incomplete")
            });
        }

        let (mut parts, body) = req.into_parts();
        let payload_hash = if body.is_empty() {
            EMPTY_PAYLOAD_SHA256.to_string()
        } else {
            hex_sha256(&body)
        };

        self.signer
            .sign(&mut parts, &cred, &payload_hash)
            .map_err(|e| match e.kind() {
                ErrorKind::RequestInvalid => e,
                _ => Error::signing_failed("failed to sign request").with_source(e),
            })?;

        Ok(http::Request::from_parts(parts, body))
    }

    /// Sign the request and send it over the wrapped transport.
    ///
    /// Transport errors propagate unchanged.
    pub async fn send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = self.signed_request(req).await?;
        self.transport.http_send(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provide_credential::StaticCredentialProvider;
    use crate::time::parse_rfc3339;
    use http::{header, Method, StatusCode};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Transport that records the request it was asked to send.
    #[derive(Debug, Default)]
    struct RecordingTransport {
        sent: Mutex<Option<http::Request<Bytes>>>,
        calls: AtomicUsize,
    }

    #[derive(Debug, Clone, Default)]
    struct SharedTransport(Arc<RecordingTransport>);

    #[async_trait::async_trait]
    impl HttpSend for SharedTransport {
        async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            self.0.calls.fetch_add(1, Ordering::SeqCst);
            *self.0.sent.lock().unwrap() = Some(req);

            Ok(http::Response::builder()
                .status(StatusCode::OK)
                .body(Bytes::new())
                .expect("response must build"))
        }
    }

    #[derive(Debug)]
    struct NoCredentialProvider;

    #[async_trait::async_trait]
    impl ProvideCredential for NoCredentialProvider {
        type Credential = Credential;

        async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
            Ok(None)
        }
    }

    #[derive(Debug)]
    struct ExpiredCredentialProvider;

    #[async_trait::async_trait]
    impl ProvideCredential for ExpiredCredentialProvider {
        type Credential = Credential;

        async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
            Ok(Some(Credential {
                access_key_id: "AKIDEXAMPLE".to_string(),
                secret_access_key: "secret".to_string(),
                expires_in: Some(parse_rfc3339("2015-08-30T12:36:00Z")?),
                ..Default::default()
            }))
        }
    }

    fn provider() -> StaticCredentialProvider {
        StaticCredentialProvider::new("AKIDEXAMPLE", "secret")
    }

    fn request() -> http::Request<Bytes> {
        http::Request::builder()
            .method(Method::GET)
            .uri("https://host/sparql?query=SELECT%20%2A%20%7B%20%3Fs%20%3Fp%20%3Fo%20%7D")
            .body(Bytes::new())
            .expect("request must build")
    }

    #[tokio::test]
    async fn test_send_signs_and_forwards() {
        let transport = SharedTransport::default();
        let client = SigningHttpClient::for_neptune(
            Context::new(),
            provider(),
            "us-east-1",
            transport.clone(),
        );

        let resp = client.send(request()).await.expect("send must succeed");
        assert_eq!(resp.status(), StatusCode::OK);

        let sent = transport.0.sent.lock().unwrap().take().expect("transport must be called");
        assert!(sent.headers().contains_key(header::AUTHORIZATION));
        assert!(sent.headers().contains_key("x-amz-date"));
        assert!(sent.headers().contains_key(header::HOST));
    }

    #[tokio::test]
    async fn test_signed_request_adds_only_signing_headers() {
        let client = SigningHttpClient::for_neptune(
            Context::new(),
            provider(),
            "us-east-1",
            crate::NoopHttpSend,
        );

        let signed = client
            .signed_request(request())
            .await
            .expect("signing must succeed");

        // Host comes from the URI authority; besides it, a token-less
        // credential adds exactly the authorization and date headers.
        let mut names = signed
            .headers()
            .keys()
            .map(|k| k.as_str())
            .collect::<Vec<_>>();
        names.sort_unstable();
        assert_eq!(names, vec!["authorization", "host", "x-amz-date"]);
    }

    #[tokio::test]
    async fn test_signed_request_with_token_adds_token_header() {
        let client = SigningHttpClient::for_neptune(
            Context::new(),
            StaticCredentialProvider::new("AKIDEXAMPLE", "secret")
                .with_session_token("SESSIONTOKEN"),
            "us-east-1",
            crate::NoopHttpSend,
        );

        let signed = client
            .signed_request(request())
            .await
            .expect("signing must succeed");

        let mut names = signed
            .headers()
            .keys()
            .map(|k| k.as_str())
            .collect::<Vec<_>>();
        names.sort_unstable();
        assert_eq!(
            names,
            vec!["authorization", "host", "x-amz-date", "x-amz-security-token"]
        );
    }

    #[tokio::test]
    async fn test_body_is_forwarded_untouched() {
        let transport = SharedTransport::default();
        let client = SigningHttpClient::for_neptune(
            Context::new(),
            provider(),
            "us-east-1",
            transport.clone(),
        );

        let body = Bytes::from_static(b"update=INSERT DATA { <urn:s> <urn:p> <urn:o> }");
        let req = http::Request::builder()
            .method(Method::POST)
            .uri("https://host/sparql")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body.clone())
            .expect("request must build");

        client.send(req).await.expect("send must succeed");

        let sent = transport.0.sent.lock().unwrap().take().expect("transport must be called");
        assert_eq!(sent.body(), &body);
    }

    #[tokio::test]
    async fn test_extensions_survive_signing() {
        #[derive(Debug, Clone, PartialEq)]
        struct Timeout(u64);

        let client = SigningHttpClient::for_neptune(
            Context::new(),
            provider(),
            "us-east-1",
            crate::NoopHttpSend,
        );

        let mut req = request();
        req.extensions_mut().insert(Timeout(30));

        let signed = client
            .signed_request(req)
            .await
            .expect("signing must succeed");
        assert_eq!(signed.extensions().get::<Timeout>(), Some(&Timeout(30)));
    }

    #[tokio::test]
    async fn test_no_credentials_is_credential_error() {
        let transport = SharedTransport::default();
        let client = SigningHttpClient::for_neptune(
            Context::new(),
            NoCredentialProvider,
            "us-east-1",
            transport.clone(),
        );

        let err = client.send(request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        // Nothing reaches the transport on the failure path.
        assert_eq!(transport.0.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_expired_credentials_are_rejected() {
        let client = SigningHttpClient::for_neptune(
            Context::new(),
            ExpiredCredentialProvider,
            "us-east-1",
            crate::NoopHttpSend,
        );

        let err = client.send(request()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialExpired);
    }

    #[tokio::test]
    async fn test_request_without_authority_is_invalid() {
        let client = SigningHttpClient::for_neptune(
            Context::new(),
            provider(),
            "us-east-1",
            crate::NoopHttpSend,
        );

        let req = http::Request::builder()
            .method(Method::GET)
            .uri("/sparql")
            .body(Bytes::new())
            .expect("request must build");

        let err = client.send(req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[tokio::test]
    async fn test_with_defaults_requires_region() {
        let ctx = Context::new().with_env(crate::StaticEnv::default());

        let err = SigningHttpClient::with_defaults(ctx, provider(), crate::NoopHttpSend)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[tokio::test]
    async fn test_with_defaults_resolves_from_env() {
        use crate::constants::{AWS_NEPTUNE_SERVICE_NAME, AWS_REGION};
        use std::collections::HashMap;

        let ctx = Context::new().with_env(crate::StaticEnv {
            home_dir: None,
            envs: HashMap::from([
                (AWS_REGION.to_string(), "eu-west-1".to_string()),
                (
                    AWS_NEPTUNE_SERVICE_NAME.to_string(),
                    "neptune-graph".to_string(),
                ),
            ]),
        });

        let client = SigningHttpClient::with_defaults(ctx, provider(), crate::NoopHttpSend)
            .await
            .expect("construction must succeed");
        assert_eq!(client.service(), "neptune-graph");
        assert_eq!(client.region(), "eu-west-1");
    }
}
