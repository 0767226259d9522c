use crate::constants::{QUERY_ENCODE_SET, URI_ENCODE_SET, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN};
use crate::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use crate::request::SigningRequest;
use crate::time::{format_date, format_iso8601, now, DateTime};
use crate::{Credential, Error, Result};
use http::request::Parts;
use http::{header, HeaderValue};
use log::debug;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use std::fmt::Write;

/// RequestSigner implements AWS SigV4 header signing for a fixed
/// service/region pair.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// Signing is deterministic: a fixed request, credential, and timestamp
/// always produce the same authorization value. Nothing is cached between
/// calls; every signature is computed from scratch.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    service: String,
    region: String,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new SigV4 signer.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),

            time: None,
        }
    }

    /// The service name this signer scopes signatures to.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The region this signer scopes signatures to.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub(crate) fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign the request parts, merging `authorization`, `x-amz-date`, and
    /// (for temporary credentials) `x-amz-security-token` into its headers.
    ///
    /// `payload_hash` must be the hex SHA256 of the exact body bytes that
    /// will be transmitted; for a body-less request pass
    /// [`crate::hash::EMPTY_PAYLOAD_SHA256`]. The timestamp is taken once
    /// and used for both the date header and the credential scope.
    pub fn sign(&self, parts: &mut Parts, cred: &Credential, payload_hash: &str) -> Result<()> {
        let now = self.time.unwrap_or_else(now);
        let mut signed_req = SigningRequest::build(parts)?;

        // canonicalize context
        canonicalize_headers(&mut signed_req, cred, now)?;
        canonicalize_query(&mut signed_req);

        // build canonical request and string to sign.
        let creq = canonical_request_string(&signed_req, payload_hash)?;
        debug!("calculated canonical request: {creq}");
        let encoded_req = hex_sha256(creq.as_bytes());

        // Scope: "20150830/<region>/<service>/aws4_request"
        let scope = format!(
            "{}/{}/{}/aws4_request",
            format_date(now),
            self.region,
            self.service
        );
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20150830T123600Z
        // 20150830/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "AWS4-HMAC-SHA256")?;
            writeln!(f, "{}", format_iso8601(now))?;
            writeln!(f, "{}", &scope)?;
            write!(f, "{}", &encoded_req)?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key =
            generate_signing_key(&cred.secret_access_key, now, &self.region, &self.service);
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let mut authorization = HeaderValue::from_str(&format!(
            "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
            cred.access_key_id,
            scope,
            signed_req.header_name_to_vec_sorted().join(";"),
            signature
        ))?;
        authorization.set_sensitive(true);

        signed_req
            .headers
            .insert(header::AUTHORIZATION, authorization);

        // Apply to the request.
        signed_req.apply(parts)
    }
}

fn canonical_request_string(ctx: &SigningRequest, payload_hash: &str) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    writeln!(f, "{}", ctx.method)?;

    // Insert encoded path
    let path = percent_decode_str(&ctx.path)
        .decode_utf8()
        .map_err(|e| Error::request_invalid("request path is not valid utf-8").with_source(e))?;
    writeln!(f, "{}", utf8_percent_encode(&path, &URI_ENCODE_SET))?;

    // Insert query
    writeln!(
        f,
        "{}",
        ctx.query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    )?;

    // Insert canonical headers, duplicate values comma-joined in original order.
    let signed_headers = ctx.header_name_to_vec_sorted();
    for name in signed_headers.iter() {
        let value = ctx
            .headers
            .get_all(*name)
            .iter()
            .map(|v| v.to_str())
            .collect::<std::result::Result<Vec<_>, _>>()?
            .join(",");
        writeln!(f, "{name}:{value}")?;
    }
    writeln!(f)?;
    writeln!(f, "{}", signed_headers.join(";"))?;

    write!(f, "{payload_hash}")?;

    Ok(f)
}

fn canonicalize_headers(
    ctx: &mut SigningRequest,
    cred: &Credential,
    now: DateTime,
) -> Result<()> {
    // Header values are normalized according to Step 4 of https://docs.aws.amazon.com/general/latest/gr/sigv4-create-canonical-request.html
    for (_, value) in ctx.headers.iter_mut() {
        SigningRequest::header_value_normalize(value)
    }

    // Insert HOST header if not present.
    if ctx.headers.get(header::HOST).is_none() {
        ctx.headers.insert(
            header::HOST,
            ctx.authority.as_str().parse().map_err(|e| {
                Error::request_invalid("failed to parse authority as header value")
                    .with_source(anyhow::Error::new(e))
            })?,
        );
    }

    // The date header is owned by the signer; a pre-existing value would be
    // stale and is overwritten.
    ctx.headers
        .insert(X_AMZ_DATE, HeaderValue::try_from(format_iso8601(now))?);

    // The security token participates in the canonical request, so it must
    // land in the headers before the signature is computed.
    if let Some(token) = &cred.session_token {
        let mut value = HeaderValue::from_str(token)?;
        // Set token value sensitive to avoid leaking.
        value.set_sensitive(true);

        ctx.headers.insert(X_AMZ_SECURITY_TOKEN, value);
    }

    Ok(())
}

fn canonicalize_query(ctx: &mut SigningRequest) {
    if ctx.query.is_empty() {
        return;
    }

    // Re-encode with the SigV4 query set, then sort by encoded name and value.
    ctx.query = ctx
        .query
        .iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect();
    ctx.query.sort();
}

fn generate_signing_key(secret: &str, time: DateTime, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), "aws4_request".as_bytes())
}
