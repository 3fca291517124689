//! `DNSPod` TC3-HMAC-SHA256 签名

use chrono::DateTime;

use crate::error::{ProviderError, Result};
use crate::providers::common::{hmac_sha256, sha256_hex};

use super::{DNSPOD_SERVICE, DnspodProvider, JSON_CONTENT_TYPE};

pub(crate) const TC3_ALGORITHM: &str = "TC3-HMAC-SHA256";
/// 只签 content-type 与 host。X-TC-* 头在签名之后附加，不能出现在规范串里
pub(crate) const TC3_SIGNED_HEADERS: &str = "content-type;host";

impl DnspodProvider {
    /// 生成 TC3-HMAC-SHA256 Authorization 值
    /// 参考: <https://cloud.tencent.com/document/api/1427/56189>
    pub(crate) fn sign(&self, payload: &str, timestamp: i64) -> Result<String> {
        // 凭证范围中的日期取同一时间戳的 UTC 日期
        let date = DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| ProviderError::InvalidParameter {
                provider: "tencent".to_string(),
                param: "timestamp".to_string(),
                detail: format!("{timestamp} is out of range"),
            })?
            .format("%Y-%m-%d")
            .to_string();

        // 1. 规范请求串
        let canonical_headers = format!("content-type:{JSON_CONTENT_TYPE}\nhost:{}\n", self.host);
        let canonical_request = format!(
            "POST\n/\n\n{canonical_headers}\n{TC3_SIGNED_HEADERS}\n{}",
            sha256_hex(payload.as_bytes())
        );
        log::trace!("CanonicalRequest:\n{canonical_request}");

        // 2. 待签名字符串
        let credential_scope = format!("{date}/{DNSPOD_SERVICE}/tc3_request");
        let string_to_sign = format!(
            "{TC3_ALGORITHM}\n{timestamp}\n{credential_scope}\n{}",
            sha256_hex(canonical_request.as_bytes())
        );

        // 3. 派生密钥并签名
        let k_date = hmac_sha256(
            "tencent",
            format!("TC3{}", self.secret_key).as_bytes(),
            date.as_bytes(),
        )?;
        let k_service = hmac_sha256("tencent", &k_date, DNSPOD_SERVICE.as_bytes())?;
        let k_signing = hmac_sha256("tencent", &k_service, b"tc3_request")?;
        let signature = hex::encode(hmac_sha256(
            "tencent",
            &k_signing,
            string_to_sign.as_bytes(),
        )?);

        Ok(format!(
            "{TC3_ALGORITHM} Credential={}/{credential_scope}, SignedHeaders={TC3_SIGNED_HEADERS}, Signature={signature}",
            self.secret_id
        ))
    }
}
