//! 阿里云 ACS3-HMAC-SHA256 签名

use std::collections::BTreeMap;

use crate::error::Result;
use crate::providers::common::{hmac_sha256, sha256_hex};

use super::{ALIYUN_DNS_VERSION, AliyunProvider, FORM_CONTENT_TYPE};

pub(crate) const ACS3_ALGORITHM: &str = "ACS3-HMAC-SHA256";

/// 签名结果：参与签名的请求头（小写、有序）与 Authorization 值
pub(crate) struct AcsSignature {
    pub headers: BTreeMap<&'static str, String>,
    pub authorization: String,
}

impl AliyunProvider {
    /// 生成 ACS3-HMAC-SHA256 签名
    /// 参考: <https://www.alibabacloud.com/help/zh/sdk/product-overview/v3-request-structure-and-signature>
    pub(crate) fn sign(
        &self,
        action: &str,
        body: &str,
        timestamp: &str,
        nonce: &str,
    ) -> Result<AcsSignature> {
        let body_hash = sha256_hex(body.as_bytes());

        // BTreeMap 保证按小写名称排序
        let headers = BTreeMap::from([
            ("content-type", FORM_CONTENT_TYPE.to_string()),
            ("host", self.host.clone()),
            ("x-acs-action", action.to_string()),
            ("x-acs-content-sha256", body_hash.clone()),
            ("x-acs-date", timestamp.to_string()),
            ("x-acs-signature-nonce", nonce.to_string()),
            ("x-acs-version", ALIYUN_DNS_VERSION.to_string()),
        ]);

        let canonical_headers: String = headers
            .iter()
            .map(|(name, value)| format!("{name}:{}\n", value.trim()))
            .collect();
        let signed_headers = headers.keys().copied().collect::<Vec<_>>().join(";");

        // 方法 / 路径 / 空查询串 / 头 / 签名头列表 / body 哈希
        let canonical_request =
            format!("POST\n/\n\n{canonical_headers}\n{signed_headers}\n{body_hash}");
        log::trace!("CanonicalRequest:\n{canonical_request}");

        let string_to_sign = format!(
            "{ACS3_ALGORITHM}\n{}",
            sha256_hex(canonical_request.as_bytes())
        );

        let signature = hex::encode(hmac_sha256(
            "ali",
            self.access_key_secret.as_bytes(),
            string_to_sign.as_bytes(),
        )?);

        Ok(AcsSignature {
            authorization: format!(
                "{ACS3_ALGORITHM} Credential={},SignedHeaders={signed_headers},Signature={signature}",
                self.access_key_id
            ),
            headers,
        })
    }
}
