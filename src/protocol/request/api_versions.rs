use bytes::Bytes;

use crate::protocol::error::CodecResult;
use crate::protocol::response::api_versions::ApiVersionsResponseV4;
use crate::protocol::{advertised_apis, ApiSupport};

use super::HeaderV2;

/// ApiVersions carries no body beyond the common header.
#[derive(Debug)]
pub struct ApiVersionsRequest {
    header: HeaderV2,
}

impl ApiVersionsRequest {
    // https://kafka.apache.org/protocol.html#The_Messages_ApiVersions
    pub fn from_bytes(header: HeaderV2, _src: &mut Bytes) -> CodecResult<Self> {
        Ok(Self { header })
    }

    pub fn process(self, support: &ApiSupport) -> ApiVersionsResponseV4 {
        let error_code = support.error_code(self.header.request_api_version);
        let api_keys = advertised_apis(self.header.request_api_key);
        ApiVersionsResponseV4::new(self.header.correlation_id, error_code, api_keys)
    }
}
