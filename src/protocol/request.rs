pub mod api_versions;
pub mod describe_topic_partitions;

use bytes::Bytes;

use self::api_versions::ApiVersionsRequest;
use self::describe_topic_partitions::DescribeTopicPartitionsRequestV0;
use super::error::CodecResult;
use super::types::{BufExt, NullableString};
use super::ApiKey;

/// Request Header v2
// https://kafka.apache.org/protocol.html#protocol_messages
#[derive(Debug)]
pub struct HeaderV2 {
    pub request_api_key: i16,
    pub request_api_version: i16,
    pub correlation_id: i32,
    pub client_id: Option<String>,
}

impl HeaderV2 {
    /// Decodes the common header and leaves `src` positioned at the start of
    /// the API-specific body.
    pub fn from_bytes(src: &mut Bytes) -> CodecResult<Self> {
        let request_api_key = src.try_get_i16("request_api_key")?; // https://kafka.apache.org/protocol.html#protocol_api_keys
        let request_api_version = src.try_get_i16("request_api_version")?;
        let correlation_id = src.try_get_i32("correlation_id")?;
        let client_id = NullableString::deserialize(src)?;

        // Optional tagged fields (KIP-482); always a single 0x00 byte here.
        _ = src.try_get_u8("header tag buffer")?;

        Ok(Self {
            request_api_key,
            request_api_version,
            correlation_id,
            client_id,
        })
    }
}

/// A request decoded as far as this broker understands it. API keys without a
/// handler are carried through as `Unhandled` so the dispatcher can drop them
/// explicitly instead of failing.
#[derive(Debug)]
pub enum ParsedRequest {
    ApiVersions(ApiVersionsRequest),
    DescribeTopicPartitions(DescribeTopicPartitionsRequestV0),
    Unhandled { header: HeaderV2 },
}

impl ParsedRequest {
    pub fn from_bytes(header: HeaderV2, src: &mut Bytes) -> CodecResult<Self> {
        match ApiKey::try_from(header.request_api_key) {
            Ok(ApiKey::ApiVersions) => {
                Ok(Self::ApiVersions(ApiVersionsRequest::from_bytes(header, src)?))
            }
            Ok(ApiKey::DescribeTopicPartitions) => Ok(Self::DescribeTopicPartitions(
                DescribeTopicPartitionsRequestV0::from_bytes(header, src)?,
            )),
            Err(_) => Ok(Self::Unhandled { header }),
        }
    }
}
