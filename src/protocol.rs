pub mod error;
pub mod request;
pub mod response;
pub mod types;

use bytes::{BufMut, BytesMut};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// https://kafka.apache.org/protocol.html#protocol_api_keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(i16)]
pub enum ApiKey {
    ApiVersions = 18,
    DescribeTopicPartitions = 75,
}

/// https://kafka.apache.org/protocol.html#protocol_error_codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(i16)]
pub enum ErrorCode {
    None = 0,
    UnknownTopicOrPartition = 3,
    UnsupportedVersion = 35,
}

/// One row of the supported-API table: an API key and the inclusive version
/// range this broker accepts for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiVersionRange {
    pub api_key: i16,
    pub min_version: i16,
    pub max_version: i16,
}

impl ApiVersionRange {
    const fn new(api_key: i16, min_version: i16, max_version: i16) -> Self {
        Self {
            api_key,
            min_version,
            max_version,
        }
    }
}

/// Fixed table of APIs this broker answers for, defined once for the process
/// lifetime. Read-only after startup, safe to consult from any task.
pub const SUPPORTED_APIS: &[ApiVersionRange] = &[
    ApiVersionRange::new(0, 0, 4),  // Produce
    ApiVersionRange::new(1, 0, 4),  // Fetch
    ApiVersionRange::new(2, 0, 4),  // ListOffsets
    ApiVersionRange::new(3, 0, 4),  // Metadata
    ApiVersionRange::new(4, 0, 4),  // LeaderAndIsr
    ApiVersionRange::new(5, 0, 4),  // StopReplica
    ApiVersionRange::new(6, 0, 4),  // UpdateMetadata
    ApiVersionRange::new(7, 0, 4),  // ControlledShutdown
    ApiVersionRange::new(8, 0, 4),  // OffsetCommit
    ApiVersionRange::new(9, 0, 4),  // OffsetFetch
    ApiVersionRange::new(10, 0, 4), // FindCoordinator
    ApiVersionRange::new(11, 0, 4), // JoinGroup
    ApiVersionRange::new(12, 0, 4), // Heartbeat
    ApiVersionRange::new(13, 0, 4), // LeaveGroup
    ApiVersionRange::new(14, 0, 4), // SyncGroup
    ApiVersionRange::new(15, 0, 4), // DescribeGroups
    ApiVersionRange::new(16, 0, 4), // ListGroups
    ApiVersionRange::new(17, 0, 4), // SaslHandshake
    ApiVersionRange::new(18, 0, 4), // ApiVersions
    ApiVersionRange::new(75, 0, 4), // DescribeTopicPartitions
];

pub fn lookup_api(api_key: i16) -> Option<&'static ApiVersionRange> {
    SUPPORTED_APIS.iter().find(|api| api.api_key == api_key)
}

/// Whether a request's API key is registered, and which version range applies.
/// Resolved once right after the header is parsed and carried alongside it;
/// "key not registered" is distinct from "key registered, version out of range".
#[derive(Debug, Clone, Copy)]
pub struct ApiSupport {
    pub is_valid_api_key: bool,
    pub min_version: i16,
    pub max_version: i16,
}

impl ApiSupport {
    pub fn resolve(api_key: i16) -> Self {
        match lookup_api(api_key) {
            Some(api) => Self {
                is_valid_api_key: true,
                min_version: api.min_version,
                max_version: api.max_version,
            },
            None => Self {
                is_valid_api_key: false,
                min_version: 0,
                max_version: 0,
            },
        }
    }

    pub fn error_code(&self, request_api_version: i16) -> ErrorCode {
        if self.is_valid_api_key
            && (self.min_version..=self.max_version).contains(&request_api_version)
        {
            ErrorCode::None
        } else {
            ErrorCode::UnsupportedVersion
        }
    }
}

/// Advertisement policy for the ApiVersions response: the row matching the
/// requested API key (when registered) plus the DescribeTopicPartitions row.
/// At most two rows; exactly one when the requested key is 75 itself.
pub fn advertised_apis(request_api_key: i16) -> Vec<ApiVersionRange> {
    SUPPORTED_APIS
        .iter()
        .filter(|api| {
            api.api_key == request_api_key
                || api.api_key == i16::from(ApiKey::DescribeTopicPartitions)
        })
        .copied()
        .collect()
}

/// Response Message is a wrapper around API response with prepended message size
// https://kafka.apache.org/protocol.html#protocol_common
pub struct ResponseMessage {
    bytes: BytesMut,
}

impl ResponseMessage {
    /// Calculates the size of the source API response and prepends it to the response
    pub fn from_bytes(src: &[u8]) -> Self {
        let mut bytes = BytesMut::with_capacity(src.len() + 4);

        let msg_size = 0; // placeholder; will be counted later
        bytes.put_i32(msg_size);

        bytes.extend_from_slice(src);

        let resp_size = bytes.len() as i32 - 4;

        let msg_size_ref = bytes
            .first_chunk_mut::<4>()
            .expect("message size element is present in response header");
        *msg_size_ref = (resp_size).to_be_bytes();

        Self { bytes }
    }
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

pub trait Response {
    fn as_bytes(&self) -> &[u8];
}
