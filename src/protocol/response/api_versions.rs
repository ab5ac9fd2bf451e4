use bytes::{BufMut, BytesMut};

use crate::protocol::{ApiVersionRange, ErrorCode, Response};

use super::HeaderV0;

// The ApiVersions response uses the "v0" header format: correlation_id only,
// no tag buffer.
// https://kafka.apache.org/protocol.html#The_Messages_ApiVersions
pub struct ApiVersionsResponseV4 {
    header: HeaderV0,
    error_code: ErrorCode,
    api_keys_vec: Vec<ApiVersionRange>,
    throttle_time_ms: i32,
    bytes: BytesMut,
}

impl ApiVersionsResponseV4 {
    pub fn new(correlation_id: i32, error_code: ErrorCode, api_keys_vec: Vec<ApiVersionRange>) -> Self {
        let header = HeaderV0::new(correlation_id);

        let mut resp = Self {
            header,
            error_code,
            api_keys_vec,
            throttle_time_ms: 0,
            bytes: BytesMut::new(),
        };

        resp.serialize();
        resp
    }

    /// Fills the internal `bytes` field with byte representation of the response
    // https://kafka.apache.org/protocol.html#The_Messages_ApiVersions
    fn serialize(&mut self) {
        // HEADER v0
        self.bytes.put_i32(self.header.correlation_id);

        // BODY
        self.bytes.put_i16(self.error_code.into());

        // COMPACT_ARRAY: N+1, because null array is represented as 0, empty array (actual length of 0) is represented as 1
        let num_api_keys = self.api_keys_vec.len() as u8 + 1;
        self.bytes.put_u8(num_api_keys);

        for item in self.api_keys_vec.iter() {
            self.bytes.put_i16(item.api_key);
            self.bytes.put_i16(item.min_version);
            self.bytes.put_i16(item.max_version);
            self.bytes.put_u8(0); // _tagged_fields
        }

        self.bytes.put_u8(0); // _tagged_fields
        self.bytes.put_i32(self.throttle_time_ms);
    }
}

impl Response for ApiVersionsResponseV4 {
    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use crate::protocol::{advertised_apis, ApiSupport};

    use super::*;

    fn build(api_version: i16) -> ApiVersionsResponseV4 {
        let support = ApiSupport::resolve(18);
        ApiVersionsResponseV4::new(7, support.error_code(api_version), advertised_apis(18))
    }

    #[test]
    fn supported_version_encodes_no_error() {
        let resp = build(4);
        let expected = [
            0, 0, 0, 7, // correlation_id
            0, 0, // error_code: 0
            3, // api key count + 1
            0, 18, 0, 0, 0, 4, 0, // ApiVersions 0..4, tag buffer
            0, 75, 0, 0, 0, 4, 0, // DescribeTopicPartitions 0..4, tag buffer
            0, // tag buffer
            0, 0, 0, 0, // throttle_time_ms
        ];
        assert_eq!(resp.as_bytes(), expected);
    }

    #[test]
    fn out_of_range_version_keeps_advertised_entries() {
        let ok = build(4);
        let bad = build(99);
        // only the error_code bytes differ
        assert_eq!(&bad.as_bytes()[4..6], [0, 35]);
        assert_eq!(&bad.as_bytes()[..4], &ok.as_bytes()[..4]);
        assert_eq!(&bad.as_bytes()[6..], &ok.as_bytes()[6..]);
    }

    #[test]
    fn requesting_describe_topic_partitions_advertises_a_single_entry() {
        let support = ApiSupport::resolve(75);
        let resp = ApiVersionsResponseV4::new(1, support.error_code(0), advertised_apis(75));
        assert_eq!(resp.as_bytes()[6], 2); // one entry, encoded as N+1
        assert_eq!(&resp.as_bytes()[7..9], [0, 75]);
    }

    #[test]
    fn building_twice_is_byte_identical() {
        assert_eq!(build(4).as_bytes(), build(4).as_bytes());
    }
}
