use bytes::Bytes;
use tracing::debug;

use crate::protocol::error::CodecResult;
use crate::protocol::request::{HeaderV2, ParsedRequest};
use crate::protocol::{ApiSupport, Response, ResponseMessage};

/// Decodes one request frame and produces the size-prefixed response frame for
/// it, if any. API keys without a handler yield `Ok(None)`: the request is
/// dropped without an answer and without failing the connection.
pub fn process(msg: &mut Bytes) -> CodecResult<Option<ResponseMessage>> {
    let header = HeaderV2::from_bytes(msg)?;
    let support = ApiSupport::resolve(header.request_api_key);
    debug!(
        api_key = header.request_api_key,
        api_version = header.request_api_version,
        correlation_id = header.correlation_id,
        client_id = header.client_id.as_deref().unwrap_or(""),
        valid_api_key = support.is_valid_api_key,
        "parsed request header"
    );

    let response: Box<dyn Response + Send> = match ParsedRequest::from_bytes(header, msg)? {
        ParsedRequest::ApiVersions(req) => Box::new(req.process(&support)),
        ParsedRequest::DescribeTopicPartitions(req) => Box::new(req.process()),
        ParsedRequest::Unhandled { header } => {
            debug!(api_key = header.request_api_key, "no handler, dropping request");
            return Ok(None);
        }
    };

    Ok(Some(ResponseMessage::from_bytes(response.as_bytes())))
}

#[cfg(test)]
mod tests {
    use bytes::{BufMut, BytesMut};

    use crate::protocol::types::CompactString;

    use super::*;

    fn frame(api_key: i16, api_version: i16, correlation_id: i32, body: &[u8]) -> Bytes {
        let mut buf = BytesMut::new();
        buf.put_i16(api_key);
        buf.put_i16(api_version);
        buf.put_i32(correlation_id);
        buf.put_i16(1);
        buf.put_u8(b'x'); // client id
        buf.put_u8(0); // tag buffer
        buf.put(body);
        buf.freeze()
    }

    fn describe_topics_body(topics: &[&str]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        buf.put_u8(topics.len() as u8 + 1);
        for name in topics {
            buf.put(CompactString::serialize(name));
            buf.put_u8(0);
        }
        buf.put_i32(1);
        buf.put_u8(0xFF);
        buf.put_u8(0);
        buf.to_vec()
    }

    #[test]
    fn api_versions_request_roundtrip() {
        let mut msg = frame(18, 4, 7, &[]);
        let resp = process(&mut msg).unwrap().expect("a response");
        let bytes = resp.as_bytes();

        let prefix = i32::from_be_bytes(bytes[..4].try_into().unwrap());
        assert_eq!(prefix as usize, bytes.len() - 4);
        assert_eq!(&bytes[4..8], [0, 0, 0, 7]); // correlation_id echoed
        assert_eq!(&bytes[8..10], [0, 0]); // error_code: 0
    }

    #[test]
    fn api_versions_out_of_range_version_reports_code_35() {
        let mut msg = frame(18, 99, 7, &[]);
        let resp = process(&mut msg).unwrap().expect("a response");
        assert_eq!(&resp.as_bytes()[8..10], [0, 35]);
    }

    #[test]
    fn describe_topic_partitions_echoes_topics_as_unknown() {
        let mut msg = frame(75, 0, 9, &describe_topics_body(&["foo", "bar"]));
        let resp = process(&mut msg).unwrap().expect("a response");
        let bytes = resp.as_bytes();

        assert_eq!(&bytes[4..8], [0, 0, 0, 9]); // correlation_id
        assert_eq!(bytes[13], 3); // two topics, encoded as N+1
        assert_eq!(&bytes[14..16], [0, 3]); // first topic: UNKNOWN_TOPIC_OR_PARTITION
        assert_eq!(&bytes[17..20], *b"foo");
        assert_eq!(bytes[bytes.len() - 2], 0xFF); // null next_cursor
    }

    #[test]
    fn unregistered_api_key_gets_no_response() {
        let mut msg = frame(999, 0, 1, &[]);
        assert!(process(&mut msg).unwrap().is_none());
    }

    #[test]
    fn truncated_frame_is_an_error() {
        let mut msg = Bytes::copy_from_slice(&[0x00, 0x12]);
        assert!(process(&mut msg).is_err());
    }
}
