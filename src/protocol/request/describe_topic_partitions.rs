use bytes::Bytes;

use crate::protocol::error::CodecResult;
use crate::protocol::response::describe_topic_partitions::{
    DescribeTopicPartitionsResponseV0, Topic,
};
use crate::protocol::types::{BufExt, CompactArray, CompactString};

use super::HeaderV2;

#[derive(Debug)]
#[allow(dead_code)]
pub struct DescribeTopicPartitionsRequestV0 {
    pub header: HeaderV2,
    pub topics: Vec<String>,
    response_partition_limit: i32,
    cursor: u8,
}

impl DescribeTopicPartitionsRequestV0 {
    // https://kafka.apache.org/protocol.html#The_Messages_DescribeTopicPartitions
    pub fn from_bytes(header: HeaderV2, src: &mut Bytes) -> CodecResult<Self> {
        let topics = CompactArray::deserialize::<_, CompactString>(src)?;

        // Consumed to reach the end of the request; unused until pagination exists.
        let response_partition_limit = src.try_get_i32("response_partition_limit")?;
        let cursor = src.try_get_u8("cursor")?; // 0xff denotes a null cursor
        _ = src.try_get_u8("request tag buffer")?;

        Ok(Self {
            header,
            topics,
            response_partition_limit,
            cursor,
        })
    }

    pub fn process(self) -> DescribeTopicPartitionsResponseV0 {
        let topics = self.topics.into_iter().map(Topic::unknown).collect();
        DescribeTopicPartitionsResponseV0::new(self.header.correlation_id, topics)
    }
}

#[cfg(test)]
mod tests {
    use bytes::{BufMut, BytesMut};

    use crate::protocol::error::CodecError;
    use crate::protocol::types::CompactString;

    use super::*;

    fn header() -> HeaderV2 {
        HeaderV2 {
            request_api_key: 75,
            request_api_version: 0,
            correlation_id: 11,
            client_id: Some("adminclient-1".into()),
        }
    }

    fn body_bytes(topics: &[&str]) -> Bytes {
        let mut buf = BytesMut::new();
        buf.put_u8(topics.len() as u8 + 1);
        for name in topics {
            buf.put(CompactString::serialize(name));
            buf.put_u8(0); // tag buffer
        }
        buf.put_i32(100); // response_partition_limit
        buf.put_u8(0xFF); // null cursor
        buf.put_u8(0); // tag buffer
        buf.freeze()
    }

    #[test]
    fn topic_names_keep_request_order_and_duplicates() {
        let mut src = body_bytes(&["foo", "bar", "foo"]);
        let req = DescribeTopicPartitionsRequestV0::from_bytes(header(), &mut src).unwrap();
        assert_eq!(req.topics, vec!["foo", "bar", "foo"]);
        assert!(src.is_empty());
    }

    #[test]
    fn body_missing_trailing_fields_is_malformed() {
        let mut buf = BytesMut::new();
        buf.put_u8(2);
        buf.put(CompactString::serialize("foo"));
        buf.put_u8(0);
        // response_partition_limit and cursor absent
        let mut src = buf.freeze();

        let err = DescribeTopicPartitionsRequestV0::from_bytes(header(), &mut src).unwrap_err();
        assert_eq!(err, CodecError::Truncated("response_partition_limit"));
    }
}
