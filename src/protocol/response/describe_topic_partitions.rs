use bytes::{BufMut, BytesMut};

use crate::protocol::types::CompactString;
use crate::protocol::{ErrorCode, Response};

use super::HeaderV1;

/// The all-zero UUID, reported for topics this broker has no metadata for.
pub const NIL_TOPIC_ID: [u8; 16] = [0; 16];

pub struct DescribeTopicPartitionsResponseV0 {
    header: HeaderV1,
    throttle_time_ms: i32,
    topics: Vec<Topic>,
    next_cursor: u8,
    bytes: BytesMut,
}

impl DescribeTopicPartitionsResponseV0 {
    pub fn new(correlation_id: i32, topics: Vec<Topic>) -> Self {
        let header = HeaderV1::new(correlation_id);

        let mut resp = Self {
            header,
            throttle_time_ms: 0,
            topics,
            next_cursor: 0xFF, // -1 as INT8: null cursor
            bytes: BytesMut::new(),
        };

        resp.serialize();
        resp
    }

    /// Fills the internal `bytes` field with byte representation of the response
    // https://kafka.apache.org/protocol.html#The_Messages_DescribeTopicPartitions
    fn serialize(&mut self) {
        // HEADER v1
        self.bytes.put_i32(self.header.correlation_id);
        self.bytes.put_u8(self.header.tag_buffer);

        // BODY
        self.bytes.put_i32(self.throttle_time_ms);

        // topics: COMPACT_ARRAY, N+1 because null array is represented as 0
        let num_topics = self.topics.len() as u8 + 1;
        self.bytes.put_u8(num_topics);

        for item in self.topics.iter() {
            self.bytes.put_i16(item.error_code.into());
            self.bytes.put(CompactString::serialize(&item.name));
            self.bytes.put(&item.topic_id[..]);
            self.bytes.put_u8(item.is_internal.into());

            // partitions: empty COMPACT_ARRAY
            let num_partitions = item.partitions.len() as u8 + 1;
            self.bytes.put_u8(num_partitions);

            self.bytes.put_i32(item.topic_authorized_operations);
            self.bytes.put_u8(0); // tag buffer
        }

        self.bytes.put_u8(self.next_cursor);
        self.bytes.put_u8(0); // tag buffer
    }
}

impl Response for DescribeTopicPartitionsResponseV0 {
    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

pub struct Topic {
    pub error_code: ErrorCode,
    pub name: String,      // COMPACT_NULLABLE_STRING
    pub topic_id: [u8; 16], // UUID
    pub is_internal: bool,
    pub partitions: Vec<Partition>,
    pub topic_authorized_operations: i32, // A 4-byte integer (bitfield) representing the authorized operations for this topic.
}

impl Topic {
    /// Every described topic is reported unknown: there is no topic metadata
    /// store behind this broker yet. Swapping this constructor for a real
    /// lookup is the extension point.
    pub fn unknown(name: String) -> Self {
        Self {
            error_code: ErrorCode::UnknownTopicOrPartition,
            name,
            topic_id: NIL_TOPIC_ID,
            is_internal: false,
            partitions: Vec::new(),
            topic_authorized_operations: 0,
        }
    }
}

pub struct Partition;
