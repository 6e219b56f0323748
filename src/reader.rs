use bytes::Bytes;

use crate::context::Value;
use crate::error::ReadError;
use crate::file::{File, LoadEvent};
use crate::options::ReadStrategy;
use crate::utils::{binary_string, data_url, decode_text};

/// Single-use reader for one file. Every read gets its own instance so
/// overlapping reads never share state.
#[derive(Debug)]
struct ContentReader<'a> {
    file: &'a File,
    strategy: ReadStrategy,
}

impl<'a> ContentReader<'a> {
    fn new(file: &'a File, strategy: ReadStrategy) -> Self {
        Self { file, strategy }
    }

    async fn read(self) -> Result<Value, ReadError> {
        match self.file.load().await {
            LoadEvent::Loaded(Some(bytes)) => Ok(self.decode(bytes)),
            LoadEvent::Loaded(None) => Err(ReadError::NotLoaded),
            LoadEvent::Aborted => Err(ReadError::Aborted),
            LoadEvent::Errored => Err(ReadError::Errored),
        }
    }

    fn decode(&self, bytes: Bytes) -> Value {
        match self.strategy {
            ReadStrategy::ArrayBuffer => Value::Bytes(bytes),
            ReadStrategy::BinaryString => Value::Text(binary_string(&bytes)),
            ReadStrategy::DataUrl => Value::Text(data_url(self.file.mime_type(), &bytes)),
            ReadStrategy::Text => Value::Text(decode_text(&bytes)),
        }
    }
}

/// Reads and decodes the payload of `file`.
pub async fn read_file(file: &File, strategy: ReadStrategy) -> Result<Value, ReadError> {
    ContentReader::new(file, strategy).read().await
}
