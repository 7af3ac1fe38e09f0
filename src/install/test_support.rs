//! In-memory transport and archive builders shared by unit tests.

use crate::install::transport::{ByteStream, Transport};
use crate::InstallError;
use async_trait::async_trait;
use bytes::Bytes;
use flate2::write::GzEncoder;
use flate2::Compression;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Split `data` into chunks of `chunk_size` and serve them as a body stream.
pub(crate) fn stream_of(data: Vec<u8>, chunk_size: usize) -> ByteStream {
    let chunks: Vec<std::io::Result<Bytes>> = data
        .chunks(chunk_size.max(1))
        .map(|c| Ok(Bytes::copy_from_slice(c)))
        .collect();
    stream::iter(chunks).boxed()
}

/// Build a gzip-compressed tarball of regular files.
pub(crate) fn gzip_tar(files: &[(&str, &[u8])]) -> Vec<u8> {
    gzip_tar_with_links(files, &[])
}

/// Like [`gzip_tar`], followed by link entries `(path, link target, kind)`.
pub(crate) fn gzip_tar_with_links(
    files: &[(&str, &[u8])],
    links: &[(&str, &str, tar::EntryType)],
) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (path, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, path, *data).unwrap();
    }
    for (path, target, kind) in links {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(*kind);
        header.set_size(0);
        header.set_mode(0o777);
        builder.append_link(&mut header, path, target).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

/// Deterministic incompressible bytes.
pub(crate) fn pseudo_random_bytes(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x2545_f491;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

enum Reply {
    Body(Vec<u8>),
    Fail(String),
}

/// Transport serving canned bodies and recording every requested URL.
#[derive(Clone, Default)]
pub(crate) struct FakeTransport {
    replies: Arc<Mutex<HashMap<String, Arc<Reply>>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_body(self, url: &str, body: Vec<u8>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(url.to_string(), Arc::new(Reply::Body(body)));
        self
    }

    pub(crate) fn with_failure(self, url: &str, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(url.to_string(), Arc::new(Reply::Fail(message.to_string())));
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> Result<ByteStream, InstallError> {
        self.requests.lock().unwrap().push(url.to_string());
        let reply = self.replies.lock().unwrap().get(url).cloned();
        match reply.as_deref() {
            Some(Reply::Body(body)) => Ok(stream_of(body.clone(), 4096)),
            Some(Reply::Fail(message)) => Err(InstallError::network(url, message.clone())),
            None => Err(InstallError::network(url, "HTTP 404 Not Found")),
        }
    }
}
