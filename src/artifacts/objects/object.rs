use crate::artifacts::objects::object_id::CommitId;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;

/// Storage encoding of an object
pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    /// Bytes the object id is derived from.
    ///
    /// Must be a pure function of the object's content: the id itself is not
    /// part of it.
    fn canonical_bytes(&self) -> Result<Bytes>;

    fn display(&self) -> String;

    fn object_id(&self) -> Result<CommitId> {
        let content = self.canonical_bytes()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        CommitId::from_digest(&hasher.finalize())
    }
}
