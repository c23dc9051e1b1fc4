use std::{fmt, str::FromStr};

use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Store-assigned blog identifier. Rendered externally as 24 lowercase hex chars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlogId(ObjectId);

impl BlogId {
    /// Fresh identifier, unique within this process.
    pub fn generate() -> Self { Self(ObjectId::new()) }

    pub fn parse(s: &str) -> Result<Self, ModelError> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| ModelError::InvalidId(s.to_string()))
    }

    pub fn to_hex(&self) -> String { self.0.to_hex() }

    pub fn as_object_id(&self) -> ObjectId { self.0 }

    /// `{ "_id": <oid> }`
    pub fn filter(&self) -> Document { doc! { "_id": self.0 } }
}

impl From<ObjectId> for BlogId {
    fn from(oid: ObjectId) -> Self { Self(oid) }
}

impl FromStr for BlogId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.to_hex()) }
}

/// Caller-supplied content of a blog post.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogFields {
    pub author_id: String,
    pub title: String,
    pub content: String,
}

/// A stored blog post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blog {
    pub id: BlogId,
    pub author_id: String,
    pub title: String,
    pub content: String,
}

impl Blog {
    pub fn new(id: BlogId, fields: BlogFields) -> Self {
        Self { id, author_id: fields.author_id, title: fields.title, content: fields.content }
    }
}

/// Persisted document layout. Field names are the storage contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlogItem {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub author_id: String,
    pub content: String,
    pub title: String,
}

impl From<&BlogFields> for BlogItem {
    fn from(f: &BlogFields) -> Self {
        Self { id: None, author_id: f.author_id.clone(), content: f.content.clone(), title: f.title.clone() }
    }
}

impl From<&Blog> for BlogItem {
    fn from(b: &Blog) -> Self {
        Self {
            id: Some(b.id.as_object_id()),
            author_id: b.author_id.clone(),
            content: b.content.clone(),
            title: b.title.clone(),
        }
    }
}

impl TryFrom<BlogItem> for Blog {
    type Error = ModelError;

    fn try_from(item: BlogItem) -> Result<Self, Self::Error> {
        let id = item.id.ok_or_else(|| ModelError::Decode("blog document without _id".into()))?;
        Ok(Blog { id: id.into(), author_id: item.author_id, title: item.title, content: item.content })
    }
}

/// Decode a raw stored document into a `Blog`.
pub fn decode_document(doc: Document) -> Result<Blog, ModelError> {
    let item: BlogItem = mongodb::bson::from_document(doc).map_err(|e| ModelError::Decode(e.to_string()))?;
    Blog::try_from(item)
}

/// Encode a `BlogItem` as a raw document.
pub fn encode_item(item: &BlogItem) -> Result<Document, ModelError> {
    mongodb::bson::to_document(item).map_err(|e| ModelError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    fn fields() -> BlogFields {
        BlogFields { author_id: "Omar".into(), title: "My First Blog".into(), content: "Content of the first blog".into() }
    }

    #[test]
    fn parse_accepts_24_hex_chars() {
        let id = BlogId::parse("62fcaacf410e7788bd475335").unwrap();
        assert_eq!(id.to_hex(), "62fcaacf410e7788bd475335");
        assert_eq!(id.to_string(), "62fcaacf410e7788bd475335");
    }

    #[test]
    fn parse_rejects_malformed_ids() {
        for bad in ["", "abc", "62fcaacf410e7788bd47533z", "62fcaacf410e7788bd4753351"] {
            match BlogId::parse(bad) {
                Err(ModelError::InvalidId(s)) => assert_eq!(s, bad),
                other => panic!("expected InvalidId for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn generated_ids_are_distinct() {
        let a = BlogId::generate();
        let b = BlogId::generate();
        assert_ne!(a, b);
        assert_eq!(a.to_hex().len(), 24);
    }

    #[test]
    fn new_item_serializes_without_id() {
        let doc = encode_item(&BlogItem::from(&fields())).unwrap();
        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("author_id").unwrap(), "Omar");
        assert_eq!(doc.get_str("title").unwrap(), "My First Blog");
        assert_eq!(doc.get_str("content").unwrap(), "Content of the first blog");
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn stored_item_uses_underscore_id() {
        let blog = Blog::new(BlogId::generate(), fields());
        let doc = encode_item(&BlogItem::from(&blog)).unwrap();
        assert_eq!(doc.get("_id"), Some(&Bson::ObjectId(blog.id.as_object_id())));
        assert_eq!(decode_document(doc).unwrap(), blog);
    }

    #[test]
    fn decode_rejects_wrong_field_types() {
        let doc = doc! { "_id": ObjectId::new(), "author_id": 42, "title": "t", "content": "c" };
        assert!(matches!(decode_document(doc), Err(ModelError::Decode(_))));
    }

    #[test]
    fn decode_rejects_missing_id() {
        let doc = doc! { "author_id": "a", "title": "t", "content": "c" };
        assert!(matches!(decode_document(doc), Err(ModelError::Decode(_))));
    }

    #[test]
    fn filter_targets_underscore_id() {
        let id = BlogId::generate();
        assert_eq!(id.filter(), doc! { "_id": id.as_object_id() });
    }
}
