//! Media descriptors and the conversions the clone path relies on.
//!
//! Two families live here: the descriptors a source message carries
//! ([`MessageMedia`] and its photo/document payloads) and the descriptors a
//! send request accepts ([`InputMedia`], [`InputFile`]). The clone path moves
//! between them either by reference copy (server-side id plus access hash) or
//! by staging bytes through the uploader ([`RemoteFile`]).

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageMedia {
    Photo {
        /// The server may answer with an empty photo; `None` models that.
        photo: Option<Photo>,
        spoiler: bool,
        ttl_seconds: Option<i32>,
    },
    Document {
        document: Option<Document>,
        spoiler: bool,
        ttl_seconds: Option<i32>,
    },
    WebPage {
        url: String,
    },
    Poll {
        question: String,
    },
    Contact {
        phone_number: String,
        first_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: i64,
    pub access_hash: i64,
    pub file_reference: Vec<u8>,
    pub sizes: Vec<PhotoSize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoSize {
    /// Single-letter server size type ("s", "m", "x", ...).
    pub kind: String,
    pub width: i32,
    pub height: i32,
    pub size: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: i64,
    pub access_hash: i64,
    pub file_reference: Vec<u8>,
    pub mime_type: String,
    pub size: i64,
    pub attributes: Vec<DocumentAttribute>,
    pub thumbs: Vec<PhotoSize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentAttribute {
    ImageSize {
        width: i32,
        height: i32,
    },
    Animated,
    Sticker {
        alt: String,
    },
    Video {
        duration: i32,
        width: i32,
        height: i32,
        round_message: bool,
        supports_streaming: bool,
    },
    Audio {
        duration: i32,
        voice: bool,
        title: Option<String>,
        performer: Option<String>,
    },
    Filename {
        file_name: String,
    },
}

/// Server-held bytes the uploader can stage: a file location plus the name
/// and size chunked uploads are planned around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub name: String,
    pub size: i64,
    pub location: FileLocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileLocation {
    Photo {
        id: i64,
        access_hash: i64,
        file_reference: Vec<u8>,
        thumb_size: String,
    },
    Document {
        id: i64,
        access_hash: i64,
        file_reference: Vec<u8>,
    },
    DocumentThumb {
        document_id: i64,
        access_hash: i64,
        file_reference: Vec<u8>,
        thumb_size: String,
    },
}

/// Media descriptor accepted by send requests: either a reference to a file
/// the server already holds, or a freshly uploaded one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMedia {
    Photo {
        id: i64,
        access_hash: i64,
        file_reference: Vec<u8>,
        spoiler: bool,
        ttl_seconds: Option<i32>,
    },
    Document {
        id: i64,
        access_hash: i64,
        file_reference: Vec<u8>,
        spoiler: bool,
        ttl_seconds: Option<i32>,
    },
    UploadedPhoto {
        file: InputFile,
        spoiler: bool,
        ttl_seconds: Option<i32>,
    },
    UploadedDocument {
        file: InputFile,
        thumb: InputFile,
        mime_type: String,
        attributes: Vec<DocumentAttribute>,
        spoiler: bool,
        ttl_seconds: Option<i32>,
    },
}

/// Handle to bytes staged through the uploader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub id: i64,
    pub parts: i32,
    pub name: String,
}

impl MessageMedia {
    pub fn kind(&self) -> &'static str {
        match self {
            MessageMedia::Photo { .. } => "photo",
            MessageMedia::Document { .. } => "document",
            MessageMedia::WebPage { .. } => "webpage",
            MessageMedia::Poll { .. } => "poll",
            MessageMedia::Contact { .. } => "contact",
        }
    }

    /// Reference-copy constructor: wraps the existing server-side descriptor
    /// as an input without touching the bytes. `None` when the media kind has
    /// no input form (polls, web pages, ...) or the descriptor is empty.
    pub fn reference_input(&self) -> Option<InputMedia> {
        match self {
            MessageMedia::Photo {
                photo: Some(photo),
                spoiler,
                ttl_seconds,
            } => Some(InputMedia::Photo {
                id: photo.id,
                access_hash: photo.access_hash,
                file_reference: photo.file_reference.clone(),
                spoiler: *spoiler,
                ttl_seconds: *ttl_seconds,
            }),
            MessageMedia::Document {
                document: Some(document),
                spoiler,
                ttl_seconds,
            } => Some(InputMedia::Document {
                id: document.id,
                access_hash: document.access_hash,
                file_reference: document.file_reference.clone(),
                spoiler: *spoiler,
                ttl_seconds: *ttl_seconds,
            }),
            _ => None,
        }
    }

    /// Largest representable source file for a re-upload, or `None` when the
    /// media carries nothing stageable.
    pub fn upload_source(&self) -> Option<RemoteFile> {
        match self {
            MessageMedia::Photo {
                photo: Some(photo), ..
            } => photo.largest_size().map(|size| RemoteFile {
                name: format!("{}.jpg", photo.id),
                size: size.size,
                location: FileLocation::Photo {
                    id: photo.id,
                    access_hash: photo.access_hash,
                    file_reference: photo.file_reference.clone(),
                    thumb_size: size.kind.clone(),
                },
            }),
            MessageMedia::Document {
                document: Some(document),
                ..
            } => Some(RemoteFile {
                name: document.file_name(),
                size: document.size,
                location: FileLocation::Document {
                    id: document.id,
                    access_hash: document.access_hash,
                    file_reference: document.file_reference.clone(),
                },
            }),
            _ => None,
        }
    }
}

impl Photo {
    pub fn largest_size(&self) -> Option<&PhotoSize> {
        self.sizes.iter().max_by_key(|size| size.size)
    }
}

impl Document {
    /// Filename attribute when present, otherwise a name derived from the id.
    pub fn file_name(&self) -> String {
        self.attributes
            .iter()
            .find_map(|attr| match attr {
                DocumentAttribute::Filename { file_name } => Some(file_name.clone()),
                _ => None,
            })
            .unwrap_or_else(|| format!("{}.bin", self.id))
    }

    /// Largest server-rendered thumbnail as a stageable file.
    pub fn thumb_source(&self) -> Option<RemoteFile> {
        self.thumbs.iter().max_by_key(|size| size.size).map(|thumb| RemoteFile {
            name: format!("{}_thumb.jpg", self.id),
            size: thumb.size,
            location: FileLocation::DocumentThumb {
                document_id: self.id,
                access_hash: self.access_hash,
                file_reference: self.file_reference.clone(),
                thumb_size: thumb.kind.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo_with_sizes(sizes: Vec<PhotoSize>) -> Photo {
        Photo {
            id: 200,
            access_hash: 4_000,
            file_reference: vec![1, 2],
            sizes,
        }
    }

    fn size(kind: &str, size: i64) -> PhotoSize {
        PhotoSize {
            kind: kind.to_owned(),
            width: 100,
            height: 100,
            size,
        }
    }

    #[test]
    fn largest_size_wins_by_byte_count() {
        let photo = photo_with_sizes(vec![size("s", 900), size("x", 64_000), size("m", 12_000)]);
        assert_eq!(photo.largest_size(), Some(&size("x", 64_000)));
    }

    #[test]
    fn photo_upload_source_points_at_largest_size() {
        let media = MessageMedia::Photo {
            photo: Some(photo_with_sizes(vec![size("s", 900), size("y", 80_000)])),
            spoiler: false,
            ttl_seconds: None,
        };

        let source = media.upload_source().expect("photo must be stageable");
        assert_eq!(source.name, "200.jpg");
        assert_eq!(source.size, 80_000);
        match source.location {
            FileLocation::Photo { thumb_size, .. } => assert_eq!(thumb_size, "y"),
            other => panic!("unexpected location {other:?}"),
        }
    }

    #[test]
    fn empty_photo_has_no_upload_source_and_no_reference_input() {
        let media = MessageMedia::Photo {
            photo: None,
            spoiler: false,
            ttl_seconds: None,
        };
        assert_eq!(media.upload_source(), None);
        assert_eq!(media.reference_input(), None);
    }

    #[test]
    fn reference_input_copies_id_hash_and_flags() {
        let media = MessageMedia::Photo {
            photo: Some(photo_with_sizes(vec![size("m", 5_000)])),
            spoiler: true,
            ttl_seconds: Some(30),
        };

        assert_eq!(
            media.reference_input(),
            Some(InputMedia::Photo {
                id: 200,
                access_hash: 4_000,
                file_reference: vec![1, 2],
                spoiler: true,
                ttl_seconds: Some(30),
            })
        );
    }

    #[test]
    fn poll_has_no_input_form() {
        let media = MessageMedia::Poll {
            question: "?".to_owned(),
        };
        assert_eq!(media.reference_input(), None);
        assert_eq!(media.upload_source(), None);
    }

    #[test]
    fn document_file_name_falls_back_to_id() {
        let named = Document {
            id: 9,
            access_hash: 1,
            file_reference: vec![],
            mime_type: "video/mp4".to_owned(),
            size: 10,
            attributes: vec![DocumentAttribute::Filename {
                file_name: "clip.mp4".to_owned(),
            }],
            thumbs: vec![],
        };
        assert_eq!(named.file_name(), "clip.mp4");

        let anonymous = Document {
            attributes: vec![],
            ..named
        };
        assert_eq!(anonymous.file_name(), "9.bin");
    }

    #[test]
    fn thumb_source_requires_a_rendered_thumb() {
        let document = Document {
            id: 9,
            access_hash: 1,
            file_reference: vec![7],
            mime_type: "video/mp4".to_owned(),
            size: 10,
            attributes: vec![],
            thumbs: vec![size("s", 320), size("m", 800)],
        };

        let thumb = document.thumb_source().expect("thumb must be stageable");
        assert_eq!(thumb.name, "9_thumb.jpg");
        assert_eq!(thumb.size, 800);

        let bare = Document {
            thumbs: vec![],
            ..document
        };
        assert_eq!(bare.thumb_source(), None);
    }
}
