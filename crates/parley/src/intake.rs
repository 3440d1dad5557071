//! Image intake pipeline.
//!
//! Two independent sources feed one outgoing turn: free-text lines of image
//! URLs, and locally selected files handed over by the picker boundary.
//! Both resolve into [`ImageAttachment`] so the request formatters can embed
//! them without caring where they came from.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use url::Url;

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp", ".svg"];

const DEFAULT_MEDIA_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentOrigin {
    RemoteUrl,
    LocalFile,
}

/// One resolved image for an outgoing turn. `data` is the URL itself for
/// remote attachments and the base64 payload for local ones; `preview` is
/// always directly renderable (the URL, or a data URI).
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAttachment {
    pub origin: AttachmentOrigin,
    pub media_type: String,
    pub data: String,
    pub preview: String,
}

impl ImageAttachment {
    fn remote(url: &str) -> Self {
        ImageAttachment {
            origin: AttachmentOrigin::RemoteUrl,
            media_type: media_type_for_path(url),
            data: url.to_string(),
            preview: url.to_string(),
        }
    }

    fn local(media_type: &str, bytes: &[u8]) -> Self {
        let encoded = BASE64.encode(bytes);
        let preview = format!("data:{};base64,{}", media_type, encoded);
        ImageAttachment {
            origin: AttachmentOrigin::LocalFile,
            media_type: media_type.to_string(),
            data: encoded,
            preview,
        }
    }
}

/// A selected file as delivered by the external picker: declared content
/// type plus full byte content. The pipeline only filters and encodes.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Inclusion policy for candidate image URLs.
///
/// Generic hosts are admitted wholesale; only the excluded host must prove
/// itself via an image extension or an "image"/"img" hint in the URL. The
/// exclusion exists to keep one site's non-image asset links out of the
/// gallery by default, and is configuration rather than a universal rule.
#[derive(Debug, Clone)]
pub struct UrlFilter {
    pub excluded_host: String,
}

impl Default for UrlFilter {
    fn default() -> Self {
        UrlFilter {
            excluded_host: "hdmall.co.th".to_string(),
        }
    }
}

impl UrlFilter {
    pub fn accepts(&self, line: &str) -> bool {
        let Ok(url) = Url::parse(line) else {
            return false;
        };
        let lowered = line.to_lowercase();

        let has_image_extension = IMAGE_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext));
        let has_image_hint = lowered.contains("image") || lowered.contains("img");
        let host_excluded = url
            .host_str()
            .is_some_and(|host| host.eq_ignore_ascii_case(&self.excluded_host));

        has_image_extension || has_image_hint || !host_excluded
    }
}

/// Resolve multi-line free text into remote attachments, one per qualifying
/// line. Lines that fail URL parsing or the filter are dropped without error.
pub fn extract_image_urls(text: &str, filter: &UrlFilter) -> Vec<ImageAttachment> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| filter.accepts(line))
        .map(ImageAttachment::remote)
        .collect()
}

/// Encode selected files into local attachments. Files whose declared
/// content type is not image/* are dropped without error; an undetectable
/// type falls back to image/jpeg.
pub fn encode_files(files: &[FileUpload]) -> Vec<ImageAttachment> {
    files
        .iter()
        .filter(|file| file.content_type.starts_with("image/"))
        .map(|file| {
            let media_type = if file.content_type == "image/" || file.content_type.is_empty() {
                DEFAULT_MEDIA_TYPE
            } else {
                &file.content_type
            };
            ImageAttachment::local(media_type, &file.bytes)
        })
        .collect()
}

fn media_type_for_path(url: &str) -> String {
    let lowered = url.to_lowercase();
    let guessed = match () {
        _ if lowered.ends_with(".png") => "image/png",
        _ if lowered.ends_with(".gif") => "image/gif",
        _ if lowered.ends_with(".webp") => "image/webp",
        _ if lowered.ends_with(".bmp") => "image/bmp",
        _ if lowered.ends_with(".svg") => "image/svg+xml",
        _ => DEFAULT_MEDIA_TYPE,
    };
    guessed.to_string()
}

/// The attachments staged for the next outgoing turn. The two sources are
/// owned and cleared independently; their union travels with one send and
/// is discarded afterwards.
#[derive(Debug, Default)]
pub struct AttachmentSet {
    url_images: Vec<ImageAttachment>,
    local_images: Vec<ImageAttachment>,
    filter: UrlFilter,
}

impl AttachmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: UrlFilter) -> Self {
        AttachmentSet {
            filter,
            ..Self::default()
        }
    }

    /// Replace the URL-sourced attachments from a block of free text.
    pub fn set_url_text(&mut self, text: &str) {
        self.url_images = extract_image_urls(text, &self.filter);
    }

    /// Replace the file-sourced attachments from the picker's selection.
    pub fn set_files(&mut self, files: &[FileUpload]) {
        self.local_images = encode_files(files);
    }

    pub fn clear_urls(&mut self) {
        self.url_images.clear();
    }

    pub fn clear_files(&mut self) {
        self.local_images.clear();
    }

    pub fn clear(&mut self) {
        self.url_images.clear();
        self.local_images.clear();
    }

    /// URL attachments first, then local ones, in intake order.
    pub fn all(&self) -> Vec<ImageAttachment> {
        self.url_images
            .iter()
            .chain(self.local_images.iter())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.url_images.len() + self.local_images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
