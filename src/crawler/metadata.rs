//! Metadata derivation
//!
//! Maps a URL to a structured metadata record by positional path-segment
//! categorization. Derivation is a pure function of the URL: no network, no
//! state, never fails.

use serde::{Deserialize, Serialize};

/// Number of positional category slots in a metadata record
const CATEGORY_SLOTS: usize = 5;

/// Metadata derived for one crawled page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(rename = "metadataAttributes")]
    pub attributes: MetadataAttributes,
}

/// Positional category attributes for one page
///
/// Categories come from the URL path: the scheme and host are stripped, the
/// remainder is split on `/`, empty segments are dropped, and the first five
/// segments fill `sub_cate_1` through `sub_cate_5`. Missing slots default to
/// the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataAttributes {
    pub url: String,
    pub sub_cate_1: String,
    pub sub_cate_2: String,
    pub sub_cate_3: String,
    pub sub_cate_4: String,
    pub sub_cate_5: String,
}

/// Derives the metadata record for a URL
///
/// Deterministic and total: two calls with the same URL always yield
/// identical output. A root URL has no path segments, so all category
/// slots stay empty.
///
/// # Example
///
/// ```
/// use site_harvester::crawler::derive_metadata;
///
/// let record = derive_metadata("https://a.com/x/y");
/// assert_eq!(record.attributes.sub_cate_1, "x");
/// assert_eq!(record.attributes.sub_cate_2, "y");
/// assert_eq!(record.attributes.sub_cate_3, "");
/// ```
pub fn derive_metadata(url: &str) -> MetadataRecord {
    let stripped = strip_scheme(url);
    // The first non-empty segment is the host, not a category
    let mut segments = stripped.split('/').filter(|s| !s.is_empty()).skip(1);

    let mut slots: [String; CATEGORY_SLOTS] = Default::default();
    for slot in slots.iter_mut() {
        match segments.next() {
            Some(segment) => *slot = segment.to_string(),
            None => break,
        }
    }

    let [sub_cate_1, sub_cate_2, sub_cate_3, sub_cate_4, sub_cate_5] = slots;

    MetadataRecord {
        attributes: MetadataAttributes {
            url: url.to_string(),
            sub_cate_1,
            sub_cate_2,
            sub_cate_3,
            sub_cate_4,
            sub_cate_5,
        },
    }
}

/// Strips a leading `http://` or `https://` scheme from a URL string
pub fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}
