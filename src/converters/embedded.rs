//! Detection of the raw fragment embedded in exported HTML
//!
//! Exported markup carries the raw encoding in an attribute on its root. A
//! paste handler can look for it first and only fall back to parsing the
//! literal HTML when it is absent.

use super::raw::deserialize;
use crate::config::ClipboardConfig;
use crate::error::{ClipboardError, Result};
use crate::fragment::Fragment;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// Fragment embedded in `html`, if any element carries the content attribute
///
/// Markup that cannot be scanned is treated as carrying no fragment; an
/// attribute that is present but does not decode is an error.
pub fn read_embedded_fragment(html: &str, config: &ClipboardConfig) -> Result<Option<Fragment>> {
    match find_attribute(html, &config.content_attribute) {
        Some(raw) => deserialize(&raw).map(Some),
        None => Ok(None),
    }
}

fn find_attribute(html: &str, name: &str) -> Option<String> {
    let mut reader = Reader::from_str(html);
    reader.check_end_names(false);

    loop {
        match reader.read_event() {
            Ok(Event::Start(tag)) | Ok(Event::Empty(tag)) => {
                for attr in tag.html_attributes().with_checks(false) {
                    let attr = match attr {
                        Ok(attr) => attr,
                        Err(e) => {
                            log::debug!("embedded: skipping malformed attribute: {}", e);
                            continue;
                        }
                    };
                    if attr.key.as_ref() != name.as_bytes() {
                        continue;
                    }
                    return match attr.unescape_value() {
                        Ok(value) => Some(value.into_owned()),
                        Err(e) => {
                            log::warn!("embedded: cannot unescape {}: {}", name, e);
                            None
                        }
                    };
                }
            }
            Ok(Event::Eof) => return None,
            Ok(_) => {}
            Err(e) => {
                log::debug!("embedded: stopped scanning at {}: {}", reader.buffer_position(), e);
                return None;
            }
        }
    }
}

/// Decode an embedded payload that is known to be present
pub fn require_embedded_fragment(html: &str, config: &ClipboardConfig) -> Result<Fragment> {
    read_embedded_fragment(html, config)?.ok_or_else(|| {
        ClipboardError::MalformedPayload(format!("no {} attribute found", config.content_attribute))
    })
}
