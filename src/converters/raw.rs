//! Raw content encoding
//!
//! The raw form is an order-preserving JSON tree: blocks with their text,
//! style runs, entity runs and data, plus an entity map keyed by the order in
//! which entities first appear. It is what gets embedded in exported HTML and
//! what the JS side hands over when loading a document.
//!
//! Encoding is deterministic: runs are emitted in a fixed order and JSON maps
//! are sorted.

use crate::error::{ClipboardError, Result};
use crate::fragment::Fragment;
use crate::models::{BlockType, CharacterMetadata, ContentBlock, ContentState, Entity};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Raw document or fragment
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawContent {
    pub blocks: Vec<RawBlock>,
    #[serde(default)]
    pub entity_map: BTreeMap<String, Entity>,
}

/// Raw block
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    pub key: String,
    pub text: String,
    #[serde(rename = "type", default)]
    pub block_type: BlockType,
    /// Non-negative mirror of `data.indent` for readers that expect it
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub inline_style_ranges: Vec<RawStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<RawEntityRange>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RawStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RawEntityRange {
    pub offset: usize,
    pub length: usize,
    /// Index into the raw entity map
    pub key: usize,
}

/// Serialize a fragment to its raw JSON string
pub fn serialize(fragment: &Fragment) -> Result<String> {
    let raw = encode(fragment.blocks(), fragment.entity_map());
    Ok(serde_json::to_string(&raw)?)
}

/// Rebuild a fragment from its raw JSON string
pub fn deserialize(json: &str) -> Result<Fragment> {
    let raw: RawContent = serde_json::from_str(json)?;
    let (blocks, entity_map) = decode(raw)?;
    Ok(Fragment::new(blocks, entity_map))
}

/// Raw form of whole document content
pub fn content_to_raw(content: &ContentState) -> RawContent {
    encode(content.blocks(), content.entity_map())
}

/// Document content from its raw form
pub fn content_from_raw(raw: RawContent) -> Result<ContentState> {
    let (blocks, entity_map) = decode(raw)?;
    Ok(ContentState::with_entities(blocks, entity_map))
}

/// Encode blocks and the entities they reference
pub fn encode(blocks: &[ContentBlock], entities: &BTreeMap<String, Entity>) -> RawContent {
    let mut entity_index: HashMap<&str, usize> = HashMap::new();
    let mut entity_map = BTreeMap::new();

    for entity_key in blocks
        .iter()
        .flat_map(|block| block.characters.iter())
        .filter_map(|meta| meta.entity.as_deref())
    {
        if entity_index.contains_key(entity_key) {
            continue;
        }
        let Some(entity) = entities.get(entity_key) else {
            log::warn!("encode: entity {} referenced but not in entity map", entity_key);
            continue;
        };
        let index = entity_index.len();
        entity_index.insert(entity_key, index);
        entity_map.insert(index.to_string(), entity.clone());
    }

    let blocks = blocks
        .iter()
        .map(|block| RawBlock {
            key: block.key.clone(),
            text: block.text.clone(),
            block_type: block.block_type,
            depth: u32::try_from(block.indent().max(0)).unwrap_or(u32::MAX),
            inline_style_ranges: style_ranges(&block.characters),
            entity_ranges: entity_ranges(&block.characters, &entity_index),
            data: block.data.clone(),
        })
        .collect();

    RawContent { blocks, entity_map }
}

/// Maximal runs per style, ordered by style name then offset
fn style_ranges(characters: &[CharacterMetadata]) -> Vec<RawStyleRange> {
    let styles: BTreeSet<&String> = characters.iter().flat_map(|meta| meta.style.iter()).collect();

    let mut ranges = Vec::new();
    for style in styles {
        let mut run_start = None;
        for (i, meta) in characters.iter().enumerate() {
            match (meta.style.contains(style), run_start) {
                (true, None) => run_start = Some(i),
                (false, Some(start)) => {
                    ranges.push(RawStyleRange {
                        offset: start,
                        length: i - start,
                        style: style.clone(),
                    });
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            ranges.push(RawStyleRange {
                offset: start,
                length: characters.len() - start,
                style: style.clone(),
            });
        }
    }
    ranges
}

/// Maximal runs of the same entity, in offset order
fn entity_ranges(
    characters: &[CharacterMetadata],
    entity_index: &HashMap<&str, usize>,
) -> Vec<RawEntityRange> {
    let mut ranges = Vec::new();
    let mut i = 0;
    while i < characters.len() {
        let Some(entity) = characters[i].entity.as_deref() else {
            i += 1;
            continue;
        };
        let start = i;
        while i < characters.len() && characters[i].entity.as_deref() == Some(entity) {
            i += 1;
        }
        if let Some(&key) = entity_index.get(entity) {
            ranges.push(RawEntityRange { offset: start, length: i - start, key });
        }
    }
    ranges
}

/// Decode raw blocks; entity keys become the raw map's index strings
pub fn decode(raw: RawContent) -> Result<(Vec<ContentBlock>, BTreeMap<String, Entity>)> {
    let RawContent { blocks, entity_map } = raw;

    let blocks = blocks
        .into_iter()
        .map(|raw_block| {
            let len = raw_block.text.chars().count();
            let mut block = ContentBlock {
                key: raw_block.key,
                block_type: raw_block.block_type,
                text: raw_block.text,
                characters: vec![CharacterMetadata::default(); len],
                data: raw_block.data,
            };

            for range in &raw_block.inline_style_ranges {
                check_range(&block, range.offset, range.length)?;
                block.apply_style(range.offset, range.offset + range.length, &range.style);
            }
            for range in &raw_block.entity_ranges {
                check_range(&block, range.offset, range.length)?;
                let entity_key = range.key.to_string();
                if !entity_map.contains_key(&entity_key) {
                    return Err(ClipboardError::MalformedPayload(format!(
                        "block {} references missing entity {}",
                        block.key, entity_key
                    )));
                }
                block.apply_entity(range.offset, range.offset + range.length, Some(&entity_key));
            }
            Ok(block)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((blocks, entity_map))
}

fn check_range(block: &ContentBlock, offset: usize, length: usize) -> Result<()> {
    if offset.checked_add(length).map_or(true, |end| end > block.len()) {
        return Err(ClipboardError::MalformedPayload(format!(
            "range {}+{} exceeds block {} of length {}",
            offset,
            length,
            block.key,
            block.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mutability;

    fn sample_fragment() -> Fragment {
        let mut first = ContentBlock::new("f1", "Hello world").with_type(BlockType::HeaderTwo);
        first.apply_style(0, 5, "BOLD");
        first.apply_style(3, 11, "ITALIC");
        first.apply_entity(6, 11, Some("lnk"));

        let mut second = ContentBlock::new("f2", "nested")
            .with_type(BlockType::UnorderedListItem)
            .with_indent(2);
        second.apply_style(0, 6, "BOLD");

        let mut entities = BTreeMap::new();
        entities.insert(
            "lnk".to_string(),
            Entity::new("LINK", Mutability::Mutable)
                .with_data("url", Value::from("https://example.com")),
        );
        Fragment::new(vec![first, second], entities)
    }

    #[test]
    fn test_serialize_shape() {
        let json = serialize(&sample_fragment()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        let first = &value["blocks"][0];
        assert_eq!(first["type"], "header-two");
        assert_eq!(first["depth"], 0);
        assert_eq!(
            first["inlineStyleRanges"],
            serde_json::json!([
                {"offset": 0, "length": 5, "style": "BOLD"},
                {"offset": 3, "length": 8, "style": "ITALIC"}
            ])
        );
        assert_eq!(
            first["entityRanges"],
            serde_json::json!([{"offset": 6, "length": 5, "key": 0}])
        );

        let second = &value["blocks"][1];
        assert_eq!(second["depth"], 2);
        assert_eq!(second["data"]["indent"], 2);

        assert_eq!(value["entityMap"]["0"]["type"], "LINK");
        assert_eq!(value["entityMap"]["0"]["mutability"], "MUTABLE");
        assert_eq!(value["entityMap"]["0"]["data"]["url"], "https://example.com");
    }

    #[test]
    fn test_serialize_is_deterministic() {
        let fragment = sample_fragment();
        assert_eq!(serialize(&fragment).unwrap(), serialize(&fragment.clone()).unwrap());
    }

    #[test]
    fn test_deserialize_restores_blocks() {
        let fragment = sample_fragment();
        let restored = deserialize(&serialize(&fragment).unwrap()).unwrap();

        assert_eq!(restored.len(), 2);
        let first = &restored.blocks()[0];
        assert_eq!(first.key, "f1");
        assert_eq!(first.characters.len(), 11);
        assert_eq!(first.characters[4].style.iter().collect::<Vec<_>>(), vec!["BOLD", "ITALIC"]);
        assert_eq!(first.entity_at(6), Some("0"));
        assert_eq!(restored.entity_map()["0"], fragment.entity_map()["lnk"]);
        assert_eq!(restored.blocks()[1].indent(), 2);
        assert_eq!(restored.blocks()[1].block_type, BlockType::UnorderedListItem);
    }

    #[test]
    fn test_negative_indent_depth_clamped() {
        let fragment =
            Fragment::new(vec![ContentBlock::new("n", "x").with_indent(-2)], BTreeMap::new());
        let raw = encode(fragment.blocks(), fragment.entity_map());
        assert_eq!(raw.blocks[0].depth, 0);
        assert_eq!(raw.blocks[0].data["indent"], -2);
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let json = r#"{"blocks":[{"key":"a","text":"abc","inlineStyleRanges":[{"offset":2,"length":5,"style":"BOLD"}]}]}"#;
        assert!(matches!(deserialize(json), Err(ClipboardError::MalformedPayload(_))));
    }

    #[test]
    fn test_deserialize_rejects_overflowing_range() {
        let json = format!(
            r#"{{"blocks":[{{"key":"a","text":"abc","inlineStyleRanges":[{{"offset":2,"length":{},"style":"BOLD"}}]}}]}}"#,
            usize::MAX
        );
        assert!(matches!(deserialize(&json), Err(ClipboardError::MalformedPayload(_))));

        let json = format!(
            r#"{{"blocks":[{{"key":"a","text":"abc","entityRanges":[{{"offset":{},"length":1,"key":0}}]}}],"entityMap":{{"0":{{"type":"LINK","mutability":"MUTABLE"}}}}}}"#,
            usize::MAX
        );
        assert!(matches!(deserialize(&json), Err(ClipboardError::MalformedPayload(_))));
    }

    #[test]
    fn test_depth_saturates_for_huge_indent() {
        let blocks = vec![
            ContentBlock::new("a", "deep").with_indent(i64::MAX),
            ContentBlock::new("b", "shallow").with_indent(-3),
        ];
        let raw = encode(&blocks, &BTreeMap::new());
        assert_eq!(raw.blocks[0].depth, u32::MAX);
        assert_eq!(raw.blocks[1].depth, 0);
    }

    #[test]
    fn test_deserialize_rejects_missing_entity() {
        let json = r#"{"blocks":[{"key":"a","text":"abc","entityRanges":[{"offset":0,"length":1,"key":3}]}],"entityMap":{}}"#;
        assert!(matches!(deserialize(json), Err(ClipboardError::MalformedPayload(_))));
    }

    #[test]
    fn test_content_round_trip() {
        let content = ContentState::new(vec![
            ContentBlock::new("a", "one"),
            ContentBlock::new("b", "two").with_indent(1),
        ]);
        let restored = content_from_raw(content_to_raw(&content)).unwrap();
        assert_eq!(restored, content);
    }
}
