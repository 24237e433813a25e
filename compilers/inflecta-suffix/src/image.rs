//! Binary table image for the browser engine.

use inflecta_protocol::{ImageBucket, ImageRule, RuleKey, TableImage, IRREGULAR_BUCKET, TABLE_IMAGE_VERSION};

use crate::error::SuffixError;
use crate::table::{SuffixKey, SuffixTable};

impl SuffixTable {
    pub fn to_image(&self) -> Result<TableImage, SuffixError> {
        let mut buckets = Vec::new();
        for (key, bucket) in self.buckets() {
            let suffix_len = match key {
                SuffixKey::Irregular => IRREGULAR_BUCKET,
                SuffixKey::Length(len) => u32::try_from(len)
                    .map_err(|_| SuffixError::Archive(format!("suffix length {} does not fit the image", len)))?,
            };
            for (ending, rules) in bucket {
                buckets.push(ImageBucket {
                    suffix_len,
                    ending: ending.clone(),
                    rules: rules
                        .iter()
                        .map(|(rule, count)| ImageRule {
                            script: rule.script.clone(),
                            tag: rule.tag.clone(),
                            count: *count,
                        })
                        .collect(),
                });
            }
        }
        Ok(TableImage {
            version: TABLE_IMAGE_VERSION,
            buckets,
        })
    }

    pub fn from_image(image: TableImage) -> Result<Self, SuffixError> {
        if image.version != TABLE_IMAGE_VERSION {
            return Err(SuffixError::ImageVersion {
                found: image.version,
                expected: TABLE_IMAGE_VERSION,
            });
        }
        let mut table = SuffixTable::new();
        for bucket in image.buckets {
            let key = match bucket.suffix_len {
                IRREGULAR_BUCKET => SuffixKey::Irregular,
                len => SuffixKey::Length(len as usize),
            };
            for rule in bucket.rules {
                let rule_key = RuleKey::new(rule.script, rule.tag);
                if rule.count == 0 {
                    return Err(SuffixError::ZeroCount(rule_key.to_string()));
                }
                table.add(key, &bucket.ending, rule_key, rule.count);
            }
        }
        Ok(table)
    }

    /// Archives the table with rkyv.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SuffixError> {
        let bytes = rkyv::to_bytes::<_, 256>(&self.to_image()?)
            .map_err(|e| SuffixError::Archive(format!("{:?}", e)))?;
        Ok(bytes.into_vec())
    }

    /// Validates and loads an archive written by [`SuffixTable::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SuffixError> {
        // Archived roots must be aligned; buffers from files or JS are not.
        let mut aligned = rkyv::AlignedVec::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);
        let image = rkyv::from_bytes::<TableImage>(&aligned)
            .map_err(|e| SuffixError::Archive(format!("{:?}", e)))?;
        Self::from_image(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SuffixTable {
        let mut table = SuffixTable::new();
        table.add(SuffixKey::Length(1), "s", RuleKey::new(">1", "N"), 2);
        table.add(SuffixKey::Length(4), "ších", RuleKey::new(">3š", "N"), 5);
        table.add(SuffixKey::Irregular, "went", RuleKey::new("*go", "V"), 3);
        table
    }

    #[test]
    fn test_image_layout() {
        let image = sample().to_image().unwrap();
        assert_eq!(image.version, TABLE_IMAGE_VERSION);
        assert_eq!(image.buckets.len(), 3);
        assert_eq!(image.buckets[0].suffix_len, IRREGULAR_BUCKET);
        assert_eq!(image.buckets[0].ending, "went");
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_oversized_suffix_len() {
        let mut table = SuffixTable::new();
        table.add(SuffixKey::Length(u32::MAX as usize + 1), "s", RuleKey::new(">1", "N"), 1);
        assert!(matches!(table.to_image(), Err(SuffixError::Archive(_))));
        assert!(matches!(table.to_bytes(), Err(SuffixError::Archive(_))));
    }

    #[test]
    fn test_bytes_reload() {
        let table = sample();
        let bytes = table.to_bytes().unwrap();
        assert_eq!(SuffixTable::from_bytes(&bytes).unwrap(), table);
    }

    #[test]
    fn test_unaligned_input() {
        let table = sample();
        let mut shifted = vec![0u8];
        shifted.extend(table.to_bytes().unwrap());
        assert_eq!(SuffixTable::from_bytes(&shifted[1..]).unwrap(), table);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            SuffixTable::from_bytes(&[1, 2, 3]),
            Err(SuffixError::Archive(_))
        ));
    }

    #[test]
    fn test_rejects_other_versions() {
        let mut image = sample().to_image().unwrap();
        image.version += 1;
        assert!(matches!(
            SuffixTable::from_image(image),
            Err(SuffixError::ImageVersion { .. })
        ));
    }
}
