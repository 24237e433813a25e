//! Readers for annotated training corpora.

use std::io::BufRead;

use anyhow::{Context, Result};
use clap::ValueEnum;
use inflecta_suffix::Record;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InputFormat {
    /// One sentence per line, tokens `form|lemma|tag` separated by spaces
    #[default]
    Factored,
    /// One token per line, `form lemma tag` separated by whitespace
    OnePerLine,
    /// CSTS SGML, one `<f>form<l>lemma<t>tag` token per line
    Csts,
}

pub struct RecordParser {
    format: InputFormat,
    csts_line: Regex,
    csts_token: Regex,
}

impl RecordParser {
    pub fn new(format: InputFormat) -> Result<Self> {
        Ok(Self {
            format,
            csts_line: Regex::new(r"^<[df][ >]")?,
            csts_token: Regex::new(r"^<[df][^>]*>([^<]*)<l>([^<]*)<t>([^<]*)(?:<|$)")?,
        })
    }

    /// Records on one line. Malformed tokens are logged and skipped.
    pub fn parse_line(&self, line_no: usize, line: &str) -> Vec<Record> {
        let line = line.trim();
        match self.format {
            InputFormat::Factored => line
                .split_whitespace()
                .filter_map(|token| {
                    let fields: Vec<&str> = token.split('|').collect();
                    let record = triple(&fields);
                    if record.is_none() {
                        log::warn!("line {}: skipping token {:?}", line_no, token);
                    }
                    record
                })
                .collect(),
            InputFormat::OnePerLine => {
                if line.is_empty() {
                    return Vec::new();
                }
                let fields: Vec<&str> = line.split_whitespace().collect();
                let record = triple(&fields);
                if record.is_none() {
                    log::warn!("line {}: expected form, lemma and tag", line_no);
                }
                record.into_iter().collect()
            }
            InputFormat::Csts => {
                if !self.csts_line.is_match(line) {
                    return Vec::new();
                }
                match self.csts_token.captures(line) {
                    Some(caps) => vec![Record::new(&caps[1], &caps[2], &caps[3])],
                    None => {
                        log::warn!("line {}: no lemma and tag in {:?}", line_no, line);
                        Vec::new()
                    }
                }
            }
        }
    }

    pub fn read_records<R: BufRead>(&self, reader: R) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("reading line {}", idx + 1))?;
            records.extend(self.parse_line(idx + 1, &line));
        }
        Ok(records)
    }
}

fn triple(fields: &[&str]) -> Option<Record> {
    match fields {
        [form, lemma, tag] => Some(Record::new(*form, *lemma, *tag)),
        _ => None,
    }
}
