//! Query file loading
//!
//! Two formats are supported and the caller picks one; the content is never
//! sniffed.
//!
//! Simple format, one query per line:
//!
//! ```text
//! 1 information retrieval systems
//! 2 parallel sorting
//! ```
//!
//! Legacy CACM format, concatenated `<DOC>` fragments with no root element:
//!
//! ```text
//! <DOC>
//! <DOCNO> 1 </DOCNO>
//! What articles exist which deal with TSS (Time Sharing System)?
//! </DOC>
//! ```

use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;
use trecrun_core::{Error, Query, QueryId, Result};

const DOC_TAG: &[u8] = b"DOC";
const DOCNO_TAG: &[u8] = b"DOCNO";

/// Loads query sets from disk
pub struct QueryLoader;

impl QueryLoader {
    /// Load a simple-format query file.
    ///
    /// # Errors
    ///
    /// `Error::Io` if the file cannot be read, `Error::MalformedQueryFile`
    /// on the first line that is not `<integer id> <text>`.
    pub fn load_simple(path: &Path) -> Result<Vec<Query>> {
        let content = std::fs::read_to_string(path)?;
        let queries = Self::parse_simple(&content)?;
        tracing::info!(
            target: "trecrun::queries",
            path = %path.display(),
            count = queries.len(),
            "Loaded simple query file"
        );
        Ok(queries)
    }

    /// Load a legacy CACM query file.
    ///
    /// # Errors
    ///
    /// `Error::Io` if the file cannot be read, `Error::MalformedQueryFile` if
    /// the content is not well-formed once wrapped in a root element.
    pub fn load_legacy_xml(path: &Path) -> Result<Vec<Query>> {
        let content = std::fs::read_to_string(path)?;
        let queries = Self::parse_legacy_xml(&content)?;
        tracing::info!(
            target: "trecrun::queries",
            path = %path.display(),
            count = queries.len(),
            "Loaded legacy query file"
        );
        Ok(queries)
    }

    /// Parse simple-format query text.
    ///
    /// Blank lines are ignored. Everything after the first space is the query
    /// text, kept as is.
    ///
    /// # Example
    ///
    /// ```
    /// use trecrun_search::QueryLoader;
    ///
    /// let queries = QueryLoader::parse_simple("3 information retrieval\n").unwrap();
    /// assert_eq!(queries[0].id(), 3);
    /// assert_eq!(queries[0].text(), "information retrieval");
    /// ```
    pub fn parse_simple(content: &str) -> Result<Vec<Query>> {
        let mut queries = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let line_no = index + 1;
            let (id, text) = line.split_once(' ').ok_or_else(|| {
                Error::MalformedQueryFile(format!(
                    "line {}: expected '<id> <text>', found {:?}",
                    line_no, line
                ))
            })?;
            let id: QueryId = id.parse().map_err(|_| {
                Error::MalformedQueryFile(format!(
                    "line {}: query id {:?} is not an integer",
                    line_no, id
                ))
            })?;
            queries.push(Query::new(id, text));
        }
        Ok(queries)
    }

    /// Parse legacy CACM query text.
    ///
    /// Each `<DOC>` must hold exactly three nodes: leading text, a `<DOCNO>`
    /// element with a single text node, trailing text. Records of any other
    /// shape are skipped with a warning.
    pub fn parse_legacy_xml(content: &str) -> Result<Vec<Query>> {
        let wrapped = format!("<ROOT>{}</ROOT>", content);
        let mut reader = Reader::from_str(&wrapped);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<Element> = Vec::new();
        let mut queries = Vec::new();
        let mut record = 0usize;

        loop {
            let event = reader.read_event().map_err(|e| {
                Error::MalformedQueryFile(format!(
                    "XML error at byte {}: {}",
                    reader.error_position(),
                    e
                ))
            })?;
            match event {
                Event::Start(start) => {
                    stack.push(Element::new(start.name().as_ref()));
                }
                Event::Empty(start) => {
                    let element = Element::new(start.name().as_ref());
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Element(element));
                    }
                }
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| Error::MalformedQueryFile(e.to_string()))?;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Text(text.into_owned()));
                    }
                }
                Event::CData(_) | Event::Comment(_) | Event::PI(_) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Other);
                    }
                }
                Event::End(_) => {
                    let Some(element) = stack.pop() else {
                        return Err(Error::MalformedQueryFile(
                            "unbalanced closing tag".to_string(),
                        ));
                    };
                    if element.name == DOC_TAG {
                        record += 1;
                        match doc_to_query(&element) {
                            Ok(query) => queries.push(query),
                            Err(reason) => tracing::warn!(
                                target: "trecrun::queries",
                                record,
                                reason = %reason,
                                "Skipping malformed <DOC> record"
                            ),
                        }
                    }
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Element(element));
                    }
                }
                Event::Eof => break,
                Event::Decl(_) | Event::DocType(_) => {}
            }
        }

        if !stack.is_empty() {
            return Err(Error::MalformedQueryFile(
                "unexpected end of file inside an element".to_string(),
            ));
        }
        Ok(queries)
    }
}

// ============================================================================
// Legacy record shape
// ============================================================================

#[derive(Debug)]
enum Node {
    Text(String),
    Element(Element),
    Other,
}

#[derive(Debug)]
struct Element {
    name: Vec<u8>,
    children: Vec<Node>,
}

impl Element {
    fn new(name: &[u8]) -> Self {
        Element {
            name: name.to_vec(),
            children: Vec::new(),
        }
    }
}

fn doc_to_query(doc: &Element) -> std::result::Result<Query, String> {
    let [Node::Text(leading), Node::Element(docno), Node::Text(trailing)] =
        doc.children.as_slice()
    else {
        return Err(format!(
            "expected text, <DOCNO>, text; found {} node(s)",
            doc.children.len()
        ));
    };
    if docno.name != DOCNO_TAG {
        return Err(format!(
            "expected <DOCNO>, found <{}>",
            String::from_utf8_lossy(&docno.name)
        ));
    }
    let [Node::Text(number)] = docno.children.as_slice() else {
        return Err("<DOCNO> must contain exactly one text node".to_string());
    };
    let id: QueryId = number
        .trim()
        .parse()
        .map_err(|_| format!("query number {:?} is not an integer", number.trim()))?;

    Ok(Query::new(
        id,
        format!("{} {}", leading.trim(), trailing.trim()),
    ))
}
