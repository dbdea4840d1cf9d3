//! Streaming XMP parser
//!
//! The parser pulls one XML token at a time and rebuilds XMP's RDF nesting:
//! `rdf:RDF` and `rdf:Description` toggle boundary flags, every other element
//! is pushed on a name stack, character data is staged until the element
//! closes, and array-typed properties collect their content as fragments
//! until they close. Each finished leaf is written into a [`PropertyIndex`]
//! under its rendered path.
//!
//! Malformed values are logged and dropped. Malformed structure aborts the
//! parse.

use crate::core::error::{XmpError, XmpResult};
use crate::core::index::{LeafValue, PropertyIndex, ScalarLeaf};
use crate::core::name::{PropertyPath, QualifiedName};
use crate::core::namespace::{standard_registry, Registry};
use crate::core::schemas::ns;
use crate::types::{ArrayFieldType, Fragment, OpenTag, RawAttribute, ScalarValue};
use crate::utils::packet::{ByteOrderMark, PacketHeader};
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{LocalName, ResolveResult};
use quick_xml::NsReader;
use std::io::BufRead;
use std::str::FromStr;

/// Parser for XMP packets
pub struct XmpParser<'r> {
    registry: &'r Registry,
    bom: Option<ByteOrderMark>,
}

impl<'r> XmpParser<'r> {
    /// Create a parser resolving names through `registry`
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            bom: None,
        }
    }

    /// Byte-order mark announced by the last parsed `xpacket` header
    pub fn byte_order_mark(&self) -> Option<ByteOrderMark> {
        self.bom
    }

    /// Parse an XMP packet from a string
    pub fn parse_str(&mut self, xml: &str) -> XmpResult<PropertyIndex> {
        self.parse(xml.as_bytes())
    }

    /// Parse one XMP packet from a buffered reader
    ///
    /// The `<?xpacket?>` wrapper is optional. Any structural error discards
    /// the partially built index.
    pub fn parse<R: BufRead>(&mut self, reader: R) -> XmpResult<PropertyIndex> {
        let mut reader = NsReader::from_reader(reader);
        reader.config_mut().expand_empty_elements = true;

        let mut session = Session::new(self.registry);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let (name, attributes) = Self::resolve_start(&reader, &e)?;
                    session.open(name, attributes)?;
                }
                Event::End(e) => {
                    let (namespace, local) = reader.resolve_element(e.name());
                    session.close(qualified(namespace, local))?;
                }
                Event::Text(e) => {
                    // Decode XML entities (e.g., &quot; -> ")
                    let raw_text = String::from_utf8_lossy(e.as_ref());
                    let text = match unescape(&raw_text) {
                        Ok(unescaped) => unescaped.to_string(),
                        Err(_) => raw_text.to_string(),
                    };
                    session.text(&text);
                }
                Event::CData(e) => session.text(&String::from_utf8_lossy(e.as_ref())),
                Event::GeneralRef(e) => {
                    let reference = format!("&{};", String::from_utf8_lossy(&e));
                    match unescape(&reference) {
                        Ok(resolved) => session.text(&resolved),
                        Err(_) => session.text(&reference),
                    }
                }
                Event::PI(e) if e.target() == b"xpacket" => {
                    let mut pairs = Vec::new();
                    for attribute in e.attributes() {
                        let attribute = attribute?;
                        pairs.push((attribute.key.as_ref().to_vec(), attribute.value.into_owned()));
                    }
                    session.xpacket(&pairs)?;
                }
                Event::Eof => break,
                _ => session.other(),
            }
            buf.clear();
        }

        self.bom = session.bom;
        session.finish()
    }

    /// Resolve a start tag and its attributes, skipping namespace declarations
    fn resolve_start<R>(
        reader: &NsReader<R>,
        e: &BytesStart<'_>,
    ) -> XmpResult<(QualifiedName, Vec<RawAttribute>)> {
        let (namespace, local) = reader.resolve_element(e.name());
        let name = qualified(namespace, local);

        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = attr.key.as_ref();
            if key == b"xmlns" || key.starts_with(b"xmlns:") {
                continue;
            }
            let (namespace, local) = reader.resolve_attribute(attr.key);
            let raw_value = String::from_utf8_lossy(attr.value.as_ref());
            let value = match unescape(&raw_value) {
                Ok(unescaped) => unescaped.to_string(),
                Err(_) => raw_value.to_string(),
            };
            attributes.push(RawAttribute::new(qualified(namespace, local), value));
        }
        Ok((name, attributes))
    }
}

impl FromStr for PropertyIndex {
    type Err = XmpError;

    /// Parse with the standard namespace registry
    fn from_str(s: &str) -> XmpResult<Self> {
        XmpParser::new(standard_registry()).parse_str(s)
    }
}

fn qualified(namespace: ResolveResult<'_>, local: LocalName<'_>) -> QualifiedName {
    let local = String::from_utf8_lossy(local.as_ref()).into_owned();
    match namespace {
        ResolveResult::Bound(uri) => {
            QualifiedName::new(String::from_utf8_lossy(uri.as_ref()).into_owned(), local)
        }
        ResolveResult::Unbound => QualifiedName::new("", local),
        ResolveResult::Unknown(prefix) => {
            log::warn!(
                "Undeclared namespace prefix [{}] on [{}]",
                String::from_utf8_lossy(&prefix),
                local
            );
            QualifiedName::new("", local)
        }
    }
}

/// Kind of the previous token, for empty-element and inter-tag text detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastToken {
    None,
    Open,
    Close,
    Text,
    /// A text run that is being ignored
    IgnoredText,
    Other,
}

/// Fragments collected below one open array property
#[derive(Debug)]
struct Collector {
    kind: ArrayFieldType,
    /// Name-stack depth of the owning property
    depth: usize,
    path: PropertyPath,
    fragments: Vec<Fragment>,
}

/// State of one parse call
struct Session<'r> {
    registry: &'r Registry,
    index: PropertyIndex,
    stack: Vec<QualifiedName>,
    /// Stack depth at which the open `rdf:Description` started
    scope: usize,
    /// Stack depths of open nested `rdf:Description` struct wrappers
    wrappers: Vec<usize>,
    collectors: Vec<Collector>,
    staged: Option<String>,
    last: LastToken,
    /// The element opened last already produced a leaf from its attributes
    opened_with_leaf: bool,
    packet_open: bool,
    rdf_open: bool,
    description_open: bool,
    bom: Option<ByteOrderMark>,
}

impl<'r> Session<'r> {
    fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            index: PropertyIndex::new(),
            stack: Vec::new(),
            scope: 0,
            wrappers: Vec::new(),
            collectors: Vec::new(),
            staged: None,
            last: LastToken::None,
            opened_with_leaf: false,
            packet_open: false,
            rdf_open: false,
            description_open: false,
            bom: None,
        }
    }

    fn current_path(&self) -> PropertyPath {
        self.stack[self.scope.min(self.stack.len())..]
            .iter()
            .cloned()
            .collect()
    }

    fn xpacket(&mut self, attributes: &[(Vec<u8>, Vec<u8>)]) -> XmpResult<()> {
        self.last = LastToken::Other;
        if self.packet_open {
            self.packet_open = false;
            return Ok(());
        }

        let header = PacketHeader::from_attributes(
            attributes
                .iter()
                .map(|(key, value)| (key.as_slice(), value.as_slice())),
        )?;
        self.bom = header.bom;
        self.packet_open = true;
        Ok(())
    }

    fn open(&mut self, name: QualifiedName, attributes: Vec<RawAttribute>) -> XmpResult<()> {
        self.staged = None;
        self.opened_with_leaf = false;
        self.last = LastToken::Open;

        if name.is(ns::RDF, "RDF") {
            if self.rdf_open {
                return Err(XmpError::Structure("RDF is already open".to_string()));
            }
            self.rdf_open = true;
            return Ok(());
        }

        if name.is(ns::RDF, "Description") {
            if !self.description_open {
                self.description_open = true;
                self.scope = self.stack.len();
                self.record_attributes(&PropertyPath::new(), &attributes);
                return Ok(());
            }
            if self.stack.len() == self.scope {
                return Err(XmpError::Structure(
                    "RDF description is already open".to_string(),
                ));
            }
            // struct wrapper below a property
            self.wrappers.push(self.stack.len());
            match self.collectors.last_mut() {
                Some(collector) => collector
                    .fragments
                    .push(Fragment::Open(OpenTag { name, attributes })),
                None => {
                    let base = self.current_path();
                    self.opened_with_leaf = self.record_attributes(&base, &attributes);
                }
            }
            return Ok(());
        }

        self.stack.push(name.clone());
        if !self.description_open {
            return Ok(());
        }

        if let Some(kind) = self.registry.array_type(&name) {
            log::trace!("collecting {} for [{}]", kind.name(), name.render(self.registry));
            self.collectors.push(Collector {
                kind,
                depth: self.stack.len(),
                path: self.current_path(),
                fragments: Vec::new(),
            });
        } else if let Some(collector) = self.collectors.last_mut() {
            collector
                .fragments
                .push(Fragment::Open(OpenTag { name, attributes }));
        } else if !attributes.is_empty() {
            let parsed = self.registry.parse_attributes(&attributes);
            if !parsed.is_empty() {
                let path = self.current_path();
                self.add_leaf(&path, LeafValue::Complex(parsed));
                self.opened_with_leaf = true;
            }
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if !self.description_open {
            self.last = LastToken::IgnoredText;
            return;
        }
        match self.last {
            // text between two close tags is never meaningful in XMP
            LastToken::Close | LastToken::IgnoredText => self.last = LastToken::IgnoredText,
            LastToken::Text => self
                .staged
                .get_or_insert_with(String::new)
                .push_str(text),
            LastToken::None | LastToken::Open | LastToken::Other => {
                self.staged = Some(text.to_string());
                self.last = LastToken::Text;
            }
        }
    }

    /// Comments and foreign instructions leave an open element empty and a text run going
    fn other(&mut self) {
        if !matches!(self.last, LastToken::Open | LastToken::Text) {
            self.last = LastToken::Other;
        }
    }

    fn close(&mut self, name: QualifiedName) -> XmpResult<()> {
        let last = std::mem::replace(&mut self.last, LastToken::Close);

        if name.is(ns::RDF, "RDF") {
            if !self.rdf_open {
                return Err(XmpError::Structure("RDF is not open".to_string()));
            }
            self.rdf_open = false;
            self.staged = None;
            return Ok(());
        }

        if name.is(ns::RDF, "Description") {
            self.staged = None;
            if self.wrappers.last() == Some(&self.stack.len()) {
                self.wrappers.pop();
                if let Some(collector) = self.collectors.last_mut() {
                    collector.fragments.push(Fragment::Close(name));
                }
                return Ok(());
            }
            if !self.description_open {
                return Err(XmpError::Structure(
                    "RDF description is not open".to_string(),
                ));
            }
            self.description_open = false;
            return Ok(());
        }

        if self.stack.last() != Some(&name) {
            return Err(XmpError::Structure(format!(
                "close tag [{}] does not match the open element",
                name.render(self.registry)
            )));
        }

        if !self.description_open {
            self.staged = None;
            self.stack.pop();
            return Ok(());
        }

        let staged = self.staged.take().or_else(|| {
            // an element with nothing between its tags stands for an empty value
            (last == LastToken::Open && !self.opened_with_leaf).then(String::new)
        });
        let owns_collector = self
            .collectors
            .last()
            .is_some_and(|collector| collector.depth == self.stack.len());

        if let Some(text) = staged {
            if name.is(ns::RDF, "li") {
                self.route_item_text(text);
            } else if owns_collector {
                if !text.trim().is_empty() {
                    log::warn!(
                        "Ignoring text of array property [{}]: [{}]",
                        name.render(self.registry),
                        text.trim()
                    );
                }
            } else if name.namespace != ns::RDF {
                self.record_text(&name, &text);
            }
        }

        if owns_collector {
            if let Some(collector) = self.collectors.pop() {
                self.finish_array(collector)?;
            }
        } else if let Some(collector) = self.collectors.last_mut() {
            collector.fragments.push(Fragment::Close(name));
        }

        self.stack.pop();
        Ok(())
    }

    /// `rdf:li` text goes to the innermost array
    fn route_item_text(&mut self, text: String) {
        match self.collectors.last_mut() {
            Some(collector) => collector
                .fragments
                .push(Fragment::CharData(text.trim().to_string())),
            None => log::warn!(
                "Dropping [rdf]li char-data outside of any array at [{}]: [{}]",
                self.current_path().phrase(self.registry),
                text.trim()
            ),
        }
    }

    /// Parse element text through its field type
    fn record_text(&mut self, name: &QualifiedName, text: &str) {
        match self.registry.parse_value(name, text.trim()) {
            Ok(value) => match self.collectors.last_mut() {
                Some(collector) => collector
                    .fragments
                    .push(Fragment::Value(name.clone(), value)),
                None => {
                    let path = self.current_path();
                    self.add_scalar(&path, name, value);
                }
            },
            Err(err) => self.skip(name, &err),
        }
    }

    /// Attributes of an `rdf:Description` become scalar leaves below `base`
    fn record_attributes(&mut self, base: &PropertyPath, attributes: &[RawAttribute]) -> bool {
        let mut recorded = false;
        for attribute in attributes {
            if attribute.name.namespace == ns::RDF {
                continue;
            }
            match self.registry.parse_value(&attribute.name, &attribute.value) {
                Ok(value) => {
                    let path = base.child(attribute.name.clone());
                    recorded |= self.add_scalar(&path, &attribute.name, value);
                }
                Err(err) => self.skip(&attribute.name, &err),
            }
        }
        recorded
    }

    fn finish_array(&mut self, collector: Collector) -> XmpResult<()> {
        let Collector {
            kind,
            path,
            fragments,
            ..
        } = collector;

        if fragments.is_empty() {
            log::debug!(
                "Array property [{}] has no container; skipping",
                path.phrase(self.registry)
            );
            return Ok(());
        }

        let value = kind.build(self.registry, path.clone(), fragments)?;
        match self.collectors.last_mut() {
            Some(outer) => outer.fragments.push(Fragment::Array(value)),
            None => {
                self.add_leaf(&path, LeafValue::Array(value));
            }
        }
        Ok(())
    }

    fn add_scalar(&mut self, path: &PropertyPath, name: &QualifiedName, value: ScalarValue) -> bool {
        match self.registry.get(&name.namespace) {
            Ok(namespace) => self.add_leaf(
                path,
                LeafValue::Scalar(ScalarLeaf {
                    namespace,
                    field: name.local.clone(),
                    value,
                }),
            ),
            Err(err) => {
                self.skip(name, &err);
                false
            }
        }
    }

    fn add_leaf(&mut self, path: &PropertyPath, value: LeafValue) -> bool {
        let segments = path.segments(self.registry);
        match self.index.add(&segments, value) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Dropping value at [{}]: {}", segments.join("."), err);
                false
            }
        }
    }

    fn skip(&self, name: &QualifiedName, err: &XmpError) {
        match err {
            XmpError::ValueNotValid { .. } => {
                log::warn!("Skipping [{}]: {}", name.render(self.registry), err)
            }
            _ => log::debug!("Skipping [{}]: {}", name.render(self.registry), err),
        }
    }

    fn finish(self) -> XmpResult<PropertyIndex> {
        if self.packet_open {
            log::warn!("xpacket trailer is missing");
        }
        if self.rdf_open || self.description_open {
            return Err(XmpError::Structure(
                "document ended inside an RDF block".to_string(),
            ));
        }
        if !self.stack.is_empty() || !self.collectors.is_empty() {
            return Err(XmpError::Structure(format!(
                "document ended with {} open element(s)",
                self.stack.len()
            )));
        }
        Ok(self.index)
    }
}
