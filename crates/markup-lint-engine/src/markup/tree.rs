//! Element Tree Builder.
//!
//! Converts one element's markup into a navigable [`Element`] tree. Property
//! elements such as `<Grid.RowDefinitions>` become [`Attribute`]s of their
//! owner rather than children, so queries see the same model whether an
//! attribute was written inline or expanded.
//!
//! Name comparisons in the query methods ignore ASCII case and any namespace
//! prefix: a query for `Name` matches `x:Name` and `tst:name`.

use serde::Serialize;

use crate::{
    error::ScanError,
    markup::scan::{self, Tag, TagKind, TagScanner},
    span::Span,
    text::Cursor,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    /// Tag name as written, including any namespace prefix.
    pub name: String,
    /// Inline attributes first, then property elements, each in document order.
    pub attributes: Vec<Attribute>,
    pub children: Vec<Element>,
    /// Inner markup with property-element regions removed. `None` when that
    /// leaves nothing but whitespace.
    pub content: Option<String>,
    /// Absolute location of the whole element.
    pub location: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: AttributeValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AttributeValue {
    Text(String),
    Element(Element),
}

impl Attribute {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: AttributeValue::Text(value.into()),
        }
    }

    pub fn string_value(&self) -> Option<&str> {
        match &self.value {
            AttributeValue::Text(s) => Some(s),
            AttributeValue::Element(_) => None,
        }
    }

    pub fn element_value(&self) -> Option<&Element> {
        match &self.value {
            AttributeValue::Text(_) => None,
            AttributeValue::Element(e) => Some(e),
        }
    }
}

/// Strips a namespace prefix: `x:Name` becomes `Name`.
pub fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// Case-insensitive, prefix-insensitive name comparison.
pub fn names_match(stored: &str, query: &str) -> bool {
    local_name(stored).eq_ignore_ascii_case(local_name(query))
}

/// Builds the tree for the element whose markup starts `markup`.
pub fn build(markup: &str) -> Result<Element, ScanError> {
    build_at(markup, 0)
}

/// Like [`build`], with every location shifted by `offset` so it is absolute
/// in the document `markup` was cut from.
pub fn build_at(markup: &str, offset: usize) -> Result<Element, ScanError> {
    let open = scan::opening_tag(markup).ok_or(ScanError::MissingOpeningTag)?;
    build_element(markup, open, offset)
}

fn unterminated(name: &str) -> ScanError {
    ScanError::UnterminatedElement {
        name: name.to_string(),
    }
}

fn build_element(markup: &str, open: Tag<'_>, base: usize) -> Result<Element, ScanError> {
    let name = open.name;
    let mut attributes = parse_inline_attributes(&markup[open.start..open.end], name)?;

    if open.kind == TagKind::SelfClosing {
        return Ok(Element {
            name: name.to_string(),
            attributes,
            children: vec![],
            content: None,
            location: open.span().offset_by(base),
        });
    }

    let close = scan::matching_close(markup, &open).ok_or_else(|| unterminated(name))?;
    let property_prefix = format!("{name}.");
    let mut children = vec![];
    let mut content = String::new();
    let mut last = open.end;

    let mut scanner = TagScanner::starting_at(markup, open.end);
    while let Some(tag) = scanner.next() {
        if tag.start >= close.start {
            break;
        }
        if !tag.opens() {
            continue;
        }
        let end = scan::element_end(markup, &tag)
            .filter(|end| *end <= close.start)
            .ok_or_else(|| unterminated(tag.name))?;

        if let Some(property) = tag.name.strip_prefix(property_prefix.as_str()) {
            content.push_str(&markup[last..tag.start]);
            last = end;
            attributes.extend(property_values(markup, tag, property, base)?);
        } else {
            children.push(build_element(markup, tag, base)?);
        }
        scanner = TagScanner::starting_at(markup, end);
    }
    content.push_str(&markup[last..close.start]);

    Ok(Element {
        name: name.to_string(),
        attributes,
        children,
        content: (!content.trim().is_empty()).then_some(content),
        location: Span::from_bounds(open.start, close.end).offset_by(base),
    })
}

/// Values of a property element: one attribute per nested element, or a single
/// text attribute when there is no markup inside.
fn property_values(
    markup: &str,
    tag: Tag<'_>,
    property: &str,
    base: usize,
) -> Result<Vec<Attribute>, ScanError> {
    if tag.kind == TagKind::SelfClosing {
        return Ok(vec![Attribute::text(property, "")]);
    }
    let close = scan::matching_close(markup, &tag).ok_or_else(|| unterminated(tag.name))?;

    let mut values = vec![];
    let mut scanner = TagScanner::starting_at(markup, tag.end);
    while let Some(inner) = scanner.next() {
        if inner.start >= close.start {
            break;
        }
        if !inner.opens() {
            continue;
        }
        let end = scan::element_end(markup, &inner)
            .filter(|end| *end <= close.start)
            .ok_or_else(|| unterminated(inner.name))?;
        values.push(Attribute {
            name: property.to_string(),
            value: AttributeValue::Element(build_element(markup, inner, base)?),
        });
        scanner = TagScanner::starting_at(markup, end);
    }

    if values.is_empty() {
        values.push(Attribute::text(property, markup[tag.end..close.start].trim()));
    }
    Ok(values)
}

/// Parses `name="value"` pairs from an opening tag. Single quotes and bare
/// values are accepted; a name without `=` gets an empty value.
fn parse_inline_attributes(tag_text: &str, element: &str) -> Result<Vec<Attribute>, ScanError> {
    let mut cur = Cursor::new(tag_text, 1 + element.len());
    let mut attributes = vec![];

    loop {
        cur.skip_whitespace();
        match cur.peek() {
            None | Some(b'/' | b'>') => break,
            _ => {}
        }

        let name = cur.take_while(|b| !b.is_ascii_whitespace() && !matches!(b, b'=' | b'/' | b'>'));
        if name.is_empty() {
            // Unexpected byte; skip it rather than loop forever.
            cur.bump();
            continue;
        }
        cur.skip_whitespace();
        if cur.peek() != Some(b'=') {
            attributes.push(Attribute::text(name, ""));
            continue;
        }
        cur.bump();
        cur.skip_whitespace();

        let value = match cur.peek() {
            Some(q @ (b'"' | b'\'')) => {
                cur.bump();
                let value = cur.take_while(|b| b != q);
                if cur.bump() != Some(q) {
                    return Err(ScanError::MissingClosingQuote {
                        attribute: name.to_string(),
                    });
                }
                value
            }
            _ => cur.take_while(|b| !b.is_ascii_whitespace() && !matches!(b, b'/' | b'>')),
        };
        attributes.push(Attribute::text(name, value));
    }
    Ok(attributes)
}

impl Element {
    pub fn contains_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| names_match(&a.name, name))
    }

    /// Attributes matching any of `names`, in stored order.
    pub fn get_attributes(&self, names: &[&str]) -> Vec<&Attribute> {
        self.attributes
            .iter()
            .filter(|a| names.iter().any(|n| names_match(&a.name, n)))
            .collect()
    }

    /// First text value stored for `name`.
    pub fn attribute_text(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .filter(|a| names_match(&a.name, name))
            .find_map(Attribute::string_value)
    }

    pub fn contains_child(&self, name: &str) -> bool {
        self.children.iter().any(|c| names_match(&c.name, name))
    }

    pub fn get_children(&self, name: &str) -> Vec<&Element> {
        self.children
            .iter()
            .filter(|c| names_match(&c.name, name))
            .collect()
    }

    pub fn contains_descendant(&self, name: &str) -> bool {
        self.descendants().any(|d| names_match(&d.name, name))
    }

    pub fn get_descendants(&self, name: &str) -> Vec<&Element> {
        self.descendants()
            .filter(|d| names_match(&d.name, name))
            .collect()
    }

    /// Every element below this one, including those held in property
    /// elements, in pre-order.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack = vec![];
        push_nested(&mut stack, self);
        Descendants { stack }
    }
}

/// Pre-order walk over an element's subtree using an explicit stack.
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

fn push_nested<'a>(stack: &mut Vec<&'a Element>, element: &'a Element) {
    let nested: Vec<&Element> = element
        .attributes
        .iter()
        .filter_map(Attribute::element_value)
        .chain(element.children.iter())
        .collect();
    stack.extend(nested.into_iter().rev());
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<&'a Element> {
        let next = self.stack.pop()?;
        push_nested(&mut self.stack, next);
        Some(next)
    }
}
