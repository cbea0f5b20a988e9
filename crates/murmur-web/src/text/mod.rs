//! Renderable text fragments.
//!
//! A [`Part`] is a node in a tree of renderable fragments: either a single
//! pre-built template with its bound variables, or an ordered container of
//! child parts. Containers render their children in exactly the order they
//! were added; the first I/O error aborts the remaining siblings and
//! propagates unchanged.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::Arc;

use minijinja::Environment;
use minijinja::value::Value;
use serde::Serialize;

/// A renderable fragment.
#[derive(Debug, Clone)]
pub enum Part {
    /// A leaf that renders a single template.
    Template(TemplatePart),
    /// An ordered sequence of child parts.
    Container(PartContainer),
}

impl Part {
    /// Writes this part's content to the given sink.
    pub fn render(&self, sink: &mut dyn Write) -> io::Result<()> {
        match self {
            Part::Template(template) => template.render(sink),
            Part::Container(container) => container.render(sink),
        }
    }
}

impl From<TemplatePart> for Part {
    fn from(template: TemplatePart) -> Self {
        Part::Template(template)
    }
}

impl From<PartContainer> for Part {
    fn from(container: PartContainer) -> Self {
        Part::Container(container)
    }
}

/// A part that is rendered from a template.
#[derive(Debug, Clone)]
pub struct TemplatePart {
    environment: Arc<Environment<'static>>,
    template_name: String,
    variables: BTreeMap<String, Value>,
}

impl TemplatePart {
    /// Creates a new template part.
    pub fn new(environment: Arc<Environment<'static>>, template_name: impl Into<String>) -> Self {
        Self {
            environment,
            template_name: template_name.into(),
            variables: BTreeMap::new(),
        }
    }

    /// Binds a variable in the template. Returns this part for chaining.
    pub fn set(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        self.variables
            .insert(key.into(), Value::from_serialize(&value));
        self
    }

    /// Renders the template with the bound variables into the given sink.
    pub fn render(&self, sink: &mut dyn Write) -> io::Result<()> {
        let template = self
            .environment
            .get_template(&self.template_name)
            .map_err(template_error)?;
        let rendered = template.render(&self.variables).map_err(template_error)?;
        sink.write_all(rendered.as_bytes())
    }
}

fn template_error(err: minijinja::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}

/// A part that contains an arbitrary amount of other parts. Parts are added
/// with [`add`](PartContainer::add) and rendered in the order they were
/// added.
#[derive(Debug, Clone, Default)]
pub struct PartContainer {
    parts: Vec<Part>,
}

impl PartContainer {
    /// Creates a new empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a part to render.
    pub fn add(&mut self, part: impl Into<Part>) {
        self.parts.push(part.into());
    }

    /// Returns the number of parts in this container.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns whether this container is empty.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Renders every part in insertion order, stopping at the first failure.
    pub fn render(&self, sink: &mut dyn Write) -> io::Result<()> {
        for part in &self.parts {
            part.render(sink)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment() -> Arc<Environment<'static>> {
        let mut environment = Environment::new();
        environment
            .add_template("letter", "{{ letter }}")
            .unwrap();
        environment
            .add_template("greeting", "Hello, {{ name }}!")
            .unwrap();
        Arc::new(environment)
    }

    fn letter(environment: &Arc<Environment<'static>>, letter: &str) -> TemplatePart {
        TemplatePart::new(environment.clone(), "letter").set("letter", letter)
    }

    /// A sink that accepts a limited number of bytes and then fails.
    struct LimitedSink {
        written: Vec<u8>,
        capacity: usize,
    }

    impl LimitedSink {
        fn new(capacity: usize) -> Self {
            Self {
                written: Vec::new(),
                capacity,
            }
        }
    }

    impl Write for LimitedSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written.len() + buf.len() > self.capacity {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "sink full"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn template_part_renders_bound_variables() {
        let environment = environment();
        let part = TemplatePart::new(environment, "greeting").set("name", "world");
        let mut sink = Vec::new();
        part.render(&mut sink).unwrap();
        assert_eq!(sink, b"Hello, world!");
    }

    #[test]
    fn unknown_template_fails_with_an_io_error() {
        let environment = environment();
        let part = TemplatePart::new(environment, "missing");
        let mut sink = Vec::new();
        assert!(part.render(&mut sink).is_err());
    }

    #[test]
    fn container_renders_children_in_append_order() {
        let environment = environment();
        let mut container = PartContainer::new();
        container.add(letter(&environment, "A"));
        container.add(letter(&environment, "B"));
        container.add(letter(&environment, "C"));
        let mut sink = Vec::new();
        container.render(&mut sink).unwrap();
        assert_eq!(sink, b"ABC");
    }

    #[test]
    fn container_aborts_at_the_first_failure() {
        let environment = environment();
        let mut container = PartContainer::new();
        container.add(letter(&environment, "A"));
        container.add(letter(&environment, "B"));
        container.add(letter(&environment, "C"));
        // Room for exactly one letter: A renders, B fails, C is never reached.
        let mut sink = LimitedSink::new(1);
        assert!(container.render(&mut sink).is_err());
        assert_eq!(sink.written, b"A");
    }

    #[test]
    fn containers_nest() {
        let environment = environment();
        let mut inner = PartContainer::new();
        inner.add(letter(&environment, "B"));
        let mut outer = PartContainer::new();
        outer.add(letter(&environment, "A"));
        outer.add(inner);
        let mut sink = Vec::new();
        outer.render(&mut sink).unwrap();
        assert_eq!(sink, b"AB");
    }
}
