use murmur_core::Result;

use super::{Flow, TemplateContext, TemplatePage};
use crate::request::Request;
use crate::web_interface::Services;

/// Lists every author known to the core.
pub struct KnownAuthorsPage;

impl TemplatePage for KnownAuthorsPage {
    fn path(&self) -> &'static str {
        "knownAuthors.html"
    }

    fn template_name(&self) -> &'static str {
        "knownAuthors.html"
    }

    fn page_title(&self) -> &'static str {
        "Known Authors"
    }

    fn process(
        &self,
        _request: &Request,
        services: &Services,
        context: &mut TemplateContext,
    ) -> Result<Flow> {
        let mut authors = services.core.authors();
        authors.sort_by(|a, b| a.name.cmp(&b.name));
        context.set("knownAuthors", &authors);
        Ok(Flow::Render)
    }
}
