use murmur_core::Result;

use super::{Flow, TemplateContext, TemplatePage};
use crate::request::Request;
use crate::web_interface::Services;

/// Shows the plugin version.
pub struct AboutPage;

impl TemplatePage for AboutPage {
    fn path(&self) -> &'static str {
        "about.html"
    }

    fn template_name(&self) -> &'static str {
        "about.html"
    }

    fn page_title(&self) -> &'static str {
        "About"
    }

    fn process(
        &self,
        _request: &Request,
        _services: &Services,
        context: &mut TemplateContext,
    ) -> Result<Flow> {
        context.set("version", env!("CARGO_PKG_VERSION"));
        Ok(Flow::Render)
    }
}
