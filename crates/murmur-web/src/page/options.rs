use murmur_core::Result;

use super::{Flow, TemplateContext, TemplatePage};
use crate::request::{Method, Request};
use crate::web_interface::Services;

const MAX_NUMBER_LENGTH: usize = 256;
const MAX_FLAG_LENGTH: usize = 4;

/// Shows and changes the plugin options.
pub struct OptionsPage;

impl TemplatePage for OptionsPage {
    fn path(&self) -> &'static str {
        "options.html"
    }

    fn template_name(&self) -> &'static str {
        "options.html"
    }

    fn page_title(&self) -> &'static str {
        "Options"
    }

    fn requires_login(&self) -> bool {
        true
    }

    fn process(
        &self,
        request: &Request,
        services: &Services,
        context: &mut TemplateContext,
    ) -> Result<Flow> {
        if request.method() == Method::Post {
            let mut options = services.core.options();
            if let Ok(delay) = request
                .part("insertion-delay", MAX_NUMBER_LENGTH)
                .trim()
                .parse()
            {
                options.insertion_delay_secs = delay;
            }
            options.require_full_access =
                request.part("require-full-access", MAX_FLAG_LENGTH) == "true";
            services.core.set_options(options)?;
            return Ok(Flow::redirect("options.html"));
        }
        let options = services.core.options();
        context.set("insertionDelay", options.insertion_delay_secs);
        context.set("requireFullAccess", options.require_full_access);
        Ok(Flow::Render)
    }
}
