use log::{debug, error, info, warn};
use serde::Serialize;
use serde_json::Map;

use crate::asset::{AssetInfo, AssetOutputInfo};
use crate::config::AssetgenConfig;
use crate::error::{ConfigError, TemplateError};
use crate::template::{AssetTemplate, TemplateContext, TemplateRegistry};

/// Result of processing one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessOutcome {
    pub output: AssetOutputInfo,
    /// Id of the template that produced the output, `None` for the default
    /// content-less output.
    pub template: Option<&'static str>,
}

impl ProcessOutcome {
    fn fallback(info: &AssetInfo) -> Self {
        Self {
            output: AssetOutputInfo::new(&info.path()),
            template: None,
        }
    }
}

/// Runs the enabled templates against assets, in selection order.
pub struct TemplatesProcessor {
    templates: Vec<Box<dyn AssetTemplate>>,
}

impl TemplatesProcessor {
    /// Instantiate every enabled template of `registry`, ordered by
    /// `order` then registration order.
    pub fn new(registry: &TemplateRegistry, config: &AssetgenConfig) -> Result<Self, ConfigError> {
        let render = config.render_options()?;
        let no_options = Map::new();
        let mut templates = Vec::new();

        for registration in registry.ordered() {
            let descriptor = registration.descriptor;
            if !config.is_enabled(descriptor) {
                debug!("template `{}` is disabled", descriptor.id);
                continue;
            }
            let options = config
                .templates
                .get(descriptor.id)
                .map(|s| &s.options)
                .unwrap_or(&no_options);
            let ctx = TemplateContext {
                id: descriptor.id,
                options,
                render: &render,
            };
            templates.push((registration.factory)(&ctx)?);
        }

        Ok(Self { templates })
    }

    /// Enabled templates in selection order.
    pub fn templates(&self) -> impl Iterator<Item = &dyn AssetTemplate> {
        self.templates.iter().map(|t| t.as_ref())
    }

    /// First template that applies to `info`.
    pub fn select(&self, info: &AssetInfo) -> Option<&dyn AssetTemplate> {
        self.templates().find(|t| t.can_generate(info))
    }

    /// Generate the output for `info` with the first applicable template.
    ///
    /// When no template applies, or the selected one turns out not to,
    /// the default output is returned: the asset's own path and no content.
    /// Structural errors of the selected template are returned as is.
    pub fn process(&self, info: &AssetInfo) -> Result<ProcessOutcome, TemplateError> {
        let Some(template) = self.select(info) else {
            debug!("no template applies to \"{}\"", info.path());
            return Ok(ProcessOutcome::fallback(info));
        };
        let id = template.descriptor().id;
        info!("generating \"{}\" with template `{id}`", info.path());

        let mut output = AssetOutputInfo::new(&info.path());
        match template.generate(info, &mut output) {
            Ok(()) => {}
            Err(TemplateError::NotApplicable(reason)) => {
                warn!("template `{id}` skipped \"{}\": {reason}", info.path());
                return Ok(ProcessOutcome::fallback(info));
            }
            Err(e) => {
                error!("template `{id}` failed on \"{}\": {e}", info.path());
                return Err(e);
            }
        }

        if output.path().is_empty() {
            return Err(TemplateError::EmptyPath(id.to_string()));
        }
        if output.resolve_editor_path() {
            debug!("moved editor-only output to \"{}\"", output.path());
        }

        Ok(ProcessOutcome {
            output,
            template: Some(id),
        })
    }
}

impl std::fmt::Debug for TemplatesProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.templates().map(|t| t.descriptor().id))
            .finish()
    }
}
